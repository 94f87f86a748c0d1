mod common;

use common::fixtures::*;
use common::pdf_assertions::{extract_link_uris, extract_outline, info_title, page_strings};
use common::{GeneratedPdf, TestResult, generate_pdf};
use folio::{RenderConfig, RendererBuilder};
use lopdf::Object;

#[test]
fn test_hello_book_pdf() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let (rendered, pdf) = generate_pdf(&hello_book())?;
    assert_pdf_page_count!(pdf, rendered.page_count());
    assert_pdf_contains_text!(pdf, "Intro");
    assert_pdf_contains_text!(pdf, "Hello world.");
    assert_pdf_contains_text!(pdf, "Overview | 1");
    assert_pdf_has_font!(pdf, "Helvetica-Bold");
    assert_pdf_has_font!(pdf, "Helvetica");
    assert!(pdf.bytes.starts_with(b"%PDF-1.7"));
    Ok(())
}

#[test]
fn test_only_used_fonts_are_embedded() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let (_, pdf) = generate_pdf(&hello_book())?;
    let fonts = common::pdf_assertions::extract_font_names(&pdf.doc);
    assert!(!fonts.iter().any(|f| f.starts_with("Courier")), "{:?}", fonts);
    assert!(!fonts.iter().any(|f| f.starts_with("Times")), "{:?}", fonts);
    Ok(())
}

#[test]
fn test_footers_reach_the_pdf() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let (rendered, pdf) = generate_pdf(&book(&chapter("Intro", &section("Overview", &filler(60)))))?;
    assert!(rendered.page_count() >= 2);
    assert_pdf_page_count!(pdf, rendered.page_count());
    assert!(page_strings(&pdf.doc, 1).iter().any(|s| s == "Overview | 1"));
    assert!(page_strings(&pdf.doc, 2).iter().any(|s| s == "2 | Chapter 1: Intro"));
    Ok(())
}

#[test]
fn test_outline_nests_sections_under_chapters() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let xml = book(&format!(
        "{}\n{}",
        chapter(
            "One",
            &format!("{}\n{}", section("A", &simpara("a")), section("B", &simpara("b")))
        ),
        chapter("Two", &section("C", &simpara("c")))
    ));
    let (_, pdf) = generate_pdf(&xml)?;
    assert_eq!(
        extract_outline(&pdf.doc),
        vec![
            ("One".to_string(), 1),
            ("A".to_string(), 2),
            ("B".to_string(), 2),
            ("Two".to_string(), 1),
            ("C".to_string(), 2),
        ]
    );

    let catalog = pdf.doc.catalog()?;
    assert_eq!(catalog.get(b"PageMode")?.as_name()?, b"UseOutlines");
    Ok(())
}

#[test]
fn test_ulink_becomes_a_uri_annotation() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let para = r#"<para>Read <ulink url="https://docbook.org">the guide</ulink> and <ulink url="https://example.com/raw"/>.</para>"#;
    let (_, pdf) = generate_pdf(&book(&chapter("Intro", &section("Links", para))))?;

    assert_pdf_contains_text!(pdf, "the guide");
    assert_pdf_contains_text!(pdf, "https://example.com/raw");
    assert_eq!(
        extract_link_uris(&pdf.doc),
        vec!["https://docbook.org".to_string(), "https://example.com/raw".to_string()]
    );
    Ok(())
}

#[test]
fn test_document_title_in_metadata() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let xml = book(&format!("<title>The Folio Guide</title>\n{}", chapter("Intro", &simpara("x"))));
    let (rendered, pdf) = generate_pdf(&xml)?;
    assert_eq!(rendered.title.as_deref(), Some("The Folio Guide"));
    assert_eq!(info_title(&pdf.doc).as_deref(), Some("The Folio Guide"));
    assert_pdf_not_contains_text!(pdf, "The Folio Guide");

    let config = RenderConfig {
        title: Some("Configured".into()),
        ..RenderConfig::default()
    };
    let rendered = RendererBuilder::new().with_config(config).build()?.render_xml(&xml)?;
    let pdf = GeneratedPdf::from_bytes(rendered.to_pdf_bytes()?)?;
    assert_eq!(info_title(&pdf.doc).as_deref(), Some("Configured"));
    Ok(())
}

#[test]
fn test_render_file_resolves_images_next_to_the_input() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir()?;
    let image = write_png(dir.path(), "shot.png", 30, 30);
    let figure = format!(
        r#"<figure><title>Screenshot</title><mediaobject><imageobject><imagedata fileref="{}"/></imageobject></mediaobject></figure>"#,
        image
    );
    let body = format!("{}\n<unknown/>", figure);
    let input = dir.path().join("book.xml");
    std::fs::write(&input, book(&chapter("Intro", &section("Pictures", &body))))?;
    let output = dir.path().join("book.pdf");

    let diagnostics = RendererBuilder::new().build()?.render_file(&input, &output)?;
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].element, "unknown");

    let pdf = GeneratedPdf::from_bytes(std::fs::read(&output)?)?;
    assert_pdf_page_count!(pdf, 1);
    assert_pdf_contains_text!(pdf, "Screenshot");
    let images = pdf
        .doc
        .objects
        .values()
        .filter_map(|o| o.as_stream().ok())
        .filter(|s| s.dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(b"Image".as_slice()))
        .count();
    assert_eq!(images, 1);
    Ok(())
}

#[test]
fn test_page_size_from_config_file() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir()?;
    let config = dir.path().join("folio.json");
    std::fs::write(&config, r#"{ "page": { "size": "Letter", "margins": 36 } }"#)?;

    let renderer = RendererBuilder::new().with_config_file(&config)?.build()?;
    assert_eq!(renderer.config().page.margins.left, 36.0);

    let rendered = renderer.render_xml(&hello_book())?;
    let pdf = GeneratedPdf::from_bytes(rendered.to_pdf_bytes()?)?;
    let page_id = *pdf.doc.get_pages().get(&1).ok_or("first page")?;
    let media_box = pdf.doc.get_dictionary(page_id)?.get(b"MediaBox")?.as_array()?.clone();
    let width = media_box[2].as_float()?;
    let height = media_box[3].as_float()?;
    assert!((width - 612.0).abs() < 1e-3);
    assert!((height - 792.0).abs() < 1e-3);
    Ok(())
}
