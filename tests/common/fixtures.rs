/// Wraps chapters and sections in a `<book>` with the DocBook 5 namespace
pub fn book(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<book xmlns="http://docbook.org/ns/docbook" version="5.0">
{}
</book>"#,
        body
    )
}

pub fn chapter(title: &str, body: &str) -> String {
    format!("<chapter>\n  <title>{}</title>\n{}\n</chapter>", title, body)
}

pub fn section(title: &str, body: &str) -> String {
    format!("<section>\n  <title>{}</title>\n{}\n</section>", title, body)
}

pub fn simpara(text: &str) -> String {
    format!("<simpara>{}</simpara>", text)
}

/// `count` paragraphs of body text, enough of them to fill several pages
pub fn filler(count: usize) -> String {
    (1..=count)
        .map(|i| {
            simpara(&format!(
                "Paragraph {} keeps the text flowing so that layout has to break pages \
                 and every page gets a running footer.",
                i
            ))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The smallest complete book: one chapter, one section, one paragraph
pub fn hello_book() -> String {
    book(&chapter("Intro", &section("Overview", &simpara("Hello world."))))
}

/// Writes a small PNG into `dir` and returns its file name
pub fn write_png(dir: &std::path::Path, name: &str, width: u32, height: u32) -> String {
    image::RgbImage::from_pixel(width, height, image::Rgb([40, 90, 160]))
        .save(dir.join(name))
        .expect("write test image");
    name.to_string()
}
