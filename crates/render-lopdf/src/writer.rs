use crate::error::RenderError;
use crate::helpers::{self, OutlineEntry, flate_stream, pdf_string};
use chrono::{DateTime, Utc};
use folio_layout::{
    FaceDescriptor, FaceSource, FontBook, FontFace, FontId, ImageItem, Page, PageItem, RuleItem,
    TextItem,
};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::PathBuf;

const FIRST_CHAR: usize = 32;
const LAST_CHAR: usize = 255;

/// Entries for the PDF document information dictionary.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub producer: String,
    pub created: Option<DateTime<Utc>>,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: None,
            producer: "folio".to_string(),
            created: None,
        }
    }
}

/// Serializes laid-out pages into a PDF document.
pub struct PdfWriter<'a> {
    fonts: &'a FontBook,
    info: DocumentInfo,
    outline: Vec<OutlineEntry>,
}

impl<'a> PdfWriter<'a> {
    pub fn new(fonts: &'a FontBook) -> Self {
        Self {
            fonts,
            info: DocumentInfo::default(),
            outline: Vec::new(),
        }
    }

    pub fn with_info(mut self, info: DocumentInfo) -> Self {
        self.info = info;
        self
    }

    pub fn with_outline(mut self, outline: Vec<OutlineEntry>) -> Self {
        self.outline = outline;
        self
    }

    /// Builds the document and writes it to `writer`.
    pub fn write<W: Write>(&self, pages: &[Page], writer: &mut W) -> Result<(), RenderError> {
        let mut doc = self.build(pages)?;
        doc.save_to(writer)?;
        Ok(())
    }

    /// Builds the in-memory PDF object graph for `pages`.
    pub fn build(&self, pages: &[Page]) -> Result<Document, RenderError> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let font_names = self.add_fonts(&mut doc, pages)?;
        let image_names = add_images(&mut doc, pages)?;

        let mut font_dict = Dictionary::new();
        for (id, (name, object_id)) in &font_names {
            log::debug!("Font resource /{} -> {}", name, self.fonts.face(*id).postscript_name);
            font_dict.set(name.as_bytes(), *object_id);
        }
        let mut resources = dictionary! { "Font" => font_dict };
        if !image_names.is_empty() {
            let mut xobjects = Dictionary::new();
            for (name, object_id) in image_names.values() {
                xobjects.set(name.as_bytes(), *object_id);
            }
            resources.set("XObject", xobjects);
        }
        let resources_id = doc.add_object(resources);

        let mut annots = helpers::create_link_annotations(&mut doc, pages);
        let mut page_ids = Vec::with_capacity(pages.len());
        for (idx, page) in pages.iter().enumerate() {
            let content = page_content(page, &font_names, &image_names);
            let stream = flate_stream(Dictionary::new(), &content.encode()?)?;
            let content_id = doc.add_object(stream);

            let mut page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.0.into(), 0.0.into(), page.width.into(), page.height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            };
            if let Some(ids) = annots.remove(&idx) {
                page_dict.set("Annots", ids.into_iter().map(Object::Reference).collect::<Vec<_>>());
            }
            page_ids.push(doc.add_object(page_dict));
        }

        doc.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => page_ids.iter().copied().map(Object::Reference).collect::<Vec<_>>(),
                "Count" => page_ids.len() as i64,
            }
            .into(),
        );

        let mut catalog = dictionary! { "Type" => "Catalog", "Pages" => pages_id };
        let page_height = pages.first().map(|p| p.height).unwrap_or_default();
        if let Some(outline_id) = helpers::build_outlines(&mut doc, &self.outline, &page_ids, page_height) {
            catalog.set("Outlines", outline_id);
            catalog.set("PageMode", "UseOutlines");
        }
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", catalog_id);

        let info_id = doc.add_object(self.info_dictionary());
        doc.trailer.set("Info", info_id);

        log::info!("Built PDF with {} pages and {} fonts", page_ids.len(), font_names.len());
        Ok(doc)
    }

    fn info_dictionary(&self) -> Dictionary {
        let mut info = dictionary! { "Producer" => pdf_string(&self.info.producer) };
        if let Some(title) = &self.info.title {
            info.set("Title", pdf_string(title));
        }
        if let Some(created) = &self.info.created {
            let date = created.format("D:%Y%m%d%H%M%SZ").to_string();
            info.set("CreationDate", Object::string_literal(date));
        }
        info
    }

    /// Adds a font object for every face used on any page, keyed by face id.
    fn add_fonts(
        &self,
        doc: &mut Document,
        pages: &[Page],
    ) -> Result<BTreeMap<FontId, (String, ObjectId)>, RenderError> {
        let mut used: Vec<FontId> = pages
            .iter()
            .flat_map(|p| p.texts().map(|t| t.font))
            .collect();
        used.sort();
        used.dedup();

        let mut names = BTreeMap::new();
        for (i, id) in used.into_iter().enumerate() {
            let face = self.fonts.face(id);
            let object_id = match &face.source {
                FaceSource::Standard => doc.add_object(dictionary! {
                    "Type" => "Font", "Subtype" => "Type1",
                    "BaseFont" => face.postscript_name.as_str(), "Encoding" => "WinAnsiEncoding",
                }),
                FaceSource::TrueType { data, descriptor } => {
                    embed_truetype(doc, face, data, descriptor)?
                }
            };
            names.insert(id, (format!("F{}", i + 1), object_id));
        }
        Ok(names)
    }
}

fn embed_truetype(
    doc: &mut Document,
    face: &FontFace,
    data: &[u8],
    descriptor: &FaceDescriptor,
) -> Result<ObjectId, RenderError> {
    let file = flate_stream(dictionary! { "Length1" => data.len() as i64 }, data)?;
    let file_id = doc.add_object(file);

    // Nonsymbolic, plus FixedPitch and Italic when they apply.
    let mut flags = 32;
    if descriptor.fixed_pitch {
        flags |= 1;
    }
    if descriptor.italic {
        flags |= 64;
    }
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => face.postscript_name.as_str(),
        "Flags" => flags,
        "FontBBox" => descriptor.bbox.iter().map(|v| Object::Integer(*v as i64)).collect::<Vec<_>>(),
        "ItalicAngle" => if descriptor.italic { -12 } else { 0 },
        "Ascent" => descriptor.ascent as i64,
        "Descent" => descriptor.descent as i64,
        "CapHeight" => descriptor.cap_height as i64,
        "StemV" => 80,
        "FontFile2" => file_id,
    });

    let widths: Vec<Object> = face.widths()[FIRST_CHAR..=LAST_CHAR]
        .iter()
        .map(|w| Object::Integer(*w as i64))
        .collect();
    Ok(doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "TrueType",
        "BaseFont" => face.postscript_name.as_str(),
        "FirstChar" => FIRST_CHAR as i64,
        "LastChar" => LAST_CHAR as i64,
        "Widths" => widths,
        "FontDescriptor" => descriptor_id,
        "Encoding" => "WinAnsiEncoding",
    }))
}

/// Adds one image XObject per distinct image file.
fn add_images(
    doc: &mut Document,
    pages: &[Page],
) -> Result<HashMap<PathBuf, (String, ObjectId)>, RenderError> {
    let mut names = HashMap::new();
    for image in pages.iter().flat_map(Page::images) {
        if names.contains_key(&image.path) {
            continue;
        }
        log::debug!("Embedding image {}", image.path.display());
        let decoded = image::open(&image.path).map_err(|e| RenderError::Image {
            path: image.path.clone(),
            message: e.to_string(),
        })?;
        let rgb = decoded.to_rgb8();
        let stream = flate_stream(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => rgb.width() as i64,
                "Height" => rgb.height() as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            rgb.as_raw(),
        )?;
        let object_id = doc.add_object(stream);
        names.insert(image.path.clone(), (format!("Im{}", names.len() + 1), object_id));
    }
    Ok(names)
}

struct PageContext<'a> {
    page_height: f32,
    content: Content,
    fonts: &'a BTreeMap<FontId, (String, ObjectId)>,
    images: &'a HashMap<PathBuf, (String, ObjectId)>,
}

fn page_content(
    page: &Page,
    fonts: &BTreeMap<FontId, (String, ObjectId)>,
    images: &HashMap<PathBuf, (String, ObjectId)>,
) -> Content {
    let mut ctx = PageContext {
        page_height: page.height,
        content: Content { operations: vec![] },
        fonts,
        images,
    };
    for item in &page.items {
        match item {
            PageItem::Text(text) => ctx.draw_text(text),
            PageItem::Rule(rule) => ctx.draw_rule(rule),
            PageItem::Image(image) => ctx.draw_image(image),
        }
    }
    ctx.content
}

impl PageContext<'_> {
    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw_text(&mut self, text: &TextItem) {
        if text.text.is_empty() {
            return;
        }
        let Some((name, _)) = self.fonts.get(&text.font) else {
            return;
        };
        let name = name.clone();
        self.push("BT", vec![]);
        self.push("Tf", vec![Object::Name(name.into_bytes()), text.size.into()]);
        self.push("Td", vec![text.x.into(), (self.page_height - text.y).into()]);
        self.push("Tj", vec![pdf_string(&text.text)]);
        self.push("ET", vec![]);
    }

    fn draw_rule(&mut self, rule: &RuleItem) {
        self.push("w", vec![rule.thickness.into()]);
        self.push("m", vec![rule.x1.into(), (self.page_height - rule.y1).into()]);
        self.push("l", vec![rule.x2.into(), (self.page_height - rule.y2).into()]);
        self.push("S", vec![]);
    }

    fn draw_image(&mut self, image: &ImageItem) {
        let Some((name, _)) = self.images.get(&image.path) else {
            return;
        };
        let name = name.clone();
        let bottom = self.page_height - image.y - image.height;
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                image.width.into(),
                0.into(),
                0.into(),
                image.height.into(),
                image.x.into(),
                bottom.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.into_bytes())]);
        self.push("Q", vec![]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_layout::{TextStyle, win_ansi};

    fn text_page(fonts: &FontBook) -> Page {
        let font = fonts.resolve("Helvetica", TextStyle::BOLD).unwrap();
        let mut page = Page::new(1, 595.0, 842.0);
        page.items.push(PageItem::Text(TextItem {
            x: 50.0,
            y: 100.0,
            width: 40.0,
            font,
            size: 12.0,
            text: "Caf\u{e9}".into(),
            link: Some("https://example.com".into()),
        }));
        page.items.push(PageItem::Rule(RuleItem {
            x1: 50.0,
            y1: 800.0,
            x2: 545.0,
            y2: 800.0,
            thickness: 0.5,
        }));
        page
    }

    fn decode_pdf_string(bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|b| win_ansi::decode_byte(*b).unwrap_or('?'))
            .collect()
    }

    fn page_operations(doc: &Document, page: u32) -> Vec<Operation> {
        let page_id = doc.get_pages()[&page];
        let content = doc.get_page_content(page_id).unwrap();
        Content::decode(&content).unwrap().operations
    }

    #[test]
    fn writes_loadable_pdf_with_standard_fonts() {
        let fonts = FontBook::new();
        let pages = vec![text_page(&fonts)];
        let mut bytes = Vec::new();
        PdfWriter::new(&fonts).write(&pages, &mut bytes).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);

        let ops = page_operations(&doc, 1);
        let shown: Vec<String> = ops
            .iter()
            .filter(|op| op.operator == "Tj")
            .map(|op| decode_pdf_string(op.operands[0].as_str().unwrap()))
            .collect();
        assert_eq!(shown, vec!["Caf\u{e9}"]);
        assert!(ops.iter().any(|op| op.operator == "S"));

        // Only the face in use is emitted.
        let base_fonts: Vec<_> = doc
            .objects
            .values()
            .filter_map(|o| o.as_dict().ok())
            .filter(|d| d.get(b"Type").and_then(Object::as_name).ok() == Some(b"Font".as_slice()))
            .map(|d| d.get(b"BaseFont").unwrap().as_name().unwrap().to_vec())
            .collect();
        assert_eq!(base_fonts, vec![b"Helvetica-Bold".to_vec()]);
    }

    #[test]
    fn links_become_uri_annotations() {
        let fonts = FontBook::new();
        let doc = PdfWriter::new(&fonts).build(&[text_page(&fonts)]).unwrap();
        let page_id = doc.get_pages()[&1];
        let page = doc.get_dictionary(page_id).unwrap();
        let annots = page.get(b"Annots").unwrap().as_array().unwrap();
        assert_eq!(annots.len(), 1);
        let annot = doc.get_dictionary(annots[0].as_reference().unwrap()).unwrap();
        let action = annot.get(b"A").unwrap().as_dict().unwrap();
        assert_eq!(action.get(b"URI").unwrap().as_str().unwrap(), b"https://example.com");
    }

    #[test]
    fn info_and_outline_are_written() {
        let fonts = FontBook::new();
        let info = DocumentInfo {
            title: Some("Manual".into()),
            created: Some(Utc::now()),
            ..DocumentInfo::default()
        };
        let outline = vec![OutlineEntry { title: "Intro".into(), level: 1, page: 1, y: 56.0 }];
        let doc = PdfWriter::new(&fonts)
            .with_info(info)
            .with_outline(outline)
            .build(&[text_page(&fonts)])
            .unwrap();

        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_id).unwrap();
        assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Manual");
        assert!(info.has(b"CreationDate"));

        let catalog = doc.catalog().unwrap();
        assert!(catalog.has(b"Outlines"));
    }

    #[test]
    fn images_are_embedded_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::RgbImage::from_pixel(4, 2, image::Rgb([255, 0, 0])).save(&path).unwrap();

        let mut page = Page::new(1, 595.0, 842.0);
        for y in [100.0, 300.0] {
            page.items.push(PageItem::Image(ImageItem {
                x: 50.0,
                y,
                width: 100.0,
                height: 50.0,
                path: path.clone(),
            }));
        }
        let fonts = FontBook::new();
        let doc = PdfWriter::new(&fonts).build(&[page]).unwrap();

        let images = doc
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .filter(|s| s.dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(b"Image".as_slice()))
            .count();
        assert_eq!(images, 1);
        let draws = page_operations(&doc, 1).iter().filter(|op| op.operator == "Do").count();
        assert_eq!(draws, 2);
    }

    #[test]
    fn missing_image_file_is_an_error() {
        let mut page = Page::new(1, 595.0, 842.0);
        page.items.push(PageItem::Image(ImageItem {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            path: PathBuf::from("/nonexistent/missing.png"),
        }));
        let fonts = FontBook::new();
        let err = PdfWriter::new(&fonts).build(&[page]).unwrap_err();
        assert!(matches!(err, RenderError::Image { .. }));
    }
}
