use folio_layout::win_ansi;
use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object};

/// Strings shown with `Tj` on one page, in content stream order
pub fn page_strings(doc: &LopdfDocument, page: u32) -> Vec<String> {
    let Some(page_id) = doc.get_pages().get(&page).copied() else {
        return Vec::new();
    };
    let Ok(content) = doc.get_page_content(page_id) else {
        return Vec::new();
    };
    let Ok(content) = Content::decode(&content) else {
        return Vec::new();
    };
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_str().ok())
        .map(|bytes| bytes.iter().map(|b| win_ansi::decode_byte(*b).unwrap_or('?')).collect())
        .collect()
}

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    for page in 1..=doc.get_pages().len() as u32 {
        for s in page_strings(doc, page) {
            text.push_str(&s);
            text.push('\n');
        }
    }
    text
}

/// Extract font names referenced by the pages
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts: Vec<String> = doc
        .objects
        .values()
        .filter_map(|o| o.as_dict().ok())
        .filter(|d| d.get(b"Type").and_then(Object::as_name).ok() == Some(b"Font".as_slice()))
        .filter_map(|d| d.get(b"BaseFont").and_then(Object::as_name).ok())
        .map(|name| String::from_utf8_lossy(name).to_string())
        .collect();
    fonts.sort();
    fonts.dedup();
    fonts
}

/// URIs of all link annotations, in page order
pub fn extract_link_uris(doc: &LopdfDocument) -> Vec<String> {
    let mut uris = Vec::new();
    for page_id in doc.get_pages().values() {
        let Ok(page) = doc.get_dictionary(*page_id) else { continue };
        let Ok(annots) = page.get(b"Annots").and_then(Object::as_array) else { continue };
        for annot in annots {
            let Ok(annot) = annot.as_reference().and_then(|id| doc.get_dictionary(id)) else {
                continue;
            };
            if let Ok(uri) = annot
                .get(b"A")
                .and_then(Object::as_dict)
                .and_then(|a| a.get(b"URI"))
                .and_then(Object::as_str)
            {
                uris.push(String::from_utf8_lossy(uri).to_string());
            }
        }
    }
    uris
}

/// Bookmark titles with their depth (1 = top level), depth first
pub fn extract_outline(doc: &LopdfDocument) -> Vec<(String, usize)> {
    fn walk(doc: &LopdfDocument, first: Option<&Object>, depth: usize, out: &mut Vec<(String, usize)>) {
        let mut next = first.and_then(|o| o.as_reference().ok());
        while let Some(id) = next {
            let Ok(item) = doc.get_dictionary(id) else { return };
            if let Ok(title) = item.get(b"Title").and_then(Object::as_str) {
                let title = title.iter().map(|b| win_ansi::decode_byte(*b).unwrap_or('?')).collect();
                out.push((title, depth));
            }
            walk(doc, item.get(b"First").ok(), depth + 1, out);
            next = item.get(b"Next").and_then(Object::as_reference).ok();
        }
    }

    let mut out = Vec::new();
    let Ok(catalog) = doc.catalog() else { return out };
    let Ok(root) = catalog
        .get(b"Outlines")
        .and_then(Object::as_reference)
        .and_then(|id| doc.get_dictionary(id))
    else {
        return out;
    };
    walk(doc, root.get(b"First").ok(), 1, &mut out);
    out
}

/// Title from the document information dictionary
pub fn info_title(doc: &LopdfDocument) -> Option<String> {
    let info = doc
        .trailer
        .get(b"Info")
        .and_then(Object::as_reference)
        .and_then(|id| doc.get_dictionary(id))
        .ok()?;
    let title = info.get(b"Title").and_then(Object::as_str).ok()?;
    Some(String::from_utf8_lossy(title).to_string())
}

// ============================================================================
// Fluent Assertion Macros
// ============================================================================

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert that PDF contains a font matching a pattern
#[macro_export]
macro_rules! assert_pdf_has_font {
    ($pdf:expr, $pattern:expr) => {
        let fonts = $crate::common::pdf_assertions::extract_font_names(&$pdf.doc);
        assert!(
            fonts.iter().any(|f| f.contains($pattern)),
            "PDF should contain font matching '{}', fonts found: {:?}",
            $pattern,
            fonts
        );
    };
}
