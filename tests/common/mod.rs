#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use folio::{PipelineError, Rendered, RendererBuilder};
use lopdf::Document as LopdfDocument;
use std::path::Path;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Lay out an XML document with the default configuration
pub fn render_xml(xml: &str) -> Result<Rendered, PipelineError> {
    RendererBuilder::new().build()?.render_xml(xml)
}

/// Lay out an XML document whose image references resolve against `dir`
pub fn render_xml_in(xml: &str, dir: &Path) -> Result<Rendered, PipelineError> {
    RendererBuilder::new().with_base_dir(dir).build()?.render_xml(xml)
}

/// Lay out an XML document and load the written PDF back
pub fn generate_pdf(xml: &str) -> Result<(Rendered, GeneratedPdf), Box<dyn std::error::Error>> {
    let rendered = render_xml(xml)?;
    let pdf = GeneratedPdf::from_bytes(rendered.to_pdf_bytes()?)?;
    Ok((rendered, pdf))
}
