//! PDF output for folio using lopdf.
//!
//! Takes the pages produced by `folio-layout` and serializes them into a
//! single PDF document: standard and embedded TrueType fonts, image XObjects,
//! compressed content streams, URI link annotations, a bookmark outline and
//! the document information dictionary.

mod error;
mod helpers;
mod writer;

pub use error::RenderError;
pub use helpers::OutlineEntry;
pub use writer::{DocumentInfo, PdfWriter};
