//! Page composition for folio.
//!
//! The [`Surface`] is the output engine the renderers draw on: it keeps a
//! cursor inside the margin box of the current page, wraps styled text into
//! lines, places images, breaks pages automatically, and hands every finished
//! page to a decoration callback. Its output is a list of [`Page`]s of
//! absolutely positioned items, ready for a PDF backend.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Font family '{0}' is not registered")]
    UnknownFont(String),
    #[error("Failed to read font '{family}' from {path}: {source}")]
    FontIo {
        family: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid font data for '{family}': {message}")]
    FontParse { family: String, message: String },
    #[error("Failed to load image {path}: {message}")]
    Image { path: PathBuf, message: String },
}

pub mod fonts;
pub mod page;
pub mod surface;
pub mod text;
pub mod win_ansi;

pub use fonts::{FaceDescriptor, FaceSource, FontBook, FontFace, FontId};
pub use page::{ImageItem, Page, PageItem, RuleItem, TextItem};
pub use surface::{FontSelection, PageCanvas, Surface};
pub use text::StyledFragment;

pub use folio_style::{TextAlign, TextStyle};
