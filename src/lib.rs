//! folio renders DocBook-style document trees into paginated PDF.
//!
//! The document tree is walked depth-first through per-parent renderer
//! registries. Block renderers lay content out on a [`folio_layout::Surface`]
//! and record where chapter and section titles landed in the
//! [`RenderState`]. Once the walk is finished, every page is decorated with a
//! running footer resolved from that ledger, and the pages are written out
//! with `folio-render-lopdf`.
//!
//! ```ignore
//! use folio::RendererBuilder;
//!
//! let renderer = RendererBuilder::new()
//!     .with_config_file("folio.json")?
//!     .build()?;
//! let diagnostics = renderer.render_file("manual.xml", "manual.pdf")?;
//! ```

pub mod blocks;
pub mod decorate;
pub mod dispatch;
pub mod error;
pub mod inline;
pub mod ledger;
pub mod pipeline;

pub use decorate::RunningFooter;
pub use dispatch::{Diagnostic, Registry, Renderer, handle_children};
pub use error::{PipelineError, StructureError};
pub use ledger::{ChapterEntry, RenderState, SectionEntry};
pub use pipeline::{DocumentRenderer, RenderContext, Rendered, RendererBuilder};

pub use folio_dom::{Element, Node, parse_document, parse_file};
pub use folio_layout::StyledFragment;
pub use folio_style::RenderConfig;
