//! Document rendering pipeline.
//!
//! - [`RendererBuilder`]: loads the configuration and fonts
//! - [`DocumentRenderer`]: walks a document tree, decorates pages and writes the PDF
//! - [`RenderContext`]: the mutable state threaded through every renderer

mod builder;
mod context;
mod orchestrator;

pub use builder::RendererBuilder;
pub use context::RenderContext;
pub use orchestrator::{DocumentRenderer, Rendered};

#[cfg(test)]
pub(crate) use context::test_context;
