use super::{BOOK, title_text};
use crate::decorate::RunningFooter;
use crate::dispatch::handle_children;
use crate::error::PipelineError;
use crate::pipeline::RenderContext;
use folio_dom::Node;

/// Installs the running footer and renders the book's chapters and sections.
pub(super) fn render_book(node: &Node, ctx: &mut RenderContext) -> Result<(), PipelineError> {
    let family = ctx.surface.font().family.clone();
    ctx.decorator = Some(RunningFooter::new(family));
    handle_children(node, &BOOK, ctx)?;
    Ok(())
}

/// The book title only feeds the document metadata.
pub(super) fn render_book_title(node: &Node, ctx: &mut RenderContext) -> Result<(), PipelineError> {
    let title = title_text(node, "book/title")?;
    if ctx.title.is_none() {
        ctx.title = Some(title);
    }
    Ok(())
}
