use super::{NOTE, NOTE_INDENT, NOTE_LABEL, PARA_SPACING};
use crate::dispatch::handle_children;
use crate::error::PipelineError;
use crate::pipeline::RenderContext;
use folio_dom::Node;
use folio_layout::{StyledFragment, TextAlign, TextStyle};

pub(super) fn render_note(node: &Node, ctx: &mut RenderContext) -> Result<(), PipelineError> {
    let previous = ctx.surface.indent(NOTE_INDENT);
    let label = StyledFragment::plain(NOTE_LABEL).with_style(TextStyle::BOLD);
    ctx.surface.write(&[label], TextAlign::Left)?;
    handle_children(node, &NOTE, ctx)?;
    ctx.surface.set_left(previous);
    ctx.surface.ln(PARA_SPACING);
    Ok(())
}
