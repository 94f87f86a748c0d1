use super::PARA_SPACING;
use crate::error::PipelineError;
use crate::inline::{INLINE, compose};
use crate::pipeline::RenderContext;
use folio_dom::Node;
use folio_layout::TextAlign;

/// `simpara` and `para`: one block of body text.
pub(super) fn render_para(node: &Node, ctx: &mut RenderContext) -> Result<(), PipelineError> {
    let fragments = compose(node, &INLINE, ctx)?;
    ctx.surface.write(&fragments, TextAlign::Left)?;
    ctx.surface.ln(PARA_SPACING);
    Ok(())
}
