use super::{LISTING_INDENT, PARA_SPACING};
use crate::error::PipelineError;
use crate::inline::{PREFORMATTED, compose};
use crate::pipeline::RenderContext;
use folio_dom::Node;
use folio_layout::{FontSelection, TextAlign, TextStyle};

/// `programlisting` and `screen`: preformatted text in the monospace face.
pub(super) fn render_listing(node: &Node, ctx: &mut RenderContext) -> Result<(), PipelineError> {
    let previous_left = ctx.surface.indent(LISTING_INDENT);
    let mono = FontSelection::new(
        ctx.monospace.font.clone(),
        TextStyle::PLAIN,
        ctx.monospace.font_size,
    );
    let previous_font = ctx.surface.set_font(mono)?;

    let fragments = compose(node, &PREFORMATTED, ctx)?;
    ctx.surface.write(&fragments, TextAlign::Left)?;

    ctx.surface.set_font(previous_font)?;
    ctx.surface.set_left(previous_left);
    ctx.surface.ln(PARA_SPACING);
    Ok(())
}
