use super::{FIGURE_LABEL, PARA_SPACING, TITLE_SPACING, title_text};
use crate::error::{PipelineError, StructureError};
use crate::pipeline::RenderContext;
use folio_dom::Node;
use folio_layout::{StyledFragment, TextAlign, TextStyle};

const IMAGE_PATH: [&str; 3] = ["mediaobject", "imageobject", "imagedata"];

/// An image scaled to the available width, followed by its caption.
pub(super) fn render_figure(node: &Node, ctx: &mut RenderContext) -> Result<(), PipelineError> {
    let title = node.child("title").ok_or(StructureError::MissingChild {
        element: "figure",
        child: "title",
    })?;
    let caption = title_text(title, "figure/title")?;
    let imagedata = node.descend(&IMAGE_PATH).ok_or(StructureError::MissingChild {
        element: "figure",
        child: "mediaobject/imageobject/imagedata",
    })?;
    let fileref = imagedata
        .attribute("fileref")
        .ok_or(StructureError::MissingAttribute {
            element: "imagedata",
            attribute: "fileref",
        })?;

    let path = ctx.base_dir.join(fileref);
    let width = ctx.surface.content_width();
    ctx.surface.image(&path, width)?;
    ctx.surface.ln(TITLE_SPACING);

    let line = [
        StyledFragment::plain(format!("{} ", FIGURE_LABEL)).with_style(TextStyle::BOLD),
        StyledFragment::plain(caption).with_style(TextStyle::ITALIC),
    ];
    ctx.surface.write(&line, TextAlign::Left)?;
    ctx.surface.ln(PARA_SPACING);
    Ok(())
}
