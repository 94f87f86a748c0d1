use super::{CHAPTER, CHAPTER_TITLE_SIZE, CHAPTER_TITLE_SPACING, title_text, write_title};
use crate::dispatch::handle_children;
use crate::error::PipelineError;
use crate::pipeline::RenderContext;
use folio_dom::Node;
use folio_layout::{StyledFragment, TextAlign, TextStyle};

pub(super) fn render_chapter(node: &Node, ctx: &mut RenderContext) -> Result<(), PipelineError> {
    ctx.surface.add_page();
    handle_children(node, &CHAPTER, ctx)?;
    Ok(())
}

/// Paints the title flush right at the top of the page and records the chapter.
pub(super) fn render_chapter_title(node: &Node, ctx: &mut RenderContext) -> Result<(), PipelineError> {
    let title = title_text(node, "chapter/title")?;
    let fragment = StyledFragment::plain(title.clone())
        .with_style(TextStyle::BOLD)
        .with_font(ctx.surface.font().family.clone(), CHAPTER_TITLE_SIZE);

    let (page, y) = write_title(ctx, fragment, TextAlign::Right)?;
    let ordinal = ctx.state.record_chapter(page, title, y);
    log::info!("Chapter {} on page {}", ordinal, page);
    ctx.surface.ln(CHAPTER_TITLE_SPACING);
    Ok(())
}
