//! Running footers painted on every page once layout is complete.

use crate::ledger::{ChapterEntry, RenderState, SectionEntry};
use folio_layout::{FontSelection, LayoutError, PageCanvas, TextAlign, TextStyle};

pub const FOOTER_FONT_SIZE: f32 = 9.0;
pub const RULE_THICKNESS: f32 = 0.5;
/// Distance of the rule below the bottom margin.
pub const RULE_OFFSET: f32 = 8.0;
/// Distance between the rule and the top of the footer text.
pub const TEXT_GAP: f32 = 4.0;

/// Paints a rule and the active chapter or section on each page.
///
/// Even pages show `"{page} | Chapter {ordinal}: {chapter}"` flush left, odd
/// pages show `"{section} | {page}"` flush right. A page with no active
/// chapter or no active section is left blank: neither the rule nor the
/// text is painted.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningFooter {
    family: String,
    size: f32,
}

impl RunningFooter {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            size: FOOTER_FONT_SIZE,
        }
    }

    /// Decorates page `page`. Only reads the ledger.
    pub fn decorate(
        &self,
        page: usize,
        state: &RenderState,
        canvas: &mut PageCanvas<'_>,
    ) -> Result<(), LayoutError> {
        let (Some(chapter), Some(section)) = (state.chapter_at(page), state.section_at(page)) else {
            log::debug!("No chapter or section active on page {}, leaving it undecorated", page);
            return Ok(());
        };
        let (text, align) = footer_line(page, chapter, section);

        let setup = canvas.setup();
        let rule_y = setup.height() - setup.margins.bottom + RULE_OFFSET;
        let baseline = rule_y + TEXT_GAP + self.size * 0.8;
        canvas.rule(rule_y, RULE_THICKNESS);
        let font = FontSelection::new(self.family.clone(), TextStyle::PLAIN, self.size);
        canvas.text(baseline, &text, align, &font)
    }
}

/// The footer text and its alignment for `page`.
pub fn footer_line(page: usize, chapter: &ChapterEntry, section: &SectionEntry) -> (String, TextAlign) {
    if page % 2 == 0 {
        (
            format!("{} | Chapter {}: {}", page, chapter.ordinal, chapter.title),
            TextAlign::Left,
        )
    } else {
        (format!("{} | {}", section.title, page), TextAlign::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_layout::{FontBook, Surface};
    use folio_style::{PageSetup, TextDefaults};

    fn entries() -> (ChapterEntry, SectionEntry) {
        (
            ChapterEntry { page: 1, title: "Intro".into(), ordinal: 1, y: 56.7 },
            SectionEntry { page: 1, title: "Overview".into(), y: 100.0 },
        )
    }

    #[test]
    fn parity_law() {
        let (chapter, section) = entries();
        for page in 1..=12 {
            let (line, align) = footer_line(page, &chapter, &section);
            if page % 2 == 0 {
                assert_eq!(align, TextAlign::Left);
                assert!(line.starts_with(&page.to_string()), "{}", line);
            } else {
                assert_eq!(align, TextAlign::Right);
                assert!(line.ends_with(&page.to_string()), "{}", line);
            }
        }
        assert_eq!(footer_line(2, &chapter, &section).0, "2 | Chapter 1: Intro");
        assert_eq!(footer_line(3, &chapter, &section).0, "Overview | 3");
    }

    fn decorated(state: &RenderState, pages: usize) -> Surface {
        let mut surface =
            Surface::new(FontBook::new(), PageSetup::default(), &TextDefaults::default()).unwrap();
        for _ in 0..pages {
            surface.add_page();
        }
        let footer = RunningFooter::new("Helvetica");
        surface.decorate(|n, canvas| footer.decorate(n, state, canvas)).unwrap();
        surface
    }

    #[test]
    fn pages_without_a_chapter_stay_blank() {
        let mut state = RenderState::new();
        state.record_section(1, "Preface", 56.7);
        state.record_chapter(2, "Intro", 56.7);

        let surface = decorated(&state, 2);
        assert!(surface.pages()[0].items.is_empty());
        let second = &surface.pages()[1];
        assert_eq!(second.rules().count(), 1);
        assert_eq!(second.texts().next().unwrap().text, "2 | Chapter 1: Intro");
    }

    #[test]
    fn pages_without_a_section_stay_blank() {
        let mut state = RenderState::new();
        state.record_chapter(1, "Intro", 56.7);
        let surface = decorated(&state, 1);
        assert!(surface.pages()[0].items.is_empty());
    }

    #[test]
    fn footer_sits_below_the_bottom_margin() {
        let mut state = RenderState::new();
        state.record_chapter(1, "Intro", 56.7);
        state.record_section(1, "Overview", 100.0);
        let surface = decorated(&state, 1);
        let page = &surface.pages()[0];
        let setup = PageSetup::default();
        let text = page.texts().next().unwrap();
        assert_eq!(text.text, "Overview | 1");
        assert_eq!(text.size, FOOTER_FONT_SIZE);
        assert!(text.y > setup.height() - setup.margins.bottom);
        assert!(text.y < setup.height());
        let right = setup.width() - setup.margins.right;
        assert!((text.x + text.width - right).abs() < 1e-3);
    }
}
