//! The render-state ledger: which chapter and section titles started on which page.
//!
//! Title renderers append entries during the walk. Because the walk runs
//! in document order and pagination only moves forward, both sequences are
//! ordered by page, and the entry active on a page is the last one that
//! started on or before it.

#[derive(Debug, Clone, PartialEq)]
pub struct ChapterEntry {
    pub page: usize,
    pub title: String,
    /// 1-based position of the chapter in the document.
    pub ordinal: usize,
    /// Cursor position of the title on its page, measured from the top edge.
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionEntry {
    pub page: usize,
    pub title: String,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderState {
    chapters: Vec<ChapterEntry>,
    sections: Vec<SectionEntry>,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chapter and returns its ordinal.
    pub fn record_chapter(&mut self, page: usize, title: impl Into<String>, y: f32) -> usize {
        debug_assert!(self.chapters.last().is_none_or(|c| c.page <= page));
        let ordinal = self.chapters.len() + 1;
        let title = title.into();
        log::debug!("Chapter {} '{}' starts on page {}", ordinal, title, page);
        self.chapters.push(ChapterEntry {
            page,
            title,
            ordinal,
            y,
        });
        ordinal
    }

    /// Appends a section or subsection title.
    pub fn record_section(&mut self, page: usize, title: impl Into<String>, y: f32) {
        debug_assert!(self.sections.last().is_none_or(|s| s.page <= page));
        let title = title.into();
        log::debug!("Section '{}' starts on page {}", title, page);
        self.sections.push(SectionEntry { page, title, y });
    }

    pub fn chapters(&self) -> &[ChapterEntry] {
        &self.chapters
    }

    pub fn sections(&self) -> &[SectionEntry] {
        &self.sections
    }

    /// The chapter active on `page`: the latest one starting on or before it.
    pub fn chapter_at(&self, page: usize) -> Option<&ChapterEntry> {
        self.chapters.iter().rev().find(|c| c.page <= page)
    }

    /// The section active on `page`, regardless of nesting depth.
    pub fn section_at(&self, page: usize) -> Option<&SectionEntry> {
        self.sections.iter().rev().find(|s| s.page <= page)
    }
}
