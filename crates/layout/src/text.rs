//! Styled text runs and line breaking.

use crate::fonts::{FontBook, FontId};
use folio_style::TextStyle;

/// One styled run of text destined for a single formatted-text paint operation.
///
/// `font` and `size` override the surface's current face when set; `style`
/// is added to the current style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledFragment {
    pub text: String,
    pub style: TextStyle,
    pub font: Option<String>,
    pub size: Option<f32>,
    pub link: Option<String>,
}

impl StyledFragment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.font = Some(family.into());
        self.size = Some(size);
        self
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }
}

/// A fragment with its face resolved, ready for measuring.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedRun<'a> {
    pub text: &'a str,
    pub font: FontId,
    pub size: f32,
    pub link: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LineSegment {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub link: Option<String>,
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct Line {
    pub segments: Vec<LineSegment>,
    pub width: f32,
    /// Largest font size on the line.
    pub size: f32,
}

impl Line {
    fn push(&mut self, fonts: &FontBook, run: &ResolvedRun<'_>, word: &str) {
        let width = fonts.face(run.font).measure(word, run.size);
        self.size = self.size.max(run.size);
        match self.segments.last_mut() {
            Some(seg)
                if seg.font == run.font && seg.size == run.size && seg.link.as_deref() == run.link =>
            {
                seg.text.push_str(word);
                seg.width += width;
            }
            _ => self.segments.push(LineSegment {
                text: word.to_string(),
                font: run.font,
                size: run.size,
                link: run.link.map(str::to_string),
                x: self.width,
                width,
            }),
        }
        self.width += width;
    }

    /// Drops trailing breakable spaces so right alignment lands on the last glyph.
    fn finish(mut self, fonts: &FontBook) -> Line {
        while let Some(seg) = self.segments.last_mut() {
            let keep = seg.text.trim_end_matches(' ').len();
            if keep == seg.text.len() {
                break;
            }
            if keep == 0 {
                self.segments.pop();
                continue;
            }
            seg.text.truncate(keep);
            seg.width = fonts.face(seg.font).measure(&seg.text, seg.size);
            break;
        }
        self.width = self.segments.last().map(|s| s.x + s.width).unwrap_or(0.0);
        self
    }
}

/// Breaks runs into lines no wider than `max_width`.
///
/// Lines wrap only after a regular space; a non-breaking space binds the
/// words around it, and so does a run boundary with no space at it. A `\n`
/// inside a run forces a break. A single word wider than the line is placed
/// alone and allowed to overflow.
pub(crate) fn break_lines(runs: &[ResolvedRun<'_>], fonts: &FontBook, max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::default();
    // Pieces of the word being built, possibly spanning several runs.
    let mut word = Vec::new();

    for run in runs {
        for (i, piece) in run.text.split('\n').enumerate() {
            if i > 0 {
                place_word(&mut word, &mut line, &mut lines, fonts, max_width);
                let mut done = std::mem::take(&mut line).finish(fonts);
                done.size = done.size.max(run.size);
                lines.push(done);
            }
            for part in piece.split_inclusive(' ') {
                word.push((run, part));
                if part.ends_with(' ') {
                    place_word(&mut word, &mut line, &mut lines, fonts, max_width);
                }
            }
        }
    }
    place_word(&mut word, &mut line, &mut lines, fonts, max_width);
    if !line.segments.is_empty() {
        lines.push(line.finish(fonts));
    }
    lines
}

/// Appends a complete word to `line`, starting a new line first if it does
/// not fit. Only the last piece of a word can end in spaces.
fn place_word(
    word: &mut Vec<(&ResolvedRun<'_>, &str)>,
    line: &mut Line,
    lines: &mut Vec<Line>,
    fonts: &FontBook,
    max_width: f32,
) {
    if word.is_empty() {
        return;
    }
    let is_space = word.iter().all(|(_, text)| text.trim_end_matches(' ').is_empty());
    if is_space && line.segments.is_empty() {
        word.clear();
        return;
    }
    let last = word.len() - 1;
    let visible: f32 = word
        .iter()
        .enumerate()
        .map(|(i, (run, text))| {
            let text: &str = if i == last { text.trim_end_matches(' ') } else { text };
            fonts.face(run.font).measure(text, run.size)
        })
        .sum();
    if !line.segments.is_empty() && line.width + visible > max_width {
        lines.push(std::mem::take(line).finish(fonts));
        if is_space {
            word.clear();
            return;
        }
    }
    for (run, text) in word.drain(..) {
        line.push(fonts, run, text);
    }
}
