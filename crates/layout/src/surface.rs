//! The output surface: a cursor over a growing list of pages.

use crate::LayoutError;
use crate::fonts::FontBook;
use crate::page::{ImageItem, Page, PageItem, RuleItem, TextItem};
use crate::text::{ResolvedRun, StyledFragment, break_lines};
use folio_style::{PageSetup, TextAlign, TextDefaults, TextStyle};
use std::path::Path;

/// Baseline position as a fraction of the font size below the top of the glyph box.
const ASCENT_RATIO: f32 = 0.8;

/// The face new text is set in unless a fragment overrides it.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSelection {
    pub family: String,
    pub style: TextStyle,
    pub size: f32,
}

impl FontSelection {
    pub fn new(family: impl Into<String>, style: TextStyle, size: f32) -> Self {
        Self {
            family: family.into(),
            style,
            size,
        }
    }
}

pub struct Surface {
    fonts: FontBook,
    setup: PageSetup,
    leading: f32,
    pages: Vec<Page>,
    left: f32,
    y: f32,
    font: FontSelection,
}

impl Surface {
    /// Creates an empty surface. Fails if the default family is not in `fonts`.
    pub fn new(fonts: FontBook, setup: PageSetup, defaults: &TextDefaults) -> Result<Self, LayoutError> {
        let font = FontSelection::new(defaults.font.clone(), TextStyle::PLAIN, defaults.font_size);
        fonts.resolve(&font.family, font.style)?;
        Ok(Self {
            left: setup.margins.left,
            y: setup.margins.top,
            fonts,
            setup,
            leading: defaults.leading,
            pages: Vec::new(),
            font,
        })
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    pub fn setup(&self) -> &PageSetup {
        &self.setup
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_parts(self) -> (Vec<Page>, FontBook) {
        (self.pages, self.fonts)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of the page currently receiving content, 0 before the first page.
    pub fn page_no(&self) -> usize {
        self.pages.len()
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_left(&mut self, x: f32) {
        self.left = x;
    }

    /// Moves the left edge of the content box right by `by`, returning the previous edge.
    pub fn indent(&mut self, by: f32) -> f32 {
        let previous = self.left;
        self.left += by;
        previous
    }

    fn right(&self) -> f32 {
        self.setup.width() - self.setup.margins.right
    }

    fn bottom(&self) -> f32 {
        self.setup.height() - self.setup.margins.bottom
    }

    /// Width between the current left edge and the right margin.
    pub fn content_width(&self) -> f32 {
        (self.right() - self.left).max(0.0)
    }

    pub fn font(&self) -> &FontSelection {
        &self.font
    }

    /// Switches the current face, returning the previous selection.
    pub fn set_font(&mut self, font: FontSelection) -> Result<FontSelection, LayoutError> {
        self.fonts.resolve(&font.family, font.style)?;
        Ok(std::mem::replace(&mut self.font, font))
    }

    pub fn line_height(&self, size: f32) -> f32 {
        size * self.leading
    }

    /// Finishes the current page and starts a new one with the cursor at the top margin.
    pub fn add_page(&mut self) {
        let number = self.pages.len() + 1;
        log::debug!("Starting page {}", number);
        self.pages
            .push(Page::new(number, self.setup.width(), self.setup.height()));
        self.y = self.setup.margins.top;
    }

    fn ensure_page(&mut self) {
        if self.pages.is_empty() {
            self.add_page();
        }
    }

    /// Breaks the page if `height` would cross the bottom margin, unless the
    /// cursor is already at the top.
    fn reserve(&mut self, height: f32) {
        self.ensure_page();
        if self.y + height > self.bottom() && self.y > self.setup.margins.top {
            self.add_page();
        }
    }

    fn push(&mut self, item: PageItem) {
        self.ensure_page();
        if let Some(page) = self.pages.last_mut() {
            page.items.push(item);
        }
    }

    /// Moves the cursor down by `height`.
    pub fn ln(&mut self, height: f32) {
        self.ensure_page();
        self.y += height;
    }

    /// Paints a sequence of styled fragments as one flowing block of text.
    ///
    /// Lines wrap to the content width and are placed at the left edge or
    /// flush against the right margin. Each line advances the cursor by its
    /// largest font size times the leading, breaking pages as needed.
    pub fn write(&mut self, fragments: &[StyledFragment], align: TextAlign) -> Result<(), LayoutError> {
        let mut runs = Vec::with_capacity(fragments.len());
        for frag in fragments {
            let family = frag.font.as_deref().unwrap_or(&self.font.family);
            let style = self.font.style.union(frag.style);
            runs.push(ResolvedRun {
                text: &frag.text,
                font: self.fonts.resolve(family, style)?,
                size: frag.size.unwrap_or(self.font.size),
                link: frag.link.as_deref(),
            });
        }

        let lines = break_lines(&runs, &self.fonts, self.content_width());
        drop(runs);

        for line in lines {
            let line_height = self.line_height(line.size);
            self.reserve(line_height);
            let origin = match align {
                TextAlign::Left => self.left,
                TextAlign::Right => self.right() - line.width,
            };
            let baseline = self.y + (line_height - line.size) / 2.0 + line.size * ASCENT_RATIO;
            for seg in line.segments {
                self.push(PageItem::Text(TextItem {
                    x: origin + seg.x,
                    y: baseline,
                    width: seg.width,
                    font: seg.font,
                    size: seg.size,
                    text: seg.text,
                    link: seg.link,
                }));
            }
            self.y += line_height;
        }
        Ok(())
    }

    /// Places an image at the cursor, scaled to `width` (capped at the content
    /// width) and shrunk to fit the content height. Returns the placed size.
    pub fn image(&mut self, path: &Path, width: f32) -> Result<(f32, f32), LayoutError> {
        let (px_w, px_h) = image::image_dimensions(path).map_err(|e| LayoutError::Image {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut w = width.min(self.content_width());
        let mut h = w * px_h as f32 / px_w.max(1) as f32;
        let max_h = self.setup.content_height();
        if h > max_h {
            w *= max_h / h;
            h = max_h;
        }
        self.reserve(h);
        let x = self.left;
        let y = self.y;
        self.push(PageItem::Image(ImageItem {
            x,
            y,
            width: w,
            height: h,
            path: path.to_path_buf(),
        }));
        self.y += h;
        Ok((w, h))
    }

    /// Runs `decorate` once for every page, in page order, with a canvas for that page.
    pub fn decorate<F>(&mut self, mut decorate: F) -> Result<(), LayoutError>
    where
        F: FnMut(usize, &mut PageCanvas<'_>) -> Result<(), LayoutError>,
    {
        for page in &mut self.pages {
            let number = page.number;
            let mut canvas = PageCanvas {
                page,
                fonts: &self.fonts,
                setup: &self.setup,
            };
            decorate(number, &mut canvas)?;
        }
        Ok(())
    }
}

/// Drawing access to a single finished page, positioned against the page margins.
pub struct PageCanvas<'a> {
    page: &'a mut Page,
    fonts: &'a FontBook,
    setup: &'a PageSetup,
}

impl PageCanvas<'_> {
    pub fn setup(&self) -> &PageSetup {
        self.setup
    }

    /// Paints a single unwrapped line with its baseline at `y`.
    pub fn text(&mut self, y: f32, text: &str, align: TextAlign, font: &FontSelection) -> Result<(), LayoutError> {
        let id = self.fonts.resolve(&font.family, font.style)?;
        let width = self.fonts.face(id).measure(text, font.size);
        let x = match align {
            TextAlign::Left => self.setup.margins.left,
            TextAlign::Right => self.setup.width() - self.setup.margins.right - width,
        };
        self.page.items.push(PageItem::Text(TextItem {
            x,
            y,
            width,
            font: id,
            size: font.size,
            text: text.to_string(),
            link: None,
        }));
        Ok(())
    }

    /// A horizontal rule across the content width.
    pub fn rule(&mut self, y: f32, thickness: f32) {
        self.page.items.push(PageItem::Rule(RuleItem {
            x1: self.setup.margins.left,
            y1: y,
            x2: self.setup.width() - self.setup.margins.right,
            y2: y,
            thickness,
        }));
    }
}
