//! Page canvas and per-column vertical flow.
//!
//! A [`Flow`] hands out vertical slots in one column. In preview mode the page
//! is fixed: slots past the bottom margin are still measured (so overflow can be
//! reported) but nothing is drawn. In export mode the flow continues on a new
//! page at the top margin.

use crate::layout::font_metrics::PageSize;
use crate::layout::scene::{Document, Element, Page};
use crate::templates::Margins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Single fixed page, clipped, sample content for empty sections.
    Preview,
    /// Paginated, empty sections omitted.
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub size: PageSize,
    pub margins: Margins,
}

impl PageGeometry {
    pub fn content_left(&self) -> f32 {
        self.margins.left
    }

    pub fn content_right(&self) -> f32 {
        self.size.width_pt - self.margins.right
    }

    pub fn content_width(&self) -> f32 {
        self.content_right() - self.content_left()
    }

    pub fn content_top(&self) -> f32 {
        self.margins.top
    }

    pub fn content_bottom(&self) -> f32 {
        self.size.height_pt - self.margins.bottom
    }

    pub fn content_height(&self) -> f32 {
        self.content_bottom() - self.content_top()
    }
}

/// Accumulates pages for one layout run.
#[derive(Debug)]
pub struct Canvas {
    geometry: PageGeometry,
    mode: RenderMode,
    /// Drawn first on every page (sidebar backgrounds).
    chrome: Vec<Element>,
    pages: Vec<Vec<Element>>,
    clipped: usize,
}

impl Canvas {
    pub fn new(geometry: PageGeometry, mode: RenderMode) -> Self {
        Self {
            geometry,
            mode,
            chrome: Vec::new(),
            pages: vec![Vec::new()],
            clipped: 0,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Adds an element repeated on every page, including pages created later.
    pub fn add_chrome(&mut self, element: Element) {
        for page in &mut self.pages {
            page.push(element.clone());
        }
        self.chrome.push(element);
    }

    pub fn draw(&mut self, page: usize, element: Element) {
        while self.pages.len() <= page {
            self.pages.push(self.chrome.clone());
        }
        self.pages[page].push(element);
    }

    /// Draws `element` beneath everything already on `page` except the chrome.
    pub fn underlay(&mut self, page: usize, element: Element) {
        self.draw(page, element);
        let page = &mut self.pages[page];
        if let Some(element) = page.pop() {
            page.insert(self.chrome.len().min(page.len()), element);
        }
    }

    /// Number of slots that fell off the page in preview mode.
    pub fn clipped(&self) -> usize {
        self.clipped
    }

    pub fn finish(self) -> Document {
        let size = self.geometry.size;
        Document {
            pages: self
                .pages
                .into_iter()
                .map(|elements| Page { size, elements })
                .collect(),
        }
    }
}

/// Where a reserved slot landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub page: usize,
    pub y: f32,
}

/// Vertical cursor for one column.
#[derive(Debug, Clone)]
pub struct Flow {
    pub x: f32,
    pub width: f32,
    y: f32,
    page: usize,
}

impl Flow {
    pub fn new(x: f32, width: f32, start: f32) -> Self {
        Self {
            x,
            width,
            y: start,
            page: 0,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Reserves `height` points. Returns `None` when the slot is clipped.
    pub fn reserve(&mut self, canvas: &mut Canvas, height: f32) -> Option<Slot> {
        let bottom = canvas.geometry.content_bottom();
        let top = canvas.geometry.content_top();
        if self.y + height > bottom {
            match canvas.mode {
                RenderMode::Preview => {
                    self.y += height;
                    canvas.clipped += 1;
                    return None;
                }
                RenderMode::Export => {
                    if self.y > top {
                        self.page += 1;
                        self.y = top;
                    }
                }
            }
        }
        let slot = Slot {
            page: self.page,
            y: self.y,
        };
        self.y += height;
        Some(slot)
    }

    /// Adds vertical space without drawing. Never starts a new page.
    pub fn skip(&mut self, height: f32) {
        self.y += height;
    }

    /// Height consumed measured from the top margin of the first page, as if the
    /// column were one continuous strip.
    pub fn used_height(&self, geometry: &PageGeometry) -> f32 {
        let pages_before = self.page as f32 * geometry.content_height();
        pages_before + self.y - geometry.content_top()
    }

    /// Current y on the current page.
    pub fn cursor(&self) -> f32 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::US_LETTER;
    use crate::models::style::Rgb;

    fn geometry() -> PageGeometry {
        PageGeometry {
            size: US_LETTER,
            margins: Margins::uniform(36.0),
        }
    }

    #[test]
    fn test_preview_clips_past_bottom() {
        let mut canvas = Canvas::new(geometry(), RenderMode::Preview);
        let mut flow = Flow::new(36.0, 200.0, 36.0);
        // 720pt of content height
        assert!(flow.reserve(&mut canvas, 700.0).is_some());
        assert!(flow.reserve(&mut canvas, 30.0).is_none());
        assert_eq!(canvas.clipped(), 1);
        assert!((flow.used_height(canvas.geometry()) - 730.0).abs() < 1e-3);
        assert_eq!(canvas.finish().pages.len(), 1);
    }

    #[test]
    fn test_export_continues_on_next_page() {
        let mut canvas = Canvas::new(geometry(), RenderMode::Export);
        let mut flow = Flow::new(36.0, 200.0, 100.0);
        assert_eq!(flow.reserve(&mut canvas, 600.0), Some(Slot { page: 0, y: 100.0 }));
        assert_eq!(flow.reserve(&mut canvas, 60.0), Some(Slot { page: 1, y: 36.0 }));
        assert_eq!(canvas.clipped(), 0);
    }

    #[test]
    fn test_chrome_repeats_on_new_pages() {
        let mut canvas = Canvas::new(geometry(), RenderMode::Export);
        let bg = Element::Fill {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 792.0,
            color: Rgb::new(1, 2, 3),
        };
        canvas.add_chrome(bg.clone());
        canvas.draw(
            2,
            Element::Bullet {
                cx: 1.0,
                cy: 1.0,
                radius: 1.0,
                color: Rgb::WHITE,
            },
        );
        let doc = canvas.finish();
        assert_eq!(doc.pages.len(), 3);
        for page in &doc.pages {
            assert_eq!(page.elements[0], bg);
        }
    }
}
