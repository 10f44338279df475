//! The four page arrangements.
//!
//! Every template maps to exactly one [`LayoutStrategy`]. A strategy owns the
//! header treatment, the column split and which column each section lands in;
//! the section bodies themselves are drawn by [`crate::layout::sections`].

use crate::layout::canvas::{Canvas, Flow, RenderMode};
use crate::layout::placeholder;
use crate::layout::scene::Element;
use crate::layout::sections::{
    heading, line_height, paragraph, pick_text, render_section, Align, RenderContext, Tone,
};
use crate::templates::{LayoutKind, Section, SectionSet};

/// Horizontal space between columns.
pub const GUTTER: f32 = 18.0;
const HEADER_GAP: f32 = 14.0;
const PHOTO_WIDTH: f32 = 110.0;
const PHOTO_HEIGHT: f32 = 130.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStrategy {
    SingleColumn,
    TwoColumn,
    Corporate,
    PhotoSidebar,
}

impl From<LayoutKind> for LayoutStrategy {
    fn from(kind: LayoutKind) -> Self {
        match kind {
            LayoutKind::SingleColumn => LayoutStrategy::SingleColumn,
            LayoutKind::TwoColumn => LayoutStrategy::TwoColumn,
            LayoutKind::Corporate => LayoutStrategy::Corporate,
            LayoutKind::PhotoSidebar => LayoutStrategy::PhotoSidebar,
        }
    }
}

impl LayoutStrategy {
    /// Share of the content width given to the left column.
    pub fn split(&self) -> Option<f32> {
        match self {
            LayoutStrategy::SingleColumn => None,
            LayoutStrategy::TwoColumn => Some(0.30),
            LayoutStrategy::Corporate => Some(0.35),
            LayoutStrategy::PhotoSidebar => Some(0.28),
        }
    }

    /// Section order of the (left, right) columns. Single column uses only the right.
    pub fn placement(&self) -> (&'static [Section], &'static [Section]) {
        use Section::*;
        match self {
            LayoutStrategy::SingleColumn => (
                &[],
                &[
                    Summary,
                    Experience,
                    Projects,
                    Education,
                    Skills,
                    Tools,
                    Languages,
                    Certifications,
                ],
            ),
            LayoutStrategy::TwoColumn => (
                &[Skills, Tools, Languages, Certifications],
                &[Summary, Experience, Projects, Education],
            ),
            LayoutStrategy::Corporate => (&[Education, Skills], &[Summary, Experience]),
            LayoutStrategy::PhotoSidebar => (
                &[Skills, Tools, Languages, Certifications],
                &[Summary, Experience, Education, Projects],
            ),
        }
    }

    /// Every section this strategy can place, restricted to `set`.
    #[cfg(test)]
    pub fn sections(&self, set: SectionSet) -> Vec<Section> {
        let (left, right) = self.placement();
        left.iter()
            .chain(right.iter())
            .copied()
            .filter(|s| set.contains(*s))
            .collect()
    }

    /// Lays the document out and returns the flows of every column used, plus
    /// the sections that were actually drawn.
    pub fn render(
        &self,
        ctx: &RenderContext<'_>,
        canvas: &mut Canvas,
        set: SectionSet,
    ) -> (Vec<Flow>, Vec<Section>) {
        let geometry = *canvas.geometry();
        let left = geometry.content_left();
        let width = geometry.content_width();
        let top = geometry.content_top();

        let (side, main) = match self.split() {
            None => (None, Flow::new(left, width, top)),
            Some(share) => {
                let side_width = width * share - GUTTER / 2.0;
                let main_x = left + side_width + GUTTER;
                (
                    Some(Flow::new(left, side_width, top)),
                    Flow::new(main_x, geometry.content_right() - main_x, top),
                )
            }
        };

        let (mut side, mut main) = match (self, side) {
            (LayoutStrategy::PhotoSidebar, Some(mut side)) => {
                sidebar_background(ctx, canvas, side.right() + GUTTER / 2.0);
                photo_block(ctx, canvas, &mut side);
                contact_block(ctx, canvas, &mut side);
                let mut main = main;
                name_block(ctx, canvas, &mut main, Align::Left);
                main.skip(HEADER_GAP);
                (Some(side), main)
            }
            (_, side) => {
                let header_bottom = self.header(ctx, canvas, left, width, top);
                let restart = |f: Flow| Flow::new(f.x, f.width, header_bottom);
                (side.map(restart), restart(main))
            }
        };

        let (left_sections, right_sections) = self.placement();
        let mut drawn = Vec::new();
        let mut run = |flow: &mut Flow, sections: &[Section], canvas: &mut Canvas| {
            for &section in sections.iter().filter(|s| set.contains(**s)) {
                if render_section(ctx, canvas, flow, section) {
                    drawn.push(section);
                }
            }
        };
        if let Some(side) = side.as_mut() {
            run(side, left_sections, canvas);
        }
        run(&mut main, right_sections, canvas);

        let mut flows: Vec<Flow> = side.into_iter().collect();
        flows.push(main);
        (flows, drawn)
    }

    /// Draws the full-width header and returns the y where columns begin.
    fn header(
        &self,
        ctx: &RenderContext<'_>,
        canvas: &mut Canvas,
        left: f32,
        width: f32,
        top: f32,
    ) -> f32 {
        let mut flow = Flow::new(left, width, top);
        match self {
            LayoutStrategy::SingleColumn => {
                name_block(ctx, canvas, &mut flow, Align::Center);
                contact_line(ctx, canvas, &mut flow, Align::Center);
                accent_rule(ctx, canvas, &flow);
            }
            LayoutStrategy::Corporate => {
                name_block(ctx, canvas, &mut flow, Align::Left);
                contact_line(ctx, canvas, &mut flow, Align::Left);
                let band_bottom = flow.cursor() + 8.0;
                let page_width = canvas.geometry().size.width_pt;
                canvas.underlay(
                    0,
                    Element::Fill {
                        x: 0.0,
                        y: 0.0,
                        width: page_width,
                        height: band_bottom,
                        color: ctx.palette.light,
                    },
                );
                flow.skip(8.0);
            }
            _ => {
                name_block(ctx, canvas, &mut flow, Align::Left);
                contact_line(ctx, canvas, &mut flow, Align::Left);
                accent_rule(ctx, canvas, &flow);
            }
        }
        flow.cursor() + HEADER_GAP
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header pieces
// ────────────────────────────────────────────────────────────────────────────

fn name_block(ctx: &RenderContext<'_>, canvas: &mut Canvas, flow: &mut Flow, align: Align) {
    let mode = canvas.mode();
    let info = &ctx.doc.personal_info;
    if let Some((name, tone)) = pick_text(&info.full_name, mode, placeholder::NAME) {
        paragraph(ctx, canvas, flow, name, ctx.toned(ctx.name(), tone), align);
    }
    if let Some((title, tone)) = pick_text(&info.title, mode, placeholder::TITLE) {
        paragraph(ctx, canvas, flow, title, ctx.toned(ctx.title(), tone), align);
    }
    flow.skip(4.0);
}

/// Returns the contact items and their tone; samples only in preview.
fn contacts<'d>(ctx: &RenderContext<'d>, mode: RenderMode) -> (Vec<&'d str>, Tone) {
    let items = ctx.doc.personal_info.contact_items();
    if items.is_empty() && mode == RenderMode::Preview {
        (placeholder::CONTACT.to_vec(), Tone::Sample)
    } else {
        (items, Tone::Real)
    }
}

fn contact_line(ctx: &RenderContext<'_>, canvas: &mut Canvas, flow: &mut Flow, align: Align) {
    let (items, tone) = contacts(ctx, canvas.mode());
    if items.is_empty() {
        return;
    }
    let text = items.join("  |  ");
    paragraph(ctx, canvas, flow, &text, ctx.toned(ctx.meta(), tone), align);
}

fn accent_rule(ctx: &RenderContext<'_>, canvas: &mut Canvas, flow: &Flow) {
    canvas.draw(
        0,
        Element::Rule {
            x1: flow.x,
            x2: flow.right(),
            y: flow.cursor() + 4.0,
            thickness: 1.5,
            color: ctx.style.accent,
        },
    );
}

fn sidebar_background(ctx: &RenderContext<'_>, canvas: &mut Canvas, right_edge: f32) {
    let height = canvas.geometry().size.height_pt;
    canvas.add_chrome(Element::Fill {
        x: 0.0,
        y: 0.0,
        width: right_edge,
        height,
        color: ctx.palette.light,
    });
}

fn photo_block(ctx: &RenderContext<'_>, canvas: &mut Canvas, flow: &mut Flow) {
    let has_photo = ctx.doc.personal_info.photo.is_some();
    let width = PHOTO_WIDTH.min(flow.width);
    let height = PHOTO_HEIGHT * width / PHOTO_WIDTH;
    let x = flow.x + (flow.width - width) / 2.0;
    let Some(slot) = flow.reserve(canvas, height) else {
        return;
    };
    if has_photo {
        canvas.draw(
            slot.page,
            Element::Photo {
                x,
                y: slot.y,
                width,
                height,
            },
        );
    } else {
        canvas.draw(
            slot.page,
            Element::Frame {
                x,
                y: slot.y,
                width,
                height,
                color: ctx.palette.muted,
            },
        );
        if canvas.mode() == RenderMode::Preview {
            let label = "Photo";
            let ts = ctx.toned(ctx.meta(), Tone::Sample);
            let label_x = x + (width - ctx.measure(label, ts)) / 2.0;
            canvas.draw(
                slot.page,
                Element::Text {
                    x: label_x,
                    y: slot.y + height / 2.0 + ts.size / 2.0,
                    content: label.to_string(),
                    size: ts.size,
                    weight: ts.weight,
                    italic: ts.italic,
                    color: ts.color,
                },
            );
        }
    }
    flow.skip(HEADER_GAP);
}

fn contact_block(ctx: &RenderContext<'_>, canvas: &mut Canvas, flow: &mut Flow) {
    let (items, tone) = contacts(ctx, canvas.mode());
    if items.is_empty() {
        return;
    }
    heading(ctx, canvas, flow, "Contact");
    let ts = ctx.toned(ctx.meta(), tone);
    for item in items {
        paragraph(ctx, canvas, flow, item, ts, Align::Left);
    }
    flow.skip(line_height(ts.size));
}
