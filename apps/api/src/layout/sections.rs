//! Section rendering shared by every layout strategy.
//!
//! A strategy decides which column a section goes in; the functions here decide
//! what the section looks like inside that column.

use std::borrow::Cow;

use crate::layout::canvas::{Canvas, Flow, RenderMode};
use crate::layout::font_metrics::{get_metrics, FontFamily, FontMetricTable, Weight};
use crate::layout::placeholder;
use crate::layout::scene::Element;
use crate::layout::text::{bullet_lines, date_range, join_present, wrap_text};
use crate::models::resume::{
    Certification, Education, Experience, Language, Project, ResumeDocument, Skill,
};
use crate::models::style::{Palette, Rgb, StyleSelection};
use crate::templates::Section;

pub const NAME_SIZE: f32 = 22.0;
pub const TITLE_SIZE: f32 = 12.0;
pub const HEADING_SIZE: f32 = 10.5;
pub const ENTRY_TITLE_SIZE: f32 = 10.0;
pub const BODY_SIZE: f32 = 9.0;
pub const META_SIZE: f32 = 8.5;

const LINE_FACTOR: f32 = 1.35;
const SECTION_GAP: f32 = 10.0;
const ENTRY_GAP: f32 = 6.0;
const RULE_THICKNESS: f32 = 0.75;
const BULLET_INDENT: f32 = 10.0;
const BAR_HEIGHT: f32 = 3.5;
const COLUMN_GAP: f32 = 8.0;
/// Columns narrower than this stack skill bars under the skill name.
const NARROW_COLUMN: f32 = 200.0;

// ────────────────────────────────────────────────────────────────────────────
// Context and text styles
// ────────────────────────────────────────────────────────────────────────────

/// Real user content or sample placeholder content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Real,
    Sample,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: Weight,
    pub italic: bool,
    pub color: Rgb,
}

/// Immutable inputs of one layout run.
pub struct RenderContext<'a> {
    pub doc: &'a ResumeDocument,
    pub style: &'a StyleSelection,
    pub palette: Palette,
    pub family: FontFamily,
}

impl<'a> RenderContext<'a> {
    pub fn new(doc: &'a ResumeDocument, style: &'a StyleSelection) -> Self {
        Self {
            doc,
            style,
            palette: style.palette(),
            family: style.font.family(),
        }
    }

    pub fn metrics(&self, weight: Weight) -> &'static FontMetricTable {
        get_metrics(self.family, weight)
    }

    pub fn measure(&self, text: &str, ts: TextStyle) -> f32 {
        self.metrics(ts.weight).width_pt(text, ts.size)
    }

    pub fn toned(&self, ts: TextStyle, tone: Tone) -> TextStyle {
        match tone {
            Tone::Real => ts,
            Tone::Sample => TextStyle {
                color: self.palette.muted,
                italic: true,
                ..ts
            },
        }
    }

    fn style(&self, size: f32, weight: Weight, italic: bool, color: Rgb) -> TextStyle {
        TextStyle {
            size,
            weight,
            italic,
            color,
        }
    }

    pub fn name(&self) -> TextStyle {
        self.style(NAME_SIZE, Weight::Bold, false, self.palette.primary)
    }

    pub fn title(&self) -> TextStyle {
        self.style(TITLE_SIZE, Weight::Regular, false, self.palette.secondary)
    }

    pub fn heading(&self) -> TextStyle {
        self.style(HEADING_SIZE, Weight::Bold, false, self.palette.primary)
    }

    pub fn entry_title(&self) -> TextStyle {
        self.style(ENTRY_TITLE_SIZE, Weight::Bold, false, self.palette.primary)
    }

    pub fn body(&self) -> TextStyle {
        self.style(BODY_SIZE, Weight::Regular, false, self.palette.secondary)
    }

    pub fn subtitle(&self) -> TextStyle {
        self.style(BODY_SIZE, Weight::Regular, true, self.palette.secondary)
    }

    pub fn meta(&self) -> TextStyle {
        self.style(META_SIZE, Weight::Regular, false, self.palette.tertiary)
    }
}

pub fn line_height(size: f32) -> f32 {
    size * LINE_FACTOR
}

fn text_element(x: f32, y: f32, content: &str, ts: TextStyle) -> Element {
    Element::Text {
        x,
        y,
        content: content.to_string(),
        size: ts.size,
        weight: ts.weight,
        italic: ts.italic,
        color: ts.color,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Primitive drawing operations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Draws one unwrapped line aligned inside the flow's column.
pub fn draw_line(
    ctx: &RenderContext<'_>,
    canvas: &mut Canvas,
    flow: &mut Flow,
    text: &str,
    ts: TextStyle,
    align: Align,
) {
    let x = match align {
        Align::Left => flow.x,
        Align::Center => flow.x + (flow.width - ctx.measure(text, ts)) / 2.0,
    };
    if let Some(slot) = flow.reserve(canvas, line_height(ts.size)) {
        canvas.draw(slot.page, text_element(x, slot.y + ts.size, text, ts));
    }
}

/// Word-wraps `text` to the column and draws every line.
pub fn paragraph(
    ctx: &RenderContext<'_>,
    canvas: &mut Canvas,
    flow: &mut Flow,
    text: &str,
    ts: TextStyle,
    align: Align,
) {
    for line in wrap_text(text, ctx.metrics(ts.weight), ts.size, flow.width) {
        draw_line(ctx, canvas, flow, &line, ts, align);
    }
}

/// A bullet glyph followed by text with a hanging indent.
pub fn bullet(
    ctx: &RenderContext<'_>,
    canvas: &mut Canvas,
    flow: &mut Flow,
    text: &str,
    ts: TextStyle,
) {
    let lines = wrap_text(
        text,
        ctx.metrics(ts.weight),
        ts.size,
        flow.width - BULLET_INDENT,
    );
    let lh = line_height(ts.size);
    for (i, line) in lines.iter().enumerate() {
        let Some(slot) = flow.reserve(canvas, lh) else {
            continue;
        };
        if i == 0 {
            canvas.draw(
                slot.page,
                Element::Bullet {
                    cx: flow.x + 3.5,
                    cy: slot.y + ts.size * 0.65,
                    radius: 1.3,
                    color: ts.color,
                },
            );
        }
        canvas.draw(
            slot.page,
            text_element(flow.x + BULLET_INDENT, slot.y + ts.size, line, ts),
        );
    }
}

/// Left text wrapped beside a right-aligned label on the first line.
pub fn two_sided(
    ctx: &RenderContext<'_>,
    canvas: &mut Canvas,
    flow: &mut Flow,
    left: &str,
    lts: TextStyle,
    right: &str,
    rts: TextStyle,
) {
    let right = right.trim();
    if right.is_empty() {
        paragraph(ctx, canvas, flow, left, lts, Align::Left);
        return;
    }
    let right_w = ctx.measure(right, rts);
    let avail = flow.width - right_w - COLUMN_GAP;
    if avail < flow.width * 0.4 {
        paragraph(ctx, canvas, flow, left, lts, Align::Left);
        draw_line(ctx, canvas, flow, right, rts, Align::Left);
        return;
    }

    let lines = wrap_text(left, ctx.metrics(lts.weight), lts.size, avail);
    let first_height = line_height(lts.size.max(rts.size));
    if let Some(slot) = flow.reserve(canvas, first_height) {
        if let Some(first) = lines.first() {
            canvas.draw(slot.page, text_element(flow.x, slot.y + lts.size, first, lts));
        }
        canvas.draw(
            slot.page,
            text_element(flow.right() - right_w, slot.y + lts.size, right, rts),
        );
    }
    for line in lines.iter().skip(1) {
        draw_line(ctx, canvas, flow, line, lts, Align::Left);
    }
}

/// Upper-case heading with an accent-coloured rule underneath.
pub fn heading(ctx: &RenderContext<'_>, canvas: &mut Canvas, flow: &mut Flow, title: &str) {
    let ts = ctx.heading();
    let lh = line_height(ts.size);
    if let Some(slot) = flow.reserve(canvas, lh + 4.0) {
        canvas.draw(
            slot.page,
            text_element(flow.x, slot.y + ts.size, &title.to_uppercase(), ts),
        );
        canvas.draw(
            slot.page,
            Element::Rule {
                x1: flow.x,
                x2: flow.right(),
                y: slot.y + lh + 1.0,
                thickness: RULE_THICKNESS,
                color: ctx.style.accent,
            },
        );
    }
    flow.skip(3.0);
}

fn level_bar(
    canvas: &mut Canvas,
    page: usize,
    x: f32,
    y: f32,
    width: f32,
    level: u8,
    track: Rgb,
    fill: Rgb,
) {
    let ratio = f32::from(level.clamp(1, 10)) / 10.0;
    canvas.draw(
        page,
        Element::Fill {
            x,
            y,
            width,
            height: BAR_HEIGHT,
            color: track,
        },
    );
    canvas.draw(
        page,
        Element::Fill {
            x,
            y,
            width: width * ratio,
            height: BAR_HEIGHT,
            color: fill,
        },
    );
}

// ────────────────────────────────────────────────────────────────────────────
// Section dispatch
// ────────────────────────────────────────────────────────────────────────────

/// Real entries, sample entries (preview of an empty section) or nothing.
fn pick<'d, T: Clone>(
    real: &'d [T],
    mode: RenderMode,
    sample: fn() -> Vec<T>,
) -> Option<(Cow<'d, [T]>, Tone)> {
    if !real.is_empty() {
        Some((Cow::Borrowed(real), Tone::Real))
    } else if mode == RenderMode::Preview {
        Some((Cow::Owned(sample()), Tone::Sample))
    } else {
        None
    }
}

/// Same as [`pick`] for a single free-text field.
pub fn pick_text<'d>(
    real: &'d str,
    mode: RenderMode,
    sample: &'static str,
) -> Option<(&'d str, Tone)> {
    if !real.trim().is_empty() {
        Some((real.trim(), Tone::Real))
    } else if mode == RenderMode::Preview {
        Some((sample, Tone::Sample))
    } else {
        None
    }
}

/// Renders one section into `flow`. Returns `false` when it was skipped.
pub fn render_section(
    ctx: &RenderContext<'_>,
    canvas: &mut Canvas,
    flow: &mut Flow,
    section: Section,
) -> bool {
    let mode = canvas.mode();
    let doc = ctx.doc;
    match section {
        Section::Summary => {
            let Some((text, tone)) = pick_text(&doc.summary, mode, placeholder::SUMMARY) else {
                return false;
            };
            heading(ctx, canvas, flow, section.title());
            paragraph(ctx, canvas, flow, text, ctx.toned(ctx.body(), tone), Align::Left);
        }
        Section::Experience => {
            let Some((entries, tone)) = pick(&doc.experience, mode, placeholder::experience)
            else {
                return false;
            };
            heading(ctx, canvas, flow, section.title());
            for entry in entries.iter() {
                experience_entry(ctx, canvas, flow, entry, tone);
            }
        }
        Section::Education => {
            let Some((entries, tone)) = pick(&doc.education, mode, placeholder::education) else {
                return false;
            };
            heading(ctx, canvas, flow, section.title());
            for entry in entries.iter() {
                education_entry(ctx, canvas, flow, entry, tone);
            }
        }
        Section::Skills => {
            let Some((entries, tone)) = pick(&doc.skills, mode, placeholder::skills) else {
                return false;
            };
            heading(ctx, canvas, flow, section.title());
            for skill in entries.iter() {
                skill_row(ctx, canvas, flow, skill, tone);
            }
        }
        Section::Tools => {
            let Some((entries, tone)) = pick(&doc.tools, mode, placeholder::tools) else {
                return false;
            };
            heading(ctx, canvas, flow, section.title());
            let names: Vec<&str> = entries.iter().map(|t| t.name.as_str()).collect();
            let joined = join_present(&names, ", ");
            paragraph(ctx, canvas, flow, &joined, ctx.toned(ctx.body(), tone), Align::Left);
        }
        Section::Languages => {
            let Some((entries, tone)) = pick(&doc.languages, mode, placeholder::languages) else {
                return false;
            };
            heading(ctx, canvas, flow, section.title());
            for language in entries.iter() {
                language_row(ctx, canvas, flow, language, tone);
            }
        }
        Section::Certifications => {
            let Some((entries, tone)) =
                pick(&doc.certifications, mode, placeholder::certifications)
            else {
                return false;
            };
            heading(ctx, canvas, flow, section.title());
            for cert in entries.iter() {
                certification_entry(ctx, canvas, flow, cert, tone);
            }
        }
        Section::Projects => {
            let Some((entries, tone)) = pick(&doc.projects, mode, placeholder::projects) else {
                return false;
            };
            heading(ctx, canvas, flow, section.title());
            for project in entries.iter() {
                project_entry(ctx, canvas, flow, project, tone);
            }
        }
    }
    flow.skip(SECTION_GAP);
    true
}

// ────────────────────────────────────────────────────────────────────────────
// Entry renderers
// ────────────────────────────────────────────────────────────────────────────

fn experience_entry(
    ctx: &RenderContext<'_>,
    canvas: &mut Canvas,
    flow: &mut Flow,
    entry: &Experience,
    tone: Tone,
) {
    let dates = date_range(&entry.start_date, &entry.end_date, entry.current);
    two_sided(
        ctx,
        canvas,
        flow,
        &entry.position,
        ctx.toned(ctx.entry_title(), tone),
        &dates,
        ctx.toned(ctx.meta(), tone),
    );
    let company = join_present(&[&entry.company, &entry.location], " | ");
    paragraph(ctx, canvas, flow, &company, ctx.toned(ctx.subtitle(), tone), Align::Left);
    for text in bullet_lines(&entry.description) {
        bullet(ctx, canvas, flow, &text, ctx.toned(ctx.body(), tone));
    }
    flow.skip(ENTRY_GAP);
}

fn education_entry(
    ctx: &RenderContext<'_>,
    canvas: &mut Canvas,
    flow: &mut Flow,
    entry: &Education,
    tone: Tone,
) {
    let degree = match (entry.degree.trim(), entry.field.trim()) {
        ("", field) => field.to_string(),
        (degree, "") => degree.to_string(),
        (degree, field) => format!("{degree} in {field}"),
    };
    let dates = date_range(&entry.start_date, &entry.end_date, entry.current);
    two_sided(
        ctx,
        canvas,
        flow,
        &degree,
        ctx.toned(ctx.entry_title(), tone),
        &dates,
        ctx.toned(ctx.meta(), tone),
    );
    let school = join_present(&[&entry.school, &entry.location], " | ");
    paragraph(ctx, canvas, flow, &school, ctx.toned(ctx.subtitle(), tone), Align::Left);
    let honors_style = TextStyle {
        italic: true,
        ..ctx.toned(ctx.meta(), tone)
    };
    paragraph(ctx, canvas, flow, &entry.honors, honors_style, Align::Left);
    flow.skip(ENTRY_GAP);
}

fn skill_row(
    ctx: &RenderContext<'_>,
    canvas: &mut Canvas,
    flow: &mut Flow,
    skill: &Skill,
    tone: Tone,
) {
    let ts = ctx.toned(ctx.body(), tone);
    let track = ctx.palette.light;
    let fill = match tone {
        Tone::Real => ctx.style.accent,
        Tone::Sample => ctx.palette.muted,
    };

    if flow.width < NARROW_COLUMN {
        paragraph(ctx, canvas, flow, &skill.name, ts, Align::Left);
        if let Some(slot) = flow.reserve(canvas, BAR_HEIGHT + 4.0) {
            level_bar(
                canvas,
                slot.page,
                flow.x,
                slot.y + 1.0,
                flow.width,
                skill.level,
                track,
                fill,
            );
        }
        return;
    }

    let bar_width = (flow.width * 0.35).min(120.0);
    let lines = wrap_text(
        &skill.name,
        ctx.metrics(ts.weight),
        ts.size,
        flow.width - bar_width - COLUMN_GAP,
    );
    let lh = line_height(ts.size);
    if let Some(slot) = flow.reserve(canvas, lh) {
        if let Some(first) = lines.first() {
            canvas.draw(slot.page, text_element(flow.x, slot.y + ts.size, first, ts));
        }
        level_bar(
            canvas,
            slot.page,
            flow.right() - bar_width,
            slot.y + (lh - BAR_HEIGHT) / 2.0,
            bar_width,
            skill.level,
            track,
            fill,
        );
    }
    for line in lines.iter().skip(1) {
        draw_line(ctx, canvas, flow, line, ts, Align::Left);
    }
}

fn language_row(
    ctx: &RenderContext<'_>,
    canvas: &mut Canvas,
    flow: &mut Flow,
    language: &Language,
    tone: Tone,
) {
    two_sided(
        ctx,
        canvas,
        flow,
        &language.name,
        ctx.toned(ctx.body(), tone),
        language.proficiency.label(),
        ctx.toned(ctx.meta(), tone),
    );
}

fn certification_entry(
    ctx: &RenderContext<'_>,
    canvas: &mut Canvas,
    flow: &mut Flow,
    cert: &Certification,
    tone: Tone,
) {
    let name_style = TextStyle {
        weight: Weight::Bold,
        ..ctx.toned(ctx.body(), tone)
    };
    paragraph(ctx, canvas, flow, &cert.name, name_style, Align::Left);
    let meta = join_present(&[&cert.issuer, &cert.date], " | ");
    paragraph(ctx, canvas, flow, &meta, ctx.toned(ctx.meta(), tone), Align::Left);
    flow.skip(ENTRY_GAP / 2.0);
}

fn project_entry(
    ctx: &RenderContext<'_>,
    canvas: &mut Canvas,
    flow: &mut Flow,
    project: &Project,
    tone: Tone,
) {
    let links = join_present(&[&project.live_url, &project.repo_url], " | ");
    two_sided(
        ctx,
        canvas,
        flow,
        &project.name,
        ctx.toned(ctx.entry_title(), tone),
        &links,
        ctx.toned(ctx.meta(), tone),
    );
    let tech_style = TextStyle {
        italic: true,
        ..ctx.toned(ctx.meta(), tone)
    };
    paragraph(ctx, canvas, flow, &project.technologies, tech_style, Align::Left);
    for text in bullet_lines(&project.description) {
        bullet(ctx, canvas, flow, &text, ctx.toned(ctx.body(), tone));
    }
    flow.skip(ENTRY_GAP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::canvas::PageGeometry;
    use crate::layout::font_metrics::US_LETTER;
    use crate::models::resume::EntryId;
    use crate::models::style::FontChoice;
    use crate::templates::Margins;

    fn canvas(mode: RenderMode) -> Canvas {
        Canvas::new(
            PageGeometry {
                size: US_LETTER,
                margins: Margins::uniform(36.0),
            },
            mode,
        )
    }

    fn texts(canvas: Canvas) -> Vec<(String, bool, Rgb)> {
        canvas
            .finish()
            .pages
            .into_iter()
            .flat_map(|p| p.elements)
            .filter_map(|e| match e {
                Element::Text {
                    content,
                    italic,
                    color,
                    ..
                } => Some((content, italic, color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_section_renders_muted_samples_in_preview() {
        let doc = ResumeDocument::default();
        let style = StyleSelection::default();
        let ctx = RenderContext::new(&doc, &style);
        let mut c = canvas(RenderMode::Preview);
        let mut flow = Flow::new(36.0, 540.0, 36.0);
        assert!(render_section(&ctx, &mut c, &mut flow, Section::Experience));
        let texts = texts(c);
        assert_eq!(texts[0].0, "EXPERIENCE");
        assert!(texts.iter().any(|(t, _, _)| t == "Company Name | City, State"));
        for (_, italic, color) in &texts[1..] {
            assert!(*italic);
            assert_eq!(*color, ctx.palette.muted);
        }
    }

    #[test]
    fn test_italic_text_measures_with_upright_table() {
        let doc = ResumeDocument::default();
        for font in [FontChoice::Inter, FontChoice::Georgia] {
            let style = StyleSelection {
                font,
                ..StyleSelection::default()
            };
            let ctx = RenderContext::new(&doc, &style);
            let upright = ctx.body();
            let slanted = TextStyle {
                italic: true,
                ..upright
            };
            let text = "Jan 2020 - Present";
            assert_eq!(ctx.measure(text, slanted), ctx.measure(text, upright));
            assert!(ctx.measure(text, slanted) > 0.0);
        }
    }

    #[test]
    fn test_empty_section_is_skipped_in_export() {
        let doc = ResumeDocument::default();
        let style = StyleSelection::default();
        let ctx = RenderContext::new(&doc, &style);
        let mut c = canvas(RenderMode::Export);
        let mut flow = Flow::new(36.0, 540.0, 36.0);
        assert!(!render_section(&ctx, &mut c, &mut flow, Section::Projects));
        assert!(texts(c).is_empty());
    }

    #[test]
    fn test_experience_bullets_drop_markers() {
        let doc = ResumeDocument {
            experience: vec![Experience {
                id: EntryId(1),
                position: "Engineer".to_string(),
                company: "Acme".to_string(),
                start_date: "2020".to_string(),
                current: true,
                description: "• Built the thing\n- Shipped it\n\n".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let style = StyleSelection::default();
        let ctx = RenderContext::new(&doc, &style);
        let mut c = canvas(RenderMode::Export);
        let mut flow = Flow::new(36.0, 540.0, 36.0);
        render_section(&ctx, &mut c, &mut flow, Section::Experience);
        let doc_out = c.finish();
        let bullets = doc_out.pages[0]
            .elements
            .iter()
            .filter(|e| matches!(e, Element::Bullet { .. }))
            .count();
        assert_eq!(bullets, 2);
        let all: Vec<&str> = doc_out.texts().collect();
        assert!(all.contains(&"Built the thing"));
        assert!(all.contains(&"Shipped it"));
        assert!(all.contains(&"2020 - Present"));
        assert!(!all.iter().any(|t| t.starts_with('•') || t.starts_with('-')));
    }

    #[test]
    fn test_skill_bar_width_tracks_level() {
        let doc = ResumeDocument {
            skills: vec![Skill {
                id: EntryId(1),
                name: "Rust".to_string(),
                level: 8,
            }],
            ..Default::default()
        };
        let style = StyleSelection::default();
        let ctx = RenderContext::new(&doc, &style);
        let mut c = canvas(RenderMode::Export);
        let mut flow = Flow::new(36.0, 150.0, 36.0);
        render_section(&ctx, &mut c, &mut flow, Section::Skills);
        let page = &c.finish().pages[0];
        let fills: Vec<(f32, Rgb)> = page
            .elements
            .iter()
            .filter_map(|e| match e {
                Element::Fill { width, color, .. } => Some((*width, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 2);
        assert!((fills[0].0 - 150.0).abs() < 1e-3);
        assert_eq!(fills[0].1, ctx.palette.light);
        assert!((fills[1].0 - 120.0).abs() < 1e-3);
        assert_eq!(fills[1].1, style.accent);
    }

    #[test]
    fn test_heading_rule_uses_accent() {
        let doc = ResumeDocument::default();
        let style = StyleSelection {
            accent: Rgb::new(0xaa, 0x11, 0x22),
            ..Default::default()
        };
        let ctx = RenderContext::new(&doc, &style);
        let mut c = canvas(RenderMode::Preview);
        let mut flow = Flow::new(36.0, 300.0, 36.0);
        heading(&ctx, &mut c, &mut flow, "Tools");
        let page = &c.finish().pages[0];
        assert!(page.elements.iter().any(|e| matches!(
            e,
            Element::Rule { color, .. } if *color == Rgb::new(0xaa, 0x11, 0x22)
        )));
    }
}
