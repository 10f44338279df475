//! SVG serialisation of a laid-out page.

use std::fmt::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::layout::{Element, Page, Weight};
use crate::models::resume::Photo;
use crate::models::style::{Rgb, StyleSelection};

/// Renders one page as a standalone SVG document.
///
/// The viewBox is in points and the outer size in CSS pixels at 96 DPI, so the
/// preview has the same proportions as the exported PDF.
pub fn page_to_svg(page: &Page, style: &StyleSelection, photo: Option<&Photo>) -> String {
    let (width_px, height_px) = page.size.preview_px();
    let mut out = String::with_capacity(16 * 1024);

    // Writing into a String cannot fail.
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width_px}" height="{height_px}" viewBox="0 0 {} {}" font-family="{}">"#,
        num(page.size.width_pt),
        num(page.size.height_pt),
        escape(&style.font.css_stack()),
    );
    let _ = write!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        num(page.size.width_pt),
        num(page.size.height_pt),
        Rgb::WHITE,
    );

    for element in &page.elements {
        write_element(&mut out, element, style, photo);
    }
    out.push_str("</svg>");
    out
}

fn write_element(out: &mut String, element: &Element, style: &StyleSelection, photo: Option<&Photo>) {
    let _ = match element {
        Element::Text {
            x,
            y,
            content,
            size,
            weight,
            italic,
            color,
        } => {
            let weight = match weight {
                Weight::Bold => r#" font-weight="bold""#,
                Weight::Regular => "",
            };
            let italic = if *italic { r#" font-style="italic""# } else { "" };
            write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" fill="{color}"{weight}{italic}>{}</text>"#,
                num(*x),
                num(*y),
                num(*size),
                escape(content),
            )
        }
        Element::Rule {
            x1,
            x2,
            y,
            thickness,
            color,
        } => write!(
            out,
            r#"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="{color}" stroke-width="{}"/>"#,
            num(*x1),
            num(*x2),
            num(*thickness),
            y = num(*y),
        ),
        Element::Fill {
            x,
            y,
            width,
            height,
            color,
        } => write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{color}"/>"#,
            num(*x),
            num(*y),
            num(*width),
            num(*height),
        ),
        Element::Frame {
            x,
            y,
            width,
            height,
            color,
        } => write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{color}" stroke-width="1" stroke-dasharray="4 3"/>"#,
            num(*x),
            num(*y),
            num(*width),
            num(*height),
        ),
        Element::Bullet {
            cx,
            cy,
            radius,
            color,
        } => write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{color}"/>"#,
            num(*cx),
            num(*cy),
            num(*radius),
        ),
        Element::Photo {
            x,
            y,
            width,
            height,
        } => match photo {
            Some(photo) => write!(
                out,
                r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid slice" href="data:{};base64,{}"/>"#,
                num(*x),
                num(*y),
                num(*width),
                num(*height),
                escape(&photo.media_type),
                STANDARD.encode(&photo.bytes),
            ),
            None => write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}"/>"#,
                num(*x),
                num(*y),
                num(*width),
                num(*height),
                style.palette().muted,
            ),
        },
    };
}

/// Two decimals without trailing zeros.
fn num(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::US_LETTER;
    use bytes::Bytes;

    fn page(elements: Vec<Element>) -> Page {
        Page {
            size: US_LETTER,
            elements,
        }
    }

    #[test]
    fn test_svg_has_preview_dimensions() {
        let svg = page_to_svg(&page(vec![]), &StyleSelection::default(), None);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="816""#));
        assert!(svg.contains(r#"height="1056""#));
        assert!(svg.contains(r#"viewBox="0 0 612 792""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let el = Element::Text {
            x: 10.0,
            y: 20.5,
            content: "R&D <lead>".to_string(),
            size: 9.0,
            weight: Weight::Bold,
            italic: true,
            color: Rgb::new(0, 0, 0),
        };
        let svg = page_to_svg(&page(vec![el]), &StyleSelection::default(), None);
        assert!(svg.contains("R&amp;D &lt;lead&gt;"));
        assert!(svg.contains(r#"x="10" y="20.5""#));
        assert!(svg.contains(r#"font-weight="bold""#));
        assert!(svg.contains(r#"font-style="italic""#));
    }

    #[test]
    fn test_photo_is_inlined_as_data_uri() {
        let photo = Photo {
            media_type: "image/png".to_string(),
            bytes: Bytes::from_static(b"abc"),
        };
        let el = Element::Photo {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 120.0,
        };
        let svg = page_to_svg(&page(vec![el]), &StyleSelection::default(), Some(&photo));
        assert!(svg.contains("data:image/png;base64,YWJj"));
    }

    #[test]
    fn test_num_trims_zeros() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(0.126), "0.13");
        assert_eq!(num(-0.001), "0");
    }
}
