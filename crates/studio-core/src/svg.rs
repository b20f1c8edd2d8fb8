//! SVG preview export of a single page.
//!
//! Produces a standalone SVG at artboard size. Used for design thumbnails
//! and "download preview"; it is not print-accurate.

use crate::model::{Color, Document, Element, ElementStyle, Page, TextAlign};
use std::fmt::Write;

fn svg_color(c: &Color) -> String {
    if (c.a - 1.0).abs() < f32::EPSILON {
        c.to_hex()
    } else {
        format!(
            "rgba({}, {}, {}, {})",
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            c.a
        )
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Map the editor's font-family utility names to CSS families.
fn css_font_family(family: &str) -> &str {
    match family {
        "font-serif" => "Georgia, 'Times New Roman', serif",
        "font-sans" => "Inter, system-ui, sans-serif",
        "font-mono" => "ui-monospace, monospace",
        other => other,
    }
}

/// Render one page of `doc` as SVG markup.
pub fn render_page_svg(doc: &Document, page: &Page) -> String {
    let (w, h) = (doc.width, doc.height);
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );
    let _ = writeln!(
        svg,
        "<rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"{}\" />",
        svg_color(&page.background_color)
    );
    for el in &page.elements {
        render_element(&mut svg, el);
    }
    svg.push_str("</svg>");
    svg
}

fn render_element(out: &mut String, el: &Element) {
    let (cx, cy) = el.center();
    let _ = write!(out, "<g opacity=\"{}\"", el.common.opacity);
    if el.rotation != 0.0 {
        let _ = write!(out, " transform=\"rotate({} {cx} {cy})\"", el.rotation);
    }
    out.push_str(">\n");

    match &el.style {
        ElementStyle::Shape(s) => {
            let _ = writeln!(
                out,
                "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\" />",
                el.x,
                el.y,
                el.width,
                el.height,
                svg_color(&s.background_color),
                r = s.border_radius,
            );
        }
        ElementStyle::Image(s) => {
            if let Some(href) = &el.content {
                let _ = writeln!(
                    out,
                    "  <image href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid slice\" />",
                    escape(href),
                    el.x,
                    el.y,
                    el.width,
                    el.height,
                );
            } else {
                // Empty image slot: placeholder box.
                let _ = writeln!(
                    out,
                    "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\" fill=\"#F2F4F7\" />",
                    el.x,
                    el.y,
                    el.width,
                    el.height,
                    r = s.border_radius,
                );
            }
        }
        ElementStyle::Text(s) => {
            if let Some(bg) = &s.background_color {
                let _ = writeln!(
                    out,
                    "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" />",
                    el.x,
                    el.y,
                    el.width,
                    el.height,
                    svg_color(bg),
                );
            }
            let (x, anchor) = match s.text_align {
                TextAlign::Left => (el.x, "start"),
                TextAlign::Center => (el.x + el.width / 2.0, "middle"),
                TextAlign::Right => (el.x + el.width, "end"),
            };
            let content = el.content.as_deref().unwrap_or_default();
            let lines: Vec<&str> = content.lines().collect();
            let line_height = s.font_size * 1.2;
            let total = lines.len() as f32 * line_height;
            let mut y = el.y + (el.height - total) / 2.0 + s.font_size * 0.8;
            for line in lines {
                let _ = writeln!(
                    out,
                    "  <text x=\"{x}\" y=\"{y}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\" text-anchor=\"{anchor}\">{}</text>",
                    escape(css_font_family(&s.font_family)),
                    s.font_size,
                    s.font_weight,
                    svg_color(&s.color),
                    escape(line),
                );
                y += line_height;
            }
        }
    }
    out.push_str("</g>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ElementId;
    use crate::model::{ElementKind, TextStyle};

    #[test]
    fn empty_page_is_just_background() {
        let doc = Document::new();
        let svg = render_page_svg(&doc, doc.current_page());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"500\" height=\"700\""));
        assert!(svg.contains(&doc.current_page().background_color.to_hex()));
        assert!(!svg.contains("<g"));
    }

    #[test]
    fn text_is_escaped_and_anchored() {
        let mut doc = Document::new();
        let mut el = Element::new(
            ElementId::intern("svg_text"),
            ElementStyle::Text(TextStyle {
                text_align: TextAlign::Right,
                ..TextStyle::default()
            }),
        );
        el.content = Some("Fish & <Chips>".into());
        doc.current_page_mut().elements.push(el);

        let svg = render_page_svg(&doc, doc.current_page());
        assert!(svg.contains("Fish &amp; &lt;Chips&gt;"));
        assert!(svg.contains("text-anchor=\"end\""));
        assert!(svg.contains("Georgia"));
    }

    #[test]
    fn rotation_pivots_on_center() {
        let mut doc = Document::new();
        let mut el = Element::new(
            ElementId::intern("svg_shape"),
            ElementStyle::default_for(ElementKind::Shape),
        );
        el.x = 10.0;
        el.y = 20.0;
        el.rotation = 45.0;
        doc.current_page_mut().elements.push(el);

        let svg = render_page_svg(&doc, doc.current_page());
        assert!(svg.contains("rotate(45 60 70)"), "{svg}");
    }
}
