use crate::error::RenderError;
use crate::model::Segment2D;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub width_px: u32,
    pub height_px: u32,
    pub margin_px: u32,
    pub stroke: String,
    pub stroke_width: f64,
    pub background: Option<String>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            width_px: 800,
            height_px: 800,
            margin_px: 24,
            stroke: "#000000".to_string(),
            stroke_width: 1.0,
            background: Some("#ffffff".to_string()),
        }
    }
}

/// Turns normalized segments into an image artifact.
pub trait Rasterizer {
    type Image;

    fn rasterize(&self, segments: &[Segment2D], style: &RenderStyle)
        -> Result<Self::Image, RenderError>;
}

/// Writes segments as an SVG document, +y pointing up.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRasterizer;

impl Rasterizer for SvgRasterizer {
    type Image = String;

    fn rasterize(&self, segments: &[Segment2D], style: &RenderStyle) -> Result<String, RenderError> {
        if segments.is_empty() {
            return Err(RenderError::NoGeometry);
        }
        let w = style.width_px as f64;
        let h = style.height_px as f64;
        let m = style.margin_px as f64;
        let span_x = w - 2.0 * m;
        let span_y = h - 2.0 * m;
        if span_x <= 0.0 || span_y <= 0.0 {
            return Err(RenderError::InvalidStyle(format!(
                "margin {}px leaves no drawing area in {}x{}",
                style.margin_px, style.width_px, style.height_px
            )));
        }
        // Keep the aspect ratio of the unit square.
        let span = span_x.min(span_y);
        let ox = (w - span) * 0.5;
        let oy = (h - span) * 0.5;
        let map = |x: f64, y: f64| (ox + x * span, oy + (1.0 - y) * span);

        let mut out = String::new();
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            style.width_px, style.height_px, style.width_px, style.height_px
        )?;
        if let Some(bg) = &style.background {
            writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, escape_attr(bg))?;
        }
        writeln!(
            out,
            r#"<g stroke="{}" stroke-width="{}" stroke-linecap="round" fill="none">"#,
            escape_attr(&style.stroke),
            style.stroke_width
        )?;
        for seg in segments {
            let (x1, y1) = map(seg.p0.x, seg.p0.y);
            let (x2, y2) = map(seg.p1.x, seg.p1.y);
            writeln!(
                out,
                r#"<line x1="{x1:.3}" y1="{y1:.3}" x2="{x2:.3}" y2="{y2:.3}"/>"#
            )?;
        }
        writeln!(out, "</g>")?;
        writeln!(out, "</svg>")?;
        Ok(out)
    }
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
