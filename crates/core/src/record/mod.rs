//! SVG capture of rendered frames.

use crate::{
    render::{Point, StrokeStyle, Surface},
    scene::{PreviewScene, TINT_ALPHA},
};

/// Vertical room reserved under the canvas for the label.
const LABEL_BAND: f64 = 100.0;
const LABEL_FONT_SIZE: u32 = 56;

/// [`Surface`] that keeps the most recent frame so it can be written out as
/// an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    stroke: Option<(Vec<Point>, StrokeStyle)>,
    frames: u64,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            stroke: None,
            frames: 0,
        }
    }

    /// Number of strokes drawn since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The current frame on its own.
    pub fn to_svg(&self) -> String {
        self.document(None)
    }

    /// The current frame composed with the preview tint and label.
    pub fn to_preview_svg(&self, scene: &PreviewScene) -> String {
        self.document(Some(scene))
    }

    fn document(&self, scene: Option<&PreviewScene>) -> String {
        let label = scene.and_then(|scene| scene.label.as_ref());
        let total_height = self.height + if label.is_some() { LABEL_BAND } else { 0.0 };

        let mut defs = Vec::new();
        let mut body = Vec::new();

        if let Some(scene) = scene {
            let opacity = f64::from(TINT_ALPHA) / 255.0;
            defs.push(format!(
                r#"<linearGradient id="tint" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="{}" stop-opacity="{opacity:.4}"/><stop offset="1" stop-color="{}" stop-opacity="{opacity:.4}"/></linearGradient>"#,
                scene.gradient.color_from, scene.gradient.color_to
            ));
            body.push(format!(
                r#"<rect width="{}" height="{}" fill="url(#tint)"/>"#,
                fmt_num(self.width),
                fmt_num(total_height)
            ));
        }

        if let Some((points, style)) = &self.stroke {
            let gradient = &style.gradient;
            defs.push(format!(
                r#"<linearGradient id="stroke" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}"><stop offset="{}" stop-color="{}"/><stop offset="{}" stop-color="{}"/></linearGradient>"#,
                fmt_num(gradient.start.x),
                fmt_num(gradient.start.y),
                fmt_num(gradient.end.x),
                fmt_num(gradient.end.y),
                fmt_num(gradient.stops[0].offset),
                gradient.stops[0].color,
                fmt_num(gradient.stops[1].offset),
                gradient.stops[1].color,
            ));
            let coords = points
                .iter()
                .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
                .collect::<Vec<_>>()
                .join(" ");
            body.push(format!(
                r#"<polyline fill="none" stroke="url(#stroke)" stroke-width="{}" stroke-linecap="{}" stroke-linejoin="{}" points="{coords}"/>"#,
                fmt_num(style.width),
                style.cap.keyword(),
                style.join.keyword(),
            ));
        }

        if let Some(label) = label {
            defs.push(format!(
                r#"<linearGradient id="label" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="{}"/><stop offset="1" stop-color="{}"/></linearGradient>"#,
                label.gradient.color_from, label.gradient.color_to
            ));
            body.push(format!(
                r#"<text x="{}" y="{}" text-anchor="middle" font-size="{LABEL_FONT_SIZE}" font-weight="700" fill="url(#label)">{}</text>"#,
                fmt_num(self.width / 2.0),
                fmt_num(self.height + LABEL_BAND * 0.7),
                escape_xml(&label.text),
            ));
        }

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><defs>{}</defs>{}</svg>"#,
            defs.join(""),
            body.join(""),
            w = fmt_num(self.width),
            h = fmt_num(total_height),
        )
    }
}

impl Surface for SvgSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.stroke = None;
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) {
        self.stroke = Some((points.to_vec(), style.clone()));
        self.frames += 1;
    }
}

/// Up to three decimals without trailing zeros.
fn fmt_num(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        params::{FluxState, ParamChange},
        render::Renderer,
        timeline::AnimationClock,
    };

    fn drawn(state: &FluxState) -> SvgSurface {
        let mut surface = SvgSurface::new(400.0, 400.0);
        Renderer::default().draw_frame(&mut surface, state, AnimationClock::new());
        surface
    }

    #[test]
    fn frame_svg_contains_the_curve() {
        let svg = drawn(&FluxState::default()).to_svg();

        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"viewBox="0 0 400 400""#));
        assert!(svg.contains(r##"<stop offset="0" stop-color="#007AFF"/>"##));
        assert!(svg.contains(r#"stroke-linecap="round""#));
        assert!(svg.contains(r#"stroke-linejoin="round""#));
        assert!(svg.contains(r#"stroke-width="2""#));
        // First sample of the default curve.
        assert!(svg.contains(r#"points="360,200 "#));
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn preview_adds_tint_and_escaped_label() {
        let state = FluxState::default().apply(ParamChange::LabelText("A & B".into()));
        let svg = drawn(&state).to_preview_svg(&PreviewScene::from_state(&state));

        assert!(svg.contains(r#"height="500""#));
        assert!(svg.contains(r#"fill="url(#tint)""#));
        assert!(svg.contains(">A &amp; B</text>"));
    }

    #[test]
    fn clear_drops_the_previous_stroke() {
        let mut surface = drawn(&FluxState::default());
        surface.clear();
        assert!(!surface.to_svg().contains("<polyline"));
        assert_eq!(surface.frames(), 1);
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(fmt_num(400.0), "400");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(1.23456), "1.235");
    }
}
