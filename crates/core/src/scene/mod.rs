use crate::{gradient::GradientSpec, params::FluxState};

/// Alpha byte of the tint painted behind the canvas.
pub const TINT_ALPHA: u8 = 0x15;
/// Angle shared by the label fill and the background tint.
pub const PREVIEW_ANGLE: u32 = 135;

/// The label drawn under the canvas, filled with the curve's gradient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelOverlay {
    pub text: String,
    pub gradient: GradientSpec,
    pub angle_deg: u32,
}

/// Everything around the canvas in the preview pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewScene {
    pub gradient: GradientSpec,
    pub tint_from: String,
    pub tint_to: String,
    pub label: Option<LabelOverlay>,
}

impl PreviewScene {
    pub fn from_state(state: &FluxState) -> Self {
        let gradient = &state.gradient;
        let text = &state.display.label_text;
        Self {
            gradient: gradient.clone(),
            tint_from: gradient.color_from.to_hex_with_alpha(TINT_ALPHA),
            tint_to: gradient.color_to.to_hex_with_alpha(TINT_ALPHA),
            label: (!text.is_empty()).then(|| LabelOverlay {
                text: text.clone(),
                gradient: gradient.clone(),
                angle_deg: PREVIEW_ANGLE,
            }),
        }
    }

    /// CSS background of the tint layer.
    pub fn tint_css(&self) -> String {
        format!(
            "linear-gradient({PREVIEW_ANGLE}deg, {}, {})",
            self.tint_from, self.tint_to
        )
    }
}
