//! Input controls: the bounded range widgets and the captions shown next to
//! them.

use std::f64::consts::{PI, TAU};

use crate::params::{CurveParameters, DisplayState, ParamChange};

/// A bounded range input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeControl {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl RangeControl {
    pub const FREQUENCY: Self = Self::new(1.0, 10.0, 1.0);
    pub const PHASE: Self = Self::new(0.0, TAU, 0.1);
    pub const SPEED: Self = Self::new(0.0, 3.0, 0.1);
    pub const STROKE_WIDTH: Self = Self::new(1.0, 8.0, 1.0);

    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Snaps `value` onto the step grid and keeps it inside `[min, max]`.
    /// Non-finite input lands on `min`. Snapped values are the nearest double
    /// to the step decimal (`0.7`, not `7.0 * 0.1`).
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let per_unit = 1.0 / self.step;
        let steps = ((value - self.min) * per_unit).round();
        (self.min + steps / per_unit).clamp(self.min, self.max)
    }

    fn clamp_int(&self, value: f64) -> u8 {
        self.clamp(value) as u8
    }
}

/// Which slider produced a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    FreqA,
    FreqB,
    Phase,
    Speed,
    StrokeWidth,
}

impl Slider {
    pub fn control(&self) -> RangeControl {
        match self {
            Slider::FreqA | Slider::FreqB => RangeControl::FREQUENCY,
            Slider::Phase => RangeControl::PHASE,
            Slider::Speed => RangeControl::SPEED,
            Slider::StrokeWidth => RangeControl::STROKE_WIDTH,
        }
    }

    /// Turns a raw slider position into a store edit, bounded the way the
    /// widget bounds it.
    pub fn change(&self, raw: f64) -> ParamChange {
        let control = self.control();
        match self {
            Slider::FreqA => ParamChange::FreqA(control.clamp_int(raw)),
            Slider::FreqB => ParamChange::FreqB(control.clamp_int(raw)),
            Slider::Phase => ParamChange::Phase(control.clamp(raw)),
            Slider::Speed => ParamChange::Speed(control.clamp(raw)),
            Slider::StrokeWidth => ParamChange::StrokeWidth(control.clamp_int(raw)),
        }
    }

    pub fn label(&self, curve: &CurveParameters) -> String {
        match self {
            Slider::FreqA => format!("Frequency A: {}", curve.freq_a),
            Slider::FreqB => format!("Frequency B: {}", curve.freq_b),
            Slider::Phase => format!("Phase: {}", format_phase(curve.phase)),
            Slider::Speed => format!("Speed: {:.1}x", curve.speed),
            Slider::StrokeWidth => format!("Stroke: {}px", curve.stroke_width),
        }
    }
}

/// Radians as a multiple of π with two decimals, e.g. `0.50π`.
pub fn format_phase(radians: f64) -> String {
    format!("{:.2}π", radians / PI)
}

/// Caption of the play/pause button.
pub fn toggle_caption(display: &DisplayState) -> &'static str {
    if display.is_animating {
        "Pause"
    } else {
        "Play"
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn clamps_and_snaps_like_a_range_input() {
        assert_eq!(RangeControl::FREQUENCY.clamp(0.0), 1.0);
        assert_eq!(RangeControl::FREQUENCY.clamp(42.0), 10.0);
        assert_eq!(RangeControl::FREQUENCY.clamp(3.4), 3.0);
        assert_eq!(RangeControl::STROKE_WIDTH.clamp(f64::NAN), 1.0);
        assert_eq!(RangeControl::SPEED.clamp(1.26), 1.3);
        assert_eq!(RangeControl::PHASE.clamp(100.0), TAU);
    }

    #[test]
    fn slider_changes_stay_in_range() {
        assert_eq!(Slider::FreqA.change(12.0), ParamChange::FreqA(10));
        assert_eq!(Slider::StrokeWidth.change(-3.0), ParamChange::StrokeWidth(1));
        assert_eq!(Slider::Speed.change(-1.0), ParamChange::Speed(0.0));
    }

    #[test]
    fn snapped_decimals_are_exact() {
        assert_eq!(Slider::Phase.change(0.71), ParamChange::Phase(0.7));
        assert_eq!(Slider::Phase.change(2.29), ParamChange::Phase(2.3));
        assert_eq!(Slider::Speed.change(0.3), ParamChange::Speed(0.3));
        assert_eq!(Slider::Speed.change(2.94), ParamChange::Speed(2.9));

        for tenths in 0..=30_u32 {
            let expected: f64 = format!("{}.{}", tenths / 10, tenths % 10).parse().unwrap();
            assert_eq!(RangeControl::SPEED.clamp(expected), expected, "{expected}");
        }
    }

    #[test]
    fn labels_match_the_control_panel() {
        let curve = CurveParameters::default();
        assert_eq!(Slider::FreqA.label(&curve), "Frequency A: 3");
        assert_eq!(Slider::FreqB.label(&curve), "Frequency B: 4");
        assert_eq!(Slider::Phase.label(&curve), "Phase: 0.50π");
        assert_eq!(Slider::Speed.label(&curve), "Speed: 1.0x");
        assert_eq!(Slider::StrokeWidth.label(&curve), "Stroke: 2px");
        assert_eq!(format_phase(FRAC_PI_2 * 3.0), "1.50π");
    }

    #[test]
    fn toggle_caption_follows_the_play_state() {
        let mut display = DisplayState::default();
        assert_eq!(toggle_caption(&display), "Pause");
        display.is_animating = false;
        assert_eq!(toggle_caption(&display), "Play");
    }
}
