//! Parameter Store: the widget's state as an immutable value plus pure
//! update functions.

use std::f64::consts::{FRAC_PI_2, TAU};

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{
    gradient::{GradientSpec, Preset, Rgb, PRESETS},
    timeline::AnimationClock,
};

pub const DEFAULT_LABEL: &str = "Flux";

/// Shape and motion of the Lissajous curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParameters {
    pub freq_a: u8,
    pub freq_b: u8,
    /// Radians in `[0, 2π]`.
    pub phase: f64,
    pub speed: f64,
    pub stroke_width: u8,
}

impl Default for CurveParameters {
    fn default() -> Self {
        Self {
            freq_a: 3,
            freq_b: 4,
            phase: FRAC_PI_2,
            speed: 1.0,
            stroke_width: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub label_text: String,
    pub is_animating: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            label_text: DEFAULT_LABEL.to_string(),
            is_animating: true,
        }
    }
}

/// Everything the user can edit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FluxState {
    pub curve: CurveParameters,
    pub gradient: GradientSpec,
    pub display: DisplayState,
}

/// A single edit coming from an input control. Values are stored as given;
/// range limits belong to the controls (see [`crate::controls`]).
#[derive(Debug, Clone, PartialEq)]
pub enum ParamChange {
    FreqA(u8),
    FreqB(u8),
    Phase(f64),
    Speed(f64),
    StrokeWidth(u8),
    Gradient(GradientSpec),
    /// Index into [`PRESETS`]; out-of-range indices leave the state as is.
    Preset(usize),
    ColorFrom(Rgb),
    ColorTo(Rgb),
    LabelText(String),
    Animating(bool),
    ToggleAnimating,
}

/// The inputs the animation loop depends on. A change in any of them restarts
/// the loop; the label text is deliberately absent.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInputs {
    pub curve: CurveParameters,
    pub gradient: GradientSpec,
    pub is_animating: bool,
}

impl FluxState {
    pub fn apply(&self, change: ParamChange) -> Self {
        let mut next = self.clone();
        match change {
            ParamChange::FreqA(value) => next.curve.freq_a = value,
            ParamChange::FreqB(value) => next.curve.freq_b = value,
            ParamChange::Phase(value) => next.curve.phase = value,
            ParamChange::Speed(value) => next.curve.speed = value,
            ParamChange::StrokeWidth(value) => next.curve.stroke_width = value,
            ParamChange::Gradient(gradient) => next.gradient = gradient,
            ParamChange::Preset(index) => {
                if let Some(preset) = Preset::get(index) {
                    next.gradient = preset.spec();
                }
            }
            ParamChange::ColorFrom(color) => next.gradient = self.gradient.with_from(color),
            ParamChange::ColorTo(color) => next.gradient = self.gradient.with_to(color),
            ParamChange::LabelText(text) => next.display.label_text = text,
            ParamChange::Animating(value) => next.display.is_animating = value,
            ParamChange::ToggleAnimating => {
                next.display.is_animating = !self.display.is_animating
            }
        }
        next
    }

    /// Default parameters. Play/pause is not one of the reset fields, so the
    /// current flag is carried over.
    pub fn reset(&self) -> Self {
        Self {
            display: DisplayState {
                is_animating: self.display.is_animating,
                ..DisplayState::default()
            },
            ..Self::default()
        }
    }

    /// New frequencies, phase, speed and preset; stroke and label are kept.
    pub fn randomized<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut next = self.clone();
        next.curve.freq_a = rng.gen_range(1..=8);
        next.curve.freq_b = rng.gen_range(1..=8);
        next.curve.phase = rng.gen_range(0.0..TAU);
        next.curve.speed = rng.gen_range(0.5..2.5);
        if let Some(preset) = PRESETS.choose(rng) {
            next.gradient = preset.spec();
        }
        next
    }

    pub fn render_inputs(&self) -> RenderInputs {
        RenderInputs {
            curve: self.curve,
            gradient: self.gradient.clone(),
            is_animating: self.display.is_animating,
        }
    }
}

/// Holds the current [`FluxState`] and the [`AnimationClock`].
///
/// Every mutator reports whether the loop's [`RenderInputs`] changed, which is
/// what the animation loop uses to decide on a restart.
#[derive(Debug, Default, Clone)]
pub struct ParameterStore {
    state: FluxState,
    clock: AnimationClock,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: FluxState) -> Self {
        Self {
            state,
            clock: AnimationClock::new(),
        }
    }

    pub fn state(&self) -> &FluxState {
        &self.state
    }

    pub fn curve(&self) -> &CurveParameters {
        &self.state.curve
    }

    pub fn gradient(&self) -> &GradientSpec {
        &self.state.gradient
    }

    pub fn display(&self) -> &DisplayState {
        &self.state.display
    }

    pub fn clock(&self) -> AnimationClock {
        self.clock
    }

    pub(crate) fn clock_mut(&mut self) -> &mut AnimationClock {
        &mut self.clock
    }

    pub fn set(&mut self, change: ParamChange) -> bool {
        let next = self.state.apply(change);
        self.replace(next)
    }

    pub fn reset(&mut self) -> bool {
        self.clock.reset();
        let next = self.state.reset();
        self.replace(next)
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let next = self.state.randomized(rng);
        self.replace(next)
    }

    fn replace(&mut self, next: FluxState) -> bool {
        let watched_changed = next.render_inputs() != self.state.render_inputs();
        self.state = next;
        watched_changed
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn defaults_match_the_initial_widget() {
        let state = FluxState::default();
        assert_eq!(state.curve.freq_a, 3);
        assert_eq!(state.curve.freq_b, 4);
        assert_eq!(state.curve.phase, FRAC_PI_2);
        assert_eq!(state.curve.speed, 1.0);
        assert_eq!(state.curve.stroke_width, 2);
        assert_eq!(state.gradient, PRESETS[0].spec());
        assert_eq!(state.display.label_text, "Flux");
        assert!(state.display.is_animating);
    }

    #[test]
    fn apply_is_pure_replace() {
        let state = FluxState::default();
        let next = state.apply(ParamChange::FreqA(9)).apply(ParamChange::Speed(2.7));

        assert_eq!(state, FluxState::default());
        assert_eq!(next.curve.freq_a, 9);
        assert_eq!(next.curve.speed, 2.7);
        assert_eq!(next.curve.freq_b, 4);
    }

    #[test]
    fn color_edits_switch_to_custom() {
        let state = FluxState::default().apply(ParamChange::ColorFrom(Rgb::from_u32(0xABCDEF)));
        assert_eq!(state.gradient.name, "Custom");
        assert_eq!(state.gradient.color_from.to_string(), "#ABCDEF");
        assert_eq!(state.gradient.color_to.to_string(), "#5856D6");
    }

    #[test]
    fn preset_change_ignores_bad_index() {
        let state = FluxState::default();
        assert_eq!(state.apply(ParamChange::Preset(42)), state);
        assert_eq!(state.apply(ParamChange::Preset(3)).gradient.name, "Purple Dream");
    }

    #[test]
    fn toggle_flips_play_state() {
        let paused = FluxState::default().apply(ParamChange::ToggleAnimating);
        assert!(!paused.display.is_animating);
        assert!(paused.apply(ParamChange::ToggleAnimating).display.is_animating);
    }

    #[test]
    fn reset_is_idempotent_and_zeroes_the_clock() {
        let mut store = ParameterStore::new();
        store.set(ParamChange::FreqA(7));
        store.set(ParamChange::Phase(1.0));
        store.set(ParamChange::LabelText("Hello".into()));
        store.set(ParamChange::Preset(5));
        store.clock_mut().advance();
        store.clock_mut().advance();

        store.reset();
        let once = store.state().clone();
        assert_eq!(store.clock().frames(), 0);

        store.reset();
        assert_eq!(store.state(), &once);
        assert_eq!(once, FluxState::default());
        assert_eq!(store.clock().frames(), 0);
    }

    proptest! {
        #[test]
        fn randomize_stays_in_range(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let base = FluxState::default()
                .apply(ParamChange::StrokeWidth(6))
                .apply(ParamChange::LabelText("Keep".into()));

            let next = base.randomized(&mut rng);
            prop_assert!((1..=8).contains(&next.curve.freq_a));
            prop_assert!((1..=8).contains(&next.curve.freq_b));
            prop_assert!(next.curve.phase >= 0.0 && next.curve.phase < TAU);
            prop_assert!(next.curve.speed >= 0.5 && next.curve.speed < 2.5);
            prop_assert!(Preset::contains(&next.gradient));
            prop_assert_eq!(next.curve.stroke_width, 6);
            prop_assert_eq!(&next.display, &base.display);
        }
    }

    #[test]
    fn label_text_is_not_a_render_input() {
        let mut store = ParameterStore::new();
        assert!(!store.set(ParamChange::LabelText("Other".into())));
        assert!(store.set(ParamChange::StrokeWidth(5)));
        assert!(!store.set(ParamChange::StrokeWidth(5)));
        assert!(store.set(ParamChange::Animating(false)));
    }
}
