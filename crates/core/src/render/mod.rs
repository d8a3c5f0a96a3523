//! Curve sampling and the drawing-surface abstraction.

use std::f64::consts::PI;

use crate::{
    config::SurfaceConfig,
    gradient::{GradientSpec, Rgb},
    params::{CurveParameters, FluxState},
    timeline::AnimationClock,
};

/// Clock-to-parameter drift per frame, multiplied by the speed.
const DRIFT_PER_FRAME: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgb,
}

/// Two-stop linear gradient between `start` and `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: [ColorStop; 2],
}

impl LinearGradient {
    /// Spans the whole surface from the top-left to the bottom-right corner.
    pub fn across(width: f64, height: f64, gradient: &GradientSpec) -> Self {
        Self {
            start: Point::new(0.0, 0.0),
            end: Point::new(width, height),
            stops: [
                ColorStop {
                    offset: 0.0,
                    color: gradient.color_from,
                },
                ColorStop {
                    offset: 1.0,
                    color: gradient.color_to,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Round,
}

impl LineCap {
    /// Keyword shared by canvas `lineCap` and SVG `stroke-linecap`.
    pub fn keyword(&self) -> &'static str {
        match self {
            LineCap::Round => "round",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Round,
}

impl LineJoin {
    pub fn keyword(&self) -> &'static str {
        match self {
            LineJoin::Round => "round",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub gradient: LinearGradient,
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
}

/// A 2D drawing target such as a browser canvas.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle);
}

/// Samples the curve at `segments + 1` evenly spaced parameter values.
///
/// The arithmetic follows `t = (i / n)·2π + clock·speed·0.01`,
/// `x = cx + R·sin(a·t + δ)`, `y = cy + R·sin(b·t)` term for term, so equal
/// inputs give bit-identical points.
pub fn sample_curve(
    curve: &CurveParameters,
    clock: AnimationClock,
    surface: &SurfaceConfig,
) -> Vec<Point> {
    let center_x = surface.width / 2.0;
    let center_y = surface.height / 2.0;
    let radius = surface.width.min(surface.height) / 2.0 - surface.margin;
    let a = f64::from(curve.freq_a);
    let b = f64::from(curve.freq_b);
    let drift = clock.frames() as f64 * curve.speed * DRIFT_PER_FRAME;
    let n = surface.segments.max(1);

    (0..=n)
        .map(|i| {
            let t = (i as f64 / n as f64) * PI * 2.0 + drift;
            Point::new(
                center_x + radius * (a * t + curve.phase).sin(),
                center_y + radius * (b * t).sin(),
            )
        })
        .collect()
}

/// Draws single frames of the curve onto a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: SurfaceConfig,
}

impl Renderer {
    pub fn new(config: SurfaceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Clears the surface and strokes the curve for the given clock value.
    /// The geometry follows the surface's actual size.
    pub fn draw_frame<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        state: &FluxState,
        clock: AnimationClock,
    ) {
        let geometry = SurfaceConfig {
            width: surface.width(),
            height: surface.height(),
            ..self.config.clone()
        };

        surface.clear();
        let style = StrokeStyle {
            gradient: LinearGradient::across(geometry.width, geometry.height, &state.gradient),
            width: f64::from(state.curve.stroke_width),
            cap: LineCap::Round,
            join: LineJoin::Round,
        };
        let points = sample_curve(&state.curve, clock, &geometry);
        surface.stroke_polyline(&points, &style);
    }
}

/// One recorded call against a [`CommandRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Stroke {
        points: Vec<Point>,
        style: StrokeStyle,
    },
}

/// [`Surface`] that records every call, used to observe draw counts.
#[derive(Debug, Clone)]
pub struct CommandRecorder {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Stroke { .. }))
            .count()
    }

    pub fn last_stroke(&self) -> Option<(&[Point], &StrokeStyle)> {
        self.commands.iter().rev().find_map(|command| match command {
            DrawCommand::Stroke { points, style } => Some((points.as_slice(), style)),
            DrawCommand::Clear => None,
        })
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for CommandRecorder {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) {
        self.commands.push(DrawCommand::Stroke {
            points: points.to_vec(),
            style: style.clone(),
        });
    }
}
