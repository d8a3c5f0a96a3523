//! Core library for Flux, a widget that animates a Lissajous curve with a
//! gradient stroke and exports the gradient as a CSS card.
//!
//! The crate is independent of any UI binding. Hosts plug in through three
//! traits: [`Surface`] for drawing, [`FrameHost`] for the display refresh
//! callback and [`DownloadSink`] for saving exported files. [`Session`] wires
//! them to the [`ParameterStore`] and runs the animation loop.

pub mod config;
pub mod controls;
pub mod error;
pub mod export;
pub mod gradient;
pub mod params;
pub mod record;
pub mod render;
pub mod scene;
pub mod session;
pub mod timeline;

pub use config::{AppConfig, ExportConfig, SurfaceConfig};
pub use controls::{format_phase, toggle_caption, RangeControl, Slider};
pub use error::{FluxError, Result};
pub use export::{
    CardStylesheet, DirectorySink, Download, DownloadSink, Exporter, MemorySink, CARD_FILE_NAME,
};
pub use gradient::{GradientSpec, Preset, Rgb, PRESETS};
pub use params::{CurveParameters, DisplayState, FluxState, ParamChange, ParameterStore};
pub use record::SvgSurface;
pub use render::{sample_curve, CommandRecorder, DrawCommand, Point, Renderer, Surface};
pub use scene::{LabelOverlay, PreviewScene};
pub use session::{LoopState, Session};
pub use timeline::{AnimationClock, FrameHandle, FrameHost, ManualFrameHost};
