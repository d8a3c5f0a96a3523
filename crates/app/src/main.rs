use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use flux_core::{
    AppConfig, DirectorySink, Exporter, FluxState, GradientSpec, ManualFrameHost, ParamChange,
    ParameterStore, Preset, PreviewScene, Renderer, Rgb, Session, Slider, SvgSurface, PRESETS,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

fn main() -> flux_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Presets => run_presets(),
        Commands::Export { gradient, out } => run_export(&config, &gradient, out.as_deref()),
        Commands::Render(args) => run_render(&config, &args),
        Commands::Randomize { seed } => run_randomize(seed),
    }
}

fn run_presets() -> flux_core::Result<()> {
    for (index, preset) in PRESETS.iter().enumerate() {
        println!("{index}  {:<13} {} -> {}", preset.name, preset.from, preset.to);
    }
    Ok(())
}

fn run_export(
    config: &AppConfig,
    gradient: &GradientArgs,
    out: Option<&Path>,
) -> flux_core::Result<()> {
    let gradient = gradient.resolve()?;
    let dir = out.unwrap_or(&config.export.output_dir);
    tracing::info!(gradient = %gradient.name, ?dir, "exporting card");

    let mut sink = DirectorySink::new(dir);
    Exporter::with_file_name(config.export.file_name.clone()).export_card(&gradient, &mut sink)
}

fn run_render(config: &AppConfig, args: &RenderArgs) -> flux_core::Result<()> {
    let mut state = FluxState::default();
    for change in args.changes()? {
        state = state.apply(change);
    }

    let surface = SvgSurface::new(config.surface.width, config.surface.height);
    let mut session = Session::with_parts(
        ParameterStore::with_state(state),
        Renderer::new(config.surface.clone()),
        ManualFrameHost::new(),
        surface,
    );
    session.mount();

    for refresh in 1..args.frames {
        if args.pause_after == Some(refresh) {
            session.apply(ParamChange::Animating(false));
        }
        session.pump();
    }

    tracing::info!(
        clock = session.clock().frames(),
        drawn = session.surface().frames(),
        state = ?session.loop_state(),
        "rendered frames"
    );

    let scene = PreviewScene::from_state(session.state());
    let svg = if args.preview {
        session.surface().to_preview_svg(&scene)
    } else {
        session.surface().to_svg()
    };

    if let Some(parent) = args.out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&args.out, svg)?;
    tracing::info!(out = ?args.out, "wrote frame");
    Ok(())
}

fn run_randomize(seed: Option<u64>) -> flux_core::Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let state = FluxState::default().randomized(&mut rng);
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Animated Lissajous curves and gradient CSS cards.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the gradient presets.
    Presets,
    /// Write the CSS card for a gradient.
    Export {
        #[command(flatten)]
        gradient: GradientArgs,
        /// Directory to write `flux-card.css` into.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Run the animation for a number of refreshes and save the last frame.
    Render(RenderArgs),
    /// Print a randomized parameter set as JSON.
    Randomize {
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct GradientArgs {
    /// Preset name, e.g. "Ocean Blue".
    #[arg(long, conflicts_with_all = ["from", "to"])]
    preset: Option<String>,
    /// Start color as #RRGGBB.
    #[arg(long, requires = "to")]
    from: Option<String>,
    /// End color as #RRGGBB.
    #[arg(long, requires = "from")]
    to: Option<String>,
}

impl GradientArgs {
    fn resolve(&self) -> flux_core::Result<GradientSpec> {
        match (&self.preset, &self.from, &self.to) {
            (Some(name), _, _) => Ok(Preset::find(name)?.spec()),
            (None, Some(from), Some(to)) => {
                Ok(GradientSpec::custom(from.parse::<Rgb>()?, to.parse::<Rgb>()?))
            }
            _ => Ok(GradientSpec::default()),
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[arg(long)]
    freq_a: Option<f64>,
    #[arg(long)]
    freq_b: Option<f64>,
    /// Phase in radians.
    #[arg(long)]
    phase: Option<f64>,
    #[arg(long)]
    speed: Option<f64>,
    #[arg(long)]
    stroke_width: Option<f64>,
    #[command(flatten)]
    gradient: GradientArgs,
    /// Label drawn under the curve in the preview.
    #[arg(long)]
    text: Option<String>,
    /// Display refreshes to simulate, counting the initial draw.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    frames: u64,
    /// Pause the loop before this refresh.
    #[arg(long)]
    pause_after: Option<u64>,
    /// Include the background tint and label.
    #[arg(long)]
    preview: bool,
    #[arg(short, long, default_value = "flux-frame.svg")]
    out: PathBuf,
}

impl RenderArgs {
    fn changes(&self) -> flux_core::Result<Vec<ParamChange>> {
        let sliders = [
            (Slider::FreqA, self.freq_a),
            (Slider::FreqB, self.freq_b),
            (Slider::Phase, self.phase),
            (Slider::Speed, self.speed),
            (Slider::StrokeWidth, self.stroke_width),
        ];

        let mut changes: Vec<ParamChange> = sliders
            .into_iter()
            .filter_map(|(slider, raw)| raw.map(|raw| slider.change(raw)))
            .collect();
        changes.push(ParamChange::Gradient(self.gradient.resolve()?));
        if let Some(text) = &self.text {
            changes.push(ParamChange::LabelText(text.clone()));
        }
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_accepts_a_preset_or_a_color_pair() {
        let cli = Cli::try_parse_from(["flux", "export", "--preset", "sunset"]).unwrap();
        let Commands::Export { gradient, .. } = cli.command else {
            panic!("expected export");
        };
        assert_eq!(gradient.resolve().unwrap().name, "Sunset");

        let cli = Cli::try_parse_from([
            "flux", "export", "--from", "#101010", "--to", "#fafafa",
        ])
        .unwrap();
        let Commands::Export { gradient, .. } = cli.command else {
            panic!("expected export");
        };
        let spec = gradient.resolve().unwrap();
        assert!(spec.is_custom());
        assert_eq!(spec.color_to.to_string(), "#FAFAFA");
    }

    #[test]
    fn export_rejects_mixed_gradient_flags() {
        assert!(Cli::try_parse_from(["flux", "export", "--preset", "Forest", "--from", "#000000"])
            .is_err());
        assert!(Cli::try_parse_from(["flux", "export", "--from", "#000000"]).is_err());
    }

    #[test]
    fn render_flags_are_bounded_by_the_sliders() {
        let cli = Cli::try_parse_from([
            "flux",
            "render",
            "--freq-a",
            "14",
            "--stroke-width",
            "0",
            "--text",
            "Hi",
        ])
        .unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };

        let changes = args.changes().unwrap();
        assert!(changes.contains(&ParamChange::FreqA(10)));
        assert!(changes.contains(&ParamChange::StrokeWidth(1)));
        assert!(changes.contains(&ParamChange::LabelText("Hi".into())));
        assert_eq!(args.frames, 60);
    }

    #[test]
    fn render_needs_at_least_one_frame() {
        assert!(Cli::try_parse_from(["flux", "render", "--frames", "0"]).is_err());

        let cli = Cli::try_parse_from(["flux", "render", "--frames", "1"]).unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.frames, 1);
    }
}
