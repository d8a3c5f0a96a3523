use std::{fmt, path::PathBuf};

use crate::{gradient::GradientSpec, Result};

pub const CARD_FILE_NAME: &str = "flux-card.css";
pub const CARD_MIME_TYPE: &str = "text/css";

/// Angle of the card's background gradient.
pub const CARD_GRADIENT_ANGLE: u32 = 135;

/// Static stylesheet reproducing a gradient as a 400×400 card background.
/// Only the two gradient colors vary between cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardStylesheet {
    gradient: GradientSpec,
}

impl CardStylesheet {
    pub fn new(gradient: &GradientSpec) -> Self {
        Self {
            gradient: gradient.clone(),
        }
    }
}

impl fmt::Display for CardStylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/* Flux Generated Card */
.flux-card {{
  width: 400px;
  height: 400px;
  background: {background};
  border-radius: 20px;
  display: flex;
  align-items: center;
  justify-content: center;
  box-shadow: 0 20px 60px rgba(0, 0, 0, 0.15);
  backdrop-filter: blur(20px);
}}

.flux-card h2 {{
  color: white;
  font-size: 48px;
  font-weight: 700;
  text-shadow: 0 4px 12px rgba(0, 0, 0, 0.2);
}}",
            background = self.gradient.css(CARD_GRADIENT_ANGLE),
        )
    }
}

/// Client-side "save as" for generated text files.
pub trait DownloadSink {
    fn save(&mut self, file_name: &str, mime_type: &str, contents: &str) -> Result<()>;
}

/// Saves downloads as files inside a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, file_name: &str, mime_type: &str, contents: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, contents)?;
        tracing::info!(?path, mime_type, bytes = contents.len(), "saved download");
        self.written.push(path);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime_type: String,
    pub contents: String,
}

/// Keeps downloads in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    downloads: Vec<Download>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn downloads(&self) -> &[Download] {
        &self.downloads
    }
}

impl DownloadSink for MemorySink {
    fn save(&mut self, file_name: &str, mime_type: &str, contents: &str) -> Result<()> {
        self.downloads.push(Download {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            contents: contents.to_string(),
        });
        Ok(())
    }
}

/// Turns the current gradient into a downloadable card stylesheet.
#[derive(Debug, Clone)]
pub struct Exporter {
    file_name: String,
}

impl Default for Exporter {
    fn default() -> Self {
        Self {
            file_name: CARD_FILE_NAME.to_string(),
        }
    }
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn stylesheet(&self, gradient: &GradientSpec) -> String {
        CardStylesheet::new(gradient).to_string()
    }

    /// Hands the stylesheet to `sink`. Only the sink itself can fail.
    pub fn export_card<D: DownloadSink + ?Sized>(
        &self,
        gradient: &GradientSpec,
        sink: &mut D,
    ) -> Result<()> {
        let css = self.stylesheet(gradient);
        tracing::debug!(gradient = %gradient.name, file = %self.file_name, "exporting card");
        sink.save(&self.file_name, CARD_MIME_TYPE, &css)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::{Rgb, PRESETS};

    fn hex_colors(css: &str) -> Vec<&str> {
        css.match_indices('#')
            .map(|(at, _)| &css[at..(at + 7).min(css.len())])
            .collect()
    }

    #[test]
    fn ocean_blue_card_has_only_its_two_colors() {
        let css = Exporter::new().stylesheet(&PRESETS[0].spec());

        assert!(css.contains("background: linear-gradient(135deg, #007AFF, #5856D6);"));
        assert_eq!(css.matches("linear-gradient(").count(), 1);
        assert_eq!(hex_colors(&css), vec!["#007AFF", "#5856D6"]);
    }

    #[test]
    fn template_is_fixed_apart_from_the_colors() {
        let sunset = Exporter::new().stylesheet(&PRESETS[1].spec());
        let custom = Exporter::new().stylesheet(&GradientSpec::custom(
            Rgb::from_u32(0x111111),
            Rgb::from_u32(0x222222),
        ));

        let strip = |css: &str, from: &str, to: &str| css.replace(from, "A").replace(to, "B");
        assert_eq!(
            strip(&sunset, "#FF2D55", "#FF9500"),
            strip(&custom, "#111111", "#222222")
        );
        assert!(sunset.starts_with("/* Flux Generated Card */\n.flux-card {"));
        assert!(sunset.ends_with('}'));
        assert!(sunset.contains("  width: 400px;\n  height: 400px;"));
        assert!(sunset.contains("  backdrop-filter: blur(20px);"));
        assert!(sunset.contains(".flux-card h2 {\n  color: white;"));
    }

    #[test]
    fn export_hands_the_file_to_the_sink() {
        let mut sink = MemorySink::new();
        Exporter::new()
            .export_card(&PRESETS[7].spec(), &mut sink)
            .unwrap();

        let download = &sink.downloads()[0];
        assert_eq!(download.file_name, "flux-card.css");
        assert_eq!(download.mime_type, "text/css");
        assert!(download.contents.contains("#32D74B, #64D2FF"));
    }

    #[test]
    fn directory_sink_writes_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("cards");
        let mut sink = DirectorySink::new(&dir);
        Exporter::new()
            .export_card(&PRESETS[0].spec(), &mut sink)
            .unwrap();

        let written = std::fs::read_to_string(dir.join(CARD_FILE_NAME)).unwrap();
        assert_eq!(written, Exporter::new().stylesheet(&PRESETS[0].spec()));
        assert_eq!(sink.written(), [dir.join(CARD_FILE_NAME)]);
    }
}
