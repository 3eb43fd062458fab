use crate::error::{Error, Result};
use crate::level::ChaosLevel;
use crate::preview::DEFAULT_PREVIEW_CHARS;
use std::path::PathBuf;

/// What a run does with its files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Transform files, preview, confirm, back up and write
    #[default]
    Transform,
    /// Put files back from their `.bak` backups
    Restore,
}

/// Configuration for an emoji-chaos run.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Files to process
    pub paths: Vec<PathBuf>,

    /// Transform or restore
    pub mode: Mode,

    /// Transformation intensity
    pub chaos_level: ChaosLevel,

    /// Preview only, never write
    pub dry_run: bool,

    /// Write `<file>.bak` before applying changes
    pub backup: bool,

    /// Fixed random seed; fresh entropy when `None`
    pub seed: Option<u64>,

    /// Number of characters shown in the preview
    pub preview_chars: usize,

    /// Where to write a JSON run report
    pub report_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use emoji_chaos::Config;
    ///
    /// let config = Config::builder()
    ///     .path("notes.txt")
    ///     .chaos_level(3)
    ///     .seed(42)
    ///     .build()
    ///     .expect("valid configuration");
    /// assert_eq!(config.chaos_level.get(), 3);
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// File existence is not checked here: a missing file fails only that
    /// file's processing, not the whole run.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No paths are given
    /// - The preview length is zero
    pub fn validate(&self) -> Result<()> {
        if self.paths.is_empty() {
            return Err(Error::config("at least one file path is required"));
        }

        if self.preview_chars == 0 {
            return Err(Error::config("preview_chars must be greater than 0"));
        }

        if self.mode == Mode::Restore && self.dry_run {
            tracing::warn!("dry_run has no effect when restoring from backups");
        }

        Ok(())
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    paths: Vec<PathBuf>,
    mode: Mode,
    chaos_level: Option<u8>,
    dry_run: bool,
    backup: Option<bool>,
    seed: Option<u64>,
    preview_chars: Option<usize>,
    report_path: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Adds a file to process.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Adds several files to process.
    #[must_use]
    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Sets the run mode.
    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the chaos level (validated in [`build`](Self::build)).
    #[must_use]
    pub fn chaos_level(mut self, level: u8) -> Self {
        self.chaos_level = Some(level);
        self
    }

    /// Enables dry run mode (no file writes).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Enables or disables backup creation.
    #[must_use]
    pub fn backup(mut self, enabled: bool) -> Self {
        self.backup = Some(enabled);
        self
    }

    /// Fixes the random seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the preview length in characters.
    #[must_use]
    pub fn preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = Some(chars);
        self
    }

    /// Writes a JSON run report to `path`.
    #[must_use]
    pub fn report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the chaos level is outside `1..=10` or validation
    /// fails.
    pub fn build(self) -> Result<Config> {
        let chaos_level = match self.chaos_level {
            Some(level) => ChaosLevel::new(level)?,
            None => ChaosLevel::default(),
        };

        let config = Config {
            paths: self.paths,
            mode: self.mode,
            chaos_level,
            dry_run: self.dry_run,
            backup: self.backup.unwrap_or(true),
            seed: self.seed,
            preview_chars: self.preview_chars.unwrap_or(DEFAULT_PREVIEW_CHARS),
            report_path: self.report_path,
        };

        config.validate()?;
        Ok(config)
    }
}
