use crate::{
    chaos::ChaosTransformer,
    config::{Config, Mode},
    confirm::Confirm,
    error::{Error, Result},
    file::{self, TextFile},
    preview::Preview,
    stats::{FileReport, Outcome, RunStats},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{Stdout, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

/// Runs the read → transform → preview → confirm → backup → write cycle
/// over every configured file.
///
/// One random source, seeded once per run, is shared by all files in
/// order, so a recorded seed reproduces the whole run.
///
/// Every preview is written to the output stream (stdout unless replaced
/// with [`Pipeline::with_output`]) before the [`Confirm`] implementation
/// is asked, so changes are shown even when confirmation is automatic.
pub struct Pipeline<C, W = Stdout> {
    config: Config,
    transformer: ChaosTransformer,
    seed: u64,
    rng: ChaCha8Rng,
    confirm: C,
    output: W,
}

impl<C: Confirm> Pipeline<C> {
    /// Creates a new pipeline.
    ///
    /// Without a configured seed, one is drawn from system entropy and
    /// reported in [`RunStats::seed`].
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: Config, confirm: C) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);

        Ok(Self {
            transformer: ChaosTransformer::new(config.chaos_level),
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            confirm,
            output: std::io::stdout(),
        })
    }
}

impl<C: Confirm, W: Write> Pipeline<C, W> {
    /// Sends previews to `output` instead of stdout.
    #[must_use]
    pub fn with_output<O: Write>(self, output: O) -> Pipeline<C, O> {
        Pipeline {
            config: self.config,
            transformer: self.transformer,
            seed: self.seed,
            rng: self.rng,
            confirm: self.confirm,
            output,
        }
    }

    /// Processes every file and returns statistics.
    ///
    /// A failing file is logged and recorded as [`Outcome::Failed`]; the
    /// remaining files are still processed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the run report cannot be written.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use emoji_chaos::{Config, FixedConfirm, Pipeline};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder()
    ///     .path("notes.txt")
    ///     .chaos_level(5)
    ///     .build()?;
    ///
    /// let stats = Pipeline::new(config, FixedConfirm(true))?.run()?;
    /// stats.print_summary();
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(level = %self.config.chaos_level, seed = self.seed))]
    pub fn run(mut self) -> Result<RunStats> {
        let start_time = Instant::now();
        let paths = std::mem::take(&mut self.config.paths);

        info!("Starting run over {} file(s)", paths.len());

        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            let result = match self.config.mode {
                Mode::Transform => self.process_file(path),
                Mode::Restore => Self::restore_file(path),
            };

            let report = result.unwrap_or_else(|e| {
                if e.is_not_found() {
                    warn!("Skipping {}: {e}", path.display());
                } else {
                    error!("Error: {e}");
                }
                FileReport::failed(path, &e)
            });
            files.push(report);
        }

        let stats = RunStats {
            chaos_level: self.config.chaos_level,
            seed: self.seed,
            dry_run: self.config.dry_run,
            files,
            duration: start_time.elapsed(),
        };

        if let Some(report_path) = &self.config.report_path {
            stats.write_report(report_path)?;
        }

        info!(
            "✓ Run completed in {:.2}s",
            stats.duration.as_secs_f64()
        );

        Ok(stats)
    }

    /// Transforms one file.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    fn process_file(&mut self, path: &Path) -> Result<FileReport> {
        info!(
            "Processing {} with chaos level {}...",
            path.display(),
            self.config.chaos_level
        );

        let file = TextFile::read(path)?;
        let chaotic = self.transformer.transform(&file.content, &mut self.rng);
        let preview = Preview::new(&chaotic, self.config.preview_chars);
        writeln!(self.output, "{preview}").map_err(|e| Error::io(path, e))?;

        if self.config.dry_run {
            info!("Dry run - no changes applied.");
            return Ok(FileReport::transformed(&file, &chaotic, Outcome::DryRun));
        }

        if !self.confirm.confirm(path, &preview)? {
            warn!("Changes discarded.");
            return Ok(FileReport::transformed(&file, &chaotic, Outcome::Discarded));
        }

        let mut report = FileReport::transformed(&file, &chaotic, Outcome::Applied);

        if self.config.backup {
            let backup = file::write_backup(path, &file.content)?;
            info!("Backup created: {}", backup.display());
            report.backup = Some(backup);
        }

        file::write_text_atomic(path, &chaotic)?;
        info!("✓ Emoji chaos applied to {}!!!! 🎉🚀⭐", path.display());

        Ok(report)
    }

    /// Restores one file from its backup.
    #[instrument(skip(path), fields(path = %path.display()))]
    fn restore_file(path: &Path) -> Result<FileReport> {
        let backup = file::restore(path)?;
        info!("✓ Restored {} from backup", path.display());
        Ok(FileReport::restored(path, backup))
    }
}

impl<C, W> std::fmt::Debug for Pipeline<C, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("transformer", &self.transformer)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::FixedConfirm;
    use assert_fs::prelude::*;

    const TEXT: &str = "We need to talk about the project.\nLet's schedule a meeting!";

    fn config(path: &Path) -> crate::config::ConfigBuilder {
        Config::builder().path(path).chaos_level(9).seed(7)
    }

    #[test]
    fn test_applies_changes_with_backup() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str(TEXT).unwrap();

        let stats = Pipeline::new(config(file.path()).build().unwrap(), FixedConfirm(true))
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(stats.count(Outcome::Applied), 1);
        temp.child("notes.txt.bak").assert(TEXT);

        let expected = ChaosTransformer::new(crate::ChaosLevel::new(9).unwrap())
            .transform_seeded(TEXT, 7);
        file.assert(expected.as_str());
        assert_eq!(
            stats.files[0].backup.as_deref(),
            Some(temp.child("notes.txt.bak").path())
        );
    }

    #[test]
    fn test_no_backup_option() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str(TEXT).unwrap();

        let config = config(file.path()).backup(false).build().unwrap();
        Pipeline::new(config, FixedConfirm(true)).unwrap().run().unwrap();

        assert!(!temp.child("notes.txt.bak").exists());
        assert_ne!(std::fs::read_to_string(file.path()).unwrap(), TEXT);
    }

    #[test]
    fn test_declined_changes_leave_file_alone() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str(TEXT).unwrap();

        let stats = Pipeline::new(config(file.path()).build().unwrap(), FixedConfirm(false))
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(stats.count(Outcome::Discarded), 1);
        file.assert(TEXT);
        assert!(!temp.child("notes.txt.bak").exists());
    }

    #[test]
    fn test_dry_run_never_writes() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str(TEXT).unwrap();

        let config = config(file.path()).dry_run(true).build().unwrap();
        let stats = Pipeline::new(config, FixedConfirm(true)).unwrap().run().unwrap();

        assert_eq!(stats.count(Outcome::DryRun), 1);
        assert!(stats.files[0].emojis_added > 0);
        file.assert(TEXT);
        assert!(!temp.child("notes.txt.bak").exists());
    }

    #[test]
    fn test_missing_file_does_not_stop_run() {
        let temp = assert_fs::TempDir::new().unwrap();
        let good = temp.child("good.txt");
        good.write_str(TEXT).unwrap();
        let missing = temp.child("missing.txt");

        let config = Config::builder()
            .path(missing.path())
            .path(good.path())
            .seed(1)
            .build()
            .unwrap();
        let stats = Pipeline::new(config, FixedConfirm(true)).unwrap().run().unwrap();

        assert!(stats.has_failures());
        assert_eq!(stats.files[0].outcome, Outcome::Failed);
        assert_eq!(stats.files[1].outcome, Outcome::Applied);
        assert!(temp.child("good.txt.bak").exists());
    }

    #[test]
    fn test_restore_mode() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str(TEXT).unwrap();

        Pipeline::new(config(file.path()).build().unwrap(), FixedConfirm(true))
            .unwrap()
            .run()
            .unwrap();

        let restore = config(file.path()).mode(Mode::Restore).build().unwrap();
        let stats = Pipeline::new(restore, FixedConfirm(false)).unwrap().run().unwrap();

        assert_eq!(stats.count(Outcome::Restored), 1);
        file.assert(TEXT);
    }

    #[test]
    fn test_restore_without_backup_fails_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str(TEXT).unwrap();

        let restore = config(file.path()).mode(Mode::Restore).build().unwrap();
        let stats = Pipeline::new(restore, FixedConfirm(true)).unwrap().run().unwrap();

        assert_eq!(stats.files[0].outcome, Outcome::Failed);
        assert!(stats.files[0].error.as_deref().unwrap().contains("Backup not found"));
    }

    #[test]
    fn test_seed_is_reported_when_drawn() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str(TEXT).unwrap();

        let config = Config::builder().path(file.path()).dry_run(true).build().unwrap();
        let stats = Pipeline::new(config, FixedConfirm(true)).unwrap().run().unwrap();

        let replay = Config::builder()
            .path(file.path())
            .dry_run(true)
            .seed(stats.seed)
            .build()
            .unwrap();
        let replayed = Pipeline::new(replay, FixedConfirm(true)).unwrap().run().unwrap();

        assert_eq!(stats.files[0].output_bytes, replayed.files[0].output_bytes);
        assert_eq!(stats.files[0].emojis_added, replayed.files[0].emojis_added);
    }

    #[test]
    fn test_writes_report() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str(TEXT).unwrap();
        let report = temp.child("report.json");

        let config = config(file.path())
            .dry_run(true)
            .report_path(report.path())
            .build()
            .unwrap();
        Pipeline::new(config, FixedConfirm(true)).unwrap().run().unwrap();

        assert!(report.exists());
    }

    #[test]
    fn test_invalid_utf8_fails_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("blob.bin");
        file.write_binary(&[0xc3, 0x28]).unwrap();

        let stats = Pipeline::new(config(file.path()).build().unwrap(), FixedConfirm(true))
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(stats.files[0].outcome, Outcome::Failed);
        let expected = Error::invalid_utf8(file.path()).to_string();
        assert_eq!(stats.files[0].error.as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn test_preview_shown_before_automatic_confirm() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str(TEXT).unwrap();

        let mut shown = Vec::new();
        let stats = Pipeline::new(config(file.path()).build().unwrap(), FixedConfirm(true))
            .unwrap()
            .with_output(&mut shown)
            .run()
            .unwrap();

        assert_eq!(stats.count(Outcome::Applied), 1);
        let shown = String::from_utf8(shown).unwrap();
        let written = std::fs::read_to_string(file.path()).unwrap();
        assert!(shown.contains("PREVIEW:"));
        assert!(shown.contains(&written));
    }

    #[test]
    fn test_preview_shown_for_declined_and_dry_run() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str(TEXT).unwrap();

        for config in [
            config(file.path()).build().unwrap(),
            config(file.path()).dry_run(true).build().unwrap(),
        ] {
            let mut shown = Vec::new();
            Pipeline::new(config, FixedConfirm(false))
                .unwrap()
                .with_output(&mut shown)
                .run()
                .unwrap();
            assert_eq!(String::from_utf8(shown).unwrap().matches("PREVIEW:").count(), 1);
        }
        file.assert(TEXT);
    }
}
