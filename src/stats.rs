use crate::chaos::count_emojis;
use crate::error::{Error, Result};
use crate::file::TextFile;
use crate::level::ChaosLevel;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Transformed text was written
    Applied,
    /// Previewed only
    DryRun,
    /// The user declined the change
    Discarded,
    /// File was put back from its backup
    Restored,
    /// Processing stopped with an error
    Failed,
}

/// Per-file result of a run.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// File that was processed
    pub path: PathBuf,

    /// What happened
    pub outcome: Outcome,

    /// Size before transformation
    pub input_bytes: usize,

    /// Size after transformation
    pub output_bytes: usize,

    /// Words before transformation
    pub input_words: usize,

    /// Words after transformation
    pub output_words: usize,

    /// Catalogue emoji added by the transformation
    pub emojis_added: usize,

    /// Backup written or restored from
    pub backup: Option<PathBuf>,

    /// Error message for failed files
    pub error: Option<String>,
}

impl FileReport {
    /// Describes a transformation of `file` into `output`.
    #[must_use]
    pub fn transformed(file: &TextFile, output: &str, outcome: Outcome) -> Self {
        Self {
            path: file.path.clone(),
            outcome,
            input_bytes: file.size_bytes(),
            output_bytes: output.len(),
            input_words: file.word_count(),
            output_words: output.split_whitespace().count(),
            emojis_added: count_emojis(output).saturating_sub(count_emojis(&file.content)),
            backup: None,
            error: None,
        }
    }

    /// Describes a file restored from `backup`.
    #[must_use]
    pub fn restored(path: &Path, backup: PathBuf) -> Self {
        Self {
            backup: Some(backup),
            ..Self::empty(path, Outcome::Restored)
        }
    }

    /// Describes a file whose processing failed.
    #[must_use]
    pub fn failed(path: &Path, error: &Error) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::empty(path, Outcome::Failed)
        }
    }

    fn empty(path: &Path, outcome: Outcome) -> Self {
        Self {
            path: path.to_path_buf(),
            outcome,
            input_bytes: 0,
            output_bytes: 0,
            input_words: 0,
            output_words: 0,
            emojis_added: 0,
            backup: None,
            error: None,
        }
    }
}

/// Statistics collected during a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// Level used for every file
    pub chaos_level: ChaosLevel,

    /// Seed of the run's random source; rerun with it to reproduce output
    pub seed: u64,

    /// Whether writes were skipped
    pub dry_run: bool,

    /// Per-file results, in processing order
    pub files: Vec<FileReport>,

    /// Total execution time
    pub duration: Duration,
}

#[derive(Serialize)]
struct RunReport<'a> {
    generated_at: String,
    #[serde(flatten)]
    stats: &'a RunStats,
}

impl RunStats {
    /// Returns the number of files with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        self.files.iter().filter(|f| f.outcome == outcome).count()
    }

    /// Returns true if any file failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.count(Outcome::Failed) > 0
    }

    /// Returns the total number of emoji added across files.
    #[must_use]
    pub fn total_emojis_added(&self) -> usize {
        self.files.iter().map(|f| f.emojis_added).sum()
    }

    /// Writes the statistics as pretty JSON with a generation timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the report file cannot be written.
    pub fn write_report(&self, path: &Path) -> Result<()> {
        let report = RunReport {
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            stats: self,
        };

        let file = fs::File::create(path).map_err(|e| Error::io(path, e))?;
        serde_json::to_writer_pretty(file, &report)?;

        info!("Wrote run report to {}", path.display());
        Ok(())
    }

    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║               Emoji Chaos Run Summary                 ║");
        println!("╠═══════════════════════════════════════════════════════╣");
        println!(
            "║ Chaos Level:          {:>8}                        ║",
            self.chaos_level
        );
        println!("║ Seed:                 {:>20}            ║", self.seed);
        println!("║                                                       ║");
        println!(
            "║ Files:                {:>8}                        ║",
            self.files.len()
        );
        println!(
            "║   - Applied:          {:>8}                        ║",
            self.count(Outcome::Applied)
        );
        println!(
            "║   - Dry run:          {:>8}                        ║",
            self.count(Outcome::DryRun)
        );
        println!(
            "║   - Discarded:        {:>8}                        ║",
            self.count(Outcome::Discarded)
        );
        println!(
            "║   - Restored:         {:>8}                        ║",
            self.count(Outcome::Restored)
        );
        println!(
            "║   - Failed:           {:>8}                        ║",
            self.count(Outcome::Failed)
        );
        println!("║                                                       ║");
        println!(
            "║ Emojis Added:         {:>8}                        ║",
            self.total_emojis_added()
        );
        println!(
            "║ Total Time:           {:>8.2}s                       ║",
            self.duration.as_secs_f64()
        );
        println!("╚═══════════════════════════════════════════════════════╝\n");
    }
}
