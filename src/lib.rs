//! # emoji-chaos
//!
//! Randomized emoji decoration for text, with a file workflow around it.
//!
//! ## Features
//!
//! - Four-stage chaos transformation driven by a single 1-10 level
//! - Context-aware emoji picked from keywords in the text
//! - Seedable random source for reproducible output
//! - Preview, confirmation and `.bak` backups before any write
//! - Restore from backup
//!
//! ## Quick Start
//!
//! ```
//! use emoji_chaos::{ChaosLevel, ChaosTransformer};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! # fn main() -> emoji_chaos::Result<()> {
//! let transformer = ChaosTransformer::new(ChaosLevel::new(8)?);
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let chaotic = transformer.transform("We need to talk about the project.", &mut rng);
//! assert!(chaotic.len() > "We need to talk about the project.".len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! A run follows a fixed pipeline per file:
//! 1. **Read**: Loads the file as UTF-8 text
//! 2. **Transform**: Applies emoji, punctuation, capitalization and enthusiasm stages
//! 3. **Preview**: Shows the first characters of the result
//! 4. **Confirm**: Asks through a [`Confirm`] implementation
//! 5. **Write**: Backs up the original and replaces the file atomically

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod confirm;
mod error;
mod level;
mod pipeline;
mod preview;
mod stats;

pub mod chaos;
pub mod emoji;
pub mod file;

pub use chaos::{ChaosTransformer, ENTHUSIASM_PHRASES, chaos_transform};
pub use config::{Config, ConfigBuilder, Mode};
pub use confirm::{Confirm, FixedConfirm, PromptConfirm};
pub use emoji::EmojiCategory;
pub use error::{Error, Result};
pub use file::TextFile;
pub use level::ChaosLevel;
pub use pipeline::Pipeline;
pub use preview::{DEFAULT_PREVIEW_CHARS, Preview};
pub use stats::{FileReport, Outcome, RunStats};

/// Runs the complete workflow, printing previews to stdout and asking
/// `confirm` before each write.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the run report cannot
/// be written. Per-file failures are recorded in the returned statistics.
///
/// # Examples
///
/// ```no_run
/// use emoji_chaos::{Config, PromptConfirm, run};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::builder()
///     .path("notes.txt")
///     .build()?;
///
/// run(config, PromptConfirm::stdin())?;
/// # Ok(())
/// # }
/// ```
pub fn run<C: Confirm>(config: Config, confirm: C) -> Result<RunStats> {
    Pipeline::new(config, confirm)?.run()
}
