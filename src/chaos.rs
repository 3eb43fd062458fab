//! The four-stage chaos transformation.
//!
//! Stages run in a fixed order, each consuming the previous stage's output:
//!
//! 1. [`add_emojis`]: emoji after every Nth word, N shrinking with the level
//! 2. [`multiply_punctuation`]: `!` and `?` repeated `level / 2` times
//! 3. [`capitalize_randomly`]: each word uppercased with probability `level / 10`
//! 4. [`add_enthusiasm`]: exclamatory phrases on their own lines from level 6
//!
//! Every stage draws from a caller-supplied random source, so a seeded
//! generator gives reproducible output. Stage functions take the raw level
//! and never panic, including for `0` and values above `10`.

use crate::emoji::{EmojiCategory, category_for_word, is_emoji, random_emoji};
use crate::level::ChaosLevel;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Phrases injected by [`add_enthusiasm`].
pub const ENTHUSIASM_PHRASES: [&str; 7] = [
    "This is SO EXCITING!!!",
    "WOW!!!",
    "AMAZING!!!",
    "Can you BELIEVE this???",
    "This is INCREDIBLE!!!",
    "SO COOL!!!",
    "FANTASTIC!!!",
];

/// Maximum number of phrases a single call injects.
const MAX_PHRASES: usize = 3;

/// Applies randomized emoji chaos at a fixed level.
///
/// # Examples
///
/// ```
/// use emoji_chaos::{ChaosLevel, ChaosTransformer};
///
/// let transformer = ChaosTransformer::new(ChaosLevel::new(4)?);
/// let first = transformer.transform_seeded("Let's schedule a meeting!", 42);
/// let second = transformer.transform_seeded("Let's schedule a meeting!", 42);
/// assert_eq!(first, second);
/// # Ok::<(), emoji_chaos::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChaosTransformer {
    level: ChaosLevel,
}

impl ChaosTransformer {
    /// Creates a transformer for the given level.
    #[must_use]
    pub const fn new(level: ChaosLevel) -> Self {
        Self { level }
    }

    /// Returns the configured level.
    #[must_use]
    pub const fn level(&self) -> ChaosLevel {
        self.level
    }

    /// Runs all four stages over `text`.
    pub fn transform<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let output = chaos_transform(text, self.level.get(), rng);
        debug!(
            level = self.level.get(),
            input_bytes = text.len(),
            output_bytes = output.len(),
            "Applied chaos transformation"
        );
        output
    }

    /// Runs all four stages with a generator seeded from `seed`.
    #[must_use]
    pub fn transform_seeded(&self, text: &str, seed: u64) -> String {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.transform(text, &mut rng)
    }
}

/// Runs all four stages with an unvalidated level.
///
/// Levels outside `1..=10` are accepted: `0` behaves like the lowest tier
/// with no capitalization, values above `10` behave like `10` with longer
/// punctuation runs and more emoji per phrase.
pub fn chaos_transform<R: Rng + ?Sized>(text: &str, level: u8, rng: &mut R) -> String {
    let text = add_emojis(text, level, rng);
    let text = multiply_punctuation(&text, level, rng);
    let text = capitalize_randomly(&text, level, rng);
    add_enthusiasm(&text, level, rng)
}

/// Draws how many words separate two emoji insertions.
pub fn emoji_period<R: Rng + ?Sized>(level: u8, rng: &mut R) -> usize {
    match level {
        0..=3 => rng.gen_range(8..=10),
        4..=6 => rng.gen_range(4..=6),
        7..=8 => rng.gen_range(2..=3),
        _ => 1,
    }
}

/// Appends emoji after every Nth word.
///
/// Words are counted across the whole text. The first emoji of an insertion
/// point follows the keyword category of the word it trails; level 8 and up
/// adds a second pool emoji half of the time, level 10 and up always adds a
/// third.
pub fn add_emojis<R: Rng + ?Sized>(text: &str, level: u8, rng: &mut R) -> String {
    let period = emoji_period(level, rng);
    let mut word_index = 0_usize;

    map_lines(text, |line| {
        let mut tokens: Vec<&str> = Vec::new();
        for word in line.split_whitespace() {
            tokens.push(word);
            word_index += 1;

            if word_index % period != 0 {
                continue;
            }

            tokens.push(random_emoji(rng, category_for_word(word)));
            if level >= 8 && rng.gen_bool(0.5) {
                tokens.push(random_emoji(rng, None));
            }
            if level >= 10 {
                tokens.push(random_emoji(rng, None));
            }
        }
        tokens.join(" ")
    })
}

/// Repeats `!` and `?` `level / 2` times; from level 5, turns periods into `!!!`.
///
/// At levels 0 to 2 the multiplier is zero, so `!` and `?` are removed.
/// The period rewrite is a single coin flip: either every `.` changes or
/// none does.
pub fn multiply_punctuation<R: Rng + ?Sized>(text: &str, level: u8, rng: &mut R) -> String {
    let multiplier = usize::from(level / 2);
    let output = text
        .replace('!', &"!".repeat(multiplier))
        .replace('?', &"?".repeat(multiplier));

    if level >= 5 && rng.gen_bool(0.5) {
        return output.replace('.', "!!!");
    }
    output
}

/// Uppercases each word independently with probability `level / 10`.
pub fn capitalize_randomly<R: Rng + ?Sized>(text: &str, level: u8, rng: &mut R) -> String {
    map_lines(text, |line| {
        line.split_whitespace()
            .map(|word| {
                if rng.gen_range(1..=10_u8) <= level {
                    word.to_uppercase()
                } else {
                    word.to_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// Injects enthusiastic phrases as whole lines from level 6.
///
/// Picks `min(level - 5, 3)` distinct phrases and decorates each with
/// `level - 5` excited emoji. A phrase lands at a random line position half
/// of the time when the text already has line breaks, otherwise it is
/// appended as a new last line. Text with `\r\n` endings gets `\r\n` lines.
pub fn add_enthusiasm<R: Rng + ?Sized>(text: &str, level: u8, rng: &mut R) -> String {
    if level < 6 {
        return text.to_owned();
    }

    let extra_emojis = usize::from(level - 5);
    let phrases: Vec<&str> = ENTHUSIASM_PHRASES
        .choose_multiple(rng, extra_emojis.min(MAX_PHRASES))
        .copied()
        .collect();

    let eol = line_ending(text);
    let mut output = text.to_owned();
    for phrase in phrases {
        let mut decorated = phrase.to_owned();
        for _ in 0..extra_emojis {
            decorated.push(' ');
            decorated.push_str(random_emoji(rng, Some(EmojiCategory::Excited)));
        }

        if rng.gen_bool(0.5) && memchr::memchr(b'\n', output.as_bytes()).is_some() {
            let mut lines: Vec<&str> = output.split(eol).collect();
            let position = rng.gen_range(0..=lines.len());
            lines.insert(position, &decorated);
            let joined = lines.join(eol);
            output = joined;
        } else {
            output.push_str(eol);
            output.push_str(&decorated);
        }
    }
    output
}

/// Counts whitespace-separated tokens that are catalogue emoji.
#[must_use]
pub fn count_emojis(text: &str) -> usize {
    text.split_whitespace().filter(|token| is_emoji(token)).count()
}

/// Applies `f` to every line, keeping each line's own `\n` or `\r\n` ending.
fn map_lines(text: &str, mut f: impl FnMut(&str) -> String) -> String {
    text.split('\n')
        .map(|line| match line.strip_suffix('\r') {
            Some(body) => f(body) + "\r",
            None => f(line),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns `\r\n` for text that already uses it, `\n` otherwise.
fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") { "\r\n" } else { "\n" }
}
