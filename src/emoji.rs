//! Emoji catalogue and keyword-based category selection.

use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// A named, fixed set of emoji symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiCategory {
    /// Party and sparkle symbols
    Celebration,
    /// Hype symbols, also used for enthusiasm phrases
    Excited,
    /// Reflective symbols
    Thinking,
    /// Clocks and calendars
    Time,
    /// Mail, chat and devices
    Communication,
    /// Office and goal symbols
    Work,
    /// Question marks and shrugs
    Question,
}

impl EmojiCategory {
    /// All categories in pool order.
    pub const ALL: [Self; 7] = [
        Self::Celebration,
        Self::Excited,
        Self::Thinking,
        Self::Time,
        Self::Communication,
        Self::Work,
        Self::Question,
    ];

    /// Returns the category name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Celebration => "celebration",
            Self::Excited => "excited",
            Self::Thinking => "thinking",
            Self::Time => "time",
            Self::Communication => "communication",
            Self::Work => "work",
            Self::Question => "question",
        }
    }

    /// Returns the symbols of this category.
    #[must_use]
    pub const fn symbols(self) -> &'static [&'static str] {
        match self {
            Self::Celebration => &["🎉", "🎊", "🎈", "🎆", "🎇", "✨", "💫", "⭐", "🌟"],
            Self::Excited => &["🚀", "💥", "🔥", "💪", "👍", "👏", "🙌", "🤩", "😍"],
            Self::Thinking => &["🤔", "💭", "🧠", "💡", "📝", "📊", "📈", "📉", "📌"],
            Self::Time => &["⏰", "⏱️", "⌚", "📅", "📆", "🗓️"],
            Self::Communication => &["📧", "💬", "💭", "📞", "📱", "💻", "⌨️"],
            Self::Work => &["💼", "📊", "📈", "🎯", "✅", "📋", "🗂️"],
            Self::Question => &["❓", "❔", "🤷", "🙋", "💭"],
        }
    }
}

/// Keyword triggers, checked in this order. The first match wins.
const KEYWORD_TABLE: [(EmojiCategory, &[&str]); 4] = [
    (EmojiCategory::Time, &["meet", "schedule", "time", "date"]),
    (
        EmojiCategory::Communication,
        &["email", "message", "call", "talk"],
    ),
    (EmojiCategory::Work, &["work", "project", "task", "goal"]),
    (EmojiCategory::Thinking, &["think", "question", "wonder"]),
];

// Duplicates across categories are kept, so shared symbols weigh more.
static EMOJI_POOL: Lazy<Vec<&'static str>> = Lazy::new(|| {
    EmojiCategory::ALL
        .iter()
        .flat_map(|category| category.symbols().iter().copied())
        .collect()
});

/// Returns every emoji of every category, in category order.
#[must_use]
pub fn emoji_pool() -> &'static [&'static str] {
    &EMOJI_POOL
}

/// Returns true if `token` is one of the catalogue's emoji.
#[must_use]
pub fn is_emoji(token: &str) -> bool {
    EMOJI_POOL.iter().any(|emoji| *emoji == token)
}

/// Picks the category hinted at by a word, if any.
///
/// Matching is a case-insensitive substring search, so "Meeting" and
/// "timeline" both select [`EmojiCategory::Time`].
#[must_use]
pub fn category_for_word(word: &str) -> Option<EmojiCategory> {
    let lower = word.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(*k)))
        .map(|(category, _)| *category)
}

/// Picks a random emoji from `category`, or from the whole pool.
pub fn random_emoji<R: Rng + ?Sized>(rng: &mut R, category: Option<EmojiCategory>) -> &'static str {
    let choices = category.map_or_else(emoji_pool, EmojiCategory::symbols);
    // Neither the pool nor any category is empty.
    choices.choose(rng).copied().unwrap_or("✨")
}
