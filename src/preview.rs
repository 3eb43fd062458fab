use std::fmt;

const BANNER_WIDTH: usize = 60;

/// Default number of characters shown in a preview.
pub const DEFAULT_PREVIEW_CHARS: usize = 500;

/// A truncated view of transformed text, shown before confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    excerpt: String,
    truncated: bool,
}

impl Preview {
    /// Builds a preview of at most `limit` characters.
    ///
    /// Truncation counts characters, not bytes, so multi-byte emoji are
    /// never split.
    #[must_use]
    pub fn new(text: &str, limit: usize) -> Self {
        match text.char_indices().nth(limit) {
            Some((cut, _)) => Self {
                excerpt: text[..cut].to_owned(),
                truncated: true,
            },
            None => Self {
                excerpt: text.to_owned(),
                truncated: false,
            },
        }
    }

    /// Returns the visible part of the text.
    #[must_use]
    pub fn excerpt(&self) -> &str {
        &self.excerpt
    }

    /// Returns true if the text was longer than the limit.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banner = "=".repeat(BANNER_WIDTH);
        writeln!(f)?;
        writeln!(f, "{banner}")?;
        writeln!(f, "PREVIEW:")?;
        writeln!(f, "{banner}")?;
        writeln!(f, "{}", self.excerpt)?;
        if self.truncated {
            writeln!(f, "... (truncated)")?;
        }
        writeln!(f, "{banner}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_not_truncated() {
        let preview = Preview::new("hello 🎉", 500);
        assert_eq!(preview.excerpt(), "hello 🎉");
        assert!(!preview.is_truncated());
    }

    #[test]
    fn test_truncates_by_chars() {
        let text = "🚀".repeat(10);
        let preview = Preview::new(&text, 4);
        assert_eq!(preview.excerpt(), "🚀🚀🚀🚀");
        assert!(preview.is_truncated());
    }

    #[test]
    fn test_exact_limit_not_truncated() {
        let preview = Preview::new("abcd", 4);
        assert_eq!(preview.excerpt(), "abcd");
        assert!(!preview.is_truncated());
    }

    #[test]
    fn test_display_layout() {
        let rendered = Preview::new("abcdef", 3).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(60));
        assert_eq!(lines[2], "PREVIEW:");
        assert_eq!(lines[4], "abc");
        assert_eq!(lines[5], "... (truncated)");
        assert_eq!(lines[6], "=".repeat(60));
    }
}
