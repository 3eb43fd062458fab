use crate::error::{Error, Result};
use crate::preview::Preview;
use std::io::{BufRead, Write};
use std::path::Path;

/// Decides whether a previewed change is applied.
///
/// The preview has already been shown by the time this is called.
pub trait Confirm {
    /// Returns `true` to apply the change to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be obtained.
    fn confirm(&mut self, path: &Path, preview: &Preview) -> Result<bool>;
}

/// Always gives the same answer without any I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedConfirm(pub bool);

impl Confirm for FixedConfirm {
    fn confirm(&mut self, _path: &Path, _preview: &Preview) -> Result<bool> {
        Ok(self.0)
    }
}

/// Asks `Apply these changes? (y/n): `.
///
/// Only `y` or `Y` (surrounding whitespace ignored) counts as yes.
#[derive(Debug)]
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl PromptConfirm<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompts on the terminal.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    /// Prompts on arbitrary streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the prompt and returns the output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, path: &Path, _preview: &Preview) -> Result<bool> {
        let io_err = |e| Error::io(path, e);

        write!(self.output, "Apply these changes? (y/n): ").map_err(io_err)?;
        self.output.flush().map_err(io_err)?;

        let mut answer = String::new();
        self.input.read_line(&mut answer).map_err(io_err)?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }
}
