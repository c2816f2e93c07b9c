//! Line-buffer helper for generated Java sources.

use std::fmt::Write as FmtWrite;

/// Four-space indent unit of the generated code.
pub const INDENT: &str = "    ";

/// A generated Java source file under construction.
#[derive(Debug, Default)]
pub struct JavaFile {
    /// The accumulated source text.
    pub buf: String,
}

impl JavaFile {
    /// Creates an empty file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line.
    pub fn line(&mut self, s: &str) {
        self.buf.push_str(s);
        self.buf.push('\n');
    }

    /// Appends a line indented by `depth` indent units.
    pub fn indented(&mut self, depth: usize, s: &str) {
        let _ = writeln!(self.buf, "{}{s}", INDENT.repeat(depth));
    }

    /// Appends an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Returns the finished source text.
    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}
