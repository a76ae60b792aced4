use std::fmt;

/// A location where a message was found.
///
/// The line is absent for sources that have no meaningful line numbers,
/// such as values flattened out of project config files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference {
    /// Path relative to the scan base, always with forward slashes.
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: Option<usize>,
}

impl Reference {
    pub fn new(file_path: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            file_path: file_path.into(),
            line,
        }
    }

    pub fn with_line(file_path: impl Into<String>, line: usize) -> Self {
        Self::new(file_path, Some(line))
    }

    pub fn without_line(file_path: impl Into<String>) -> Self {
        Self::new(file_path, None)
    }

    /// Parse the `file:line` / `file` form written by [`fmt::Display`].
    pub fn parse(text: &str) -> Self {
        match text.rsplit_once(':') {
            Some((file, line)) if !file.is_empty() => match line.parse::<usize>() {
                Ok(line) => Self::with_line(file, line),
                Err(_) => Self::without_line(text),
            },
            _ => Self::without_line(text),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.file_path, line),
            None => write!(f, "{}", self.file_path),
        }
    }
}
