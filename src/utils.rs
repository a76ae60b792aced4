//! Common utility functions shared across the codebase.

use std::path::Path;

/// Byte offsets where each line starts, for O(log n) offset → line lookups.
#[derive(Debug, Clone)]
pub struct LineIndex {
    offsets: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut offsets = vec![0]; // Line 1 starts at offset 0
        for (i, b) in content.bytes().enumerate() {
            if b == b'\n' {
                offsets.push(i + 1);
            }
        }
        Self { offsets }
    }

    /// 1-based line number of a byte offset.
    ///
    /// Equivalent to counting the newlines before `offset`, plus one.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(line) => line + 1, // Exact match at line start
            Err(line) => line,    // Falls within this line
        }
    }
}

/// Convert a path to forward-slash form.
///
/// # Examples
///
/// ```
/// use msgharvest::utils::to_slash;
/// use std::path::Path;
///
/// assert_eq!(to_slash(Path::new("templates/index.twig")), "templates/index.twig");
/// ```
pub fn to_slash(path: &Path) -> String {
    let text = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '\\' {
        text.replace('\\', "/")
    } else {
        text.into_owned()
    }
}

/// Path of `path` relative to `base` in forward-slash form, or the whole path
/// when it is not below `base`.
pub fn relative_slash_path(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(rel) if !rel.as_os_str().is_empty() => to_slash(rel),
        _ => to_slash(path),
    }
}

/// Decode backslash escapes inside the body of a quoted string literal.
///
/// Bodies without a backslash are returned as-is. If the escapes cannot be
/// decoded the raw body is kept.
///
/// # Examples
///
/// ```
/// use msgharvest::utils::unescape_quoted;
///
/// assert_eq!(unescape_quoted(r"It\'s"), "It's");
/// assert_eq!(unescape_quoted("Plain"), "Plain");
/// ```
pub fn unescape_quoted(body: &str) -> String {
    if !body.contains('\\') {
        return body.to_string();
    }

    // Decode as one double-quoted word; bare double quotes in the body are
    // literal, so they get escaped first.
    let mut quoted = String::with_capacity(body.len() + 8);
    quoted.push('"');
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                quoted.push(c);
                if let Some(next) = chars.next() {
                    quoted.push(next);
                }
            }
            '"' => quoted.push_str("\\\""),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');

    snailquote::unescape(&quoted).unwrap_or_else(|_| body.to_string())
}
