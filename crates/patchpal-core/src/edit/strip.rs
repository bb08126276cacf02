use crate::constants::markers::FENCE;
use std::path::Path;

/// Remove the wrapping a model tends to put around a whole file.
///
/// Drops a first line that echoes the file name of `path`, then a pair of
/// code fences if both the first and last remaining lines start with one.
/// Non-empty output always ends with a newline.
pub fn strip_quoted_wrapping(text: &str, path: Option<&Path>) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut lines: Vec<&str> = text.lines().collect();

    let file_name = path.and_then(|p| p.file_name()).and_then(|n| n.to_str());
    if let Some(name) = file_name {
        if lines.first().is_some_and(|l| l.trim().ends_with(name)) {
            lines.remove(0);
        }
    }

    if lines.first().is_some_and(|l| l.starts_with(FENCE))
        && lines.last().is_some_and(|l| l.starts_with(FENCE))
    {
        lines.remove(0);
        lines.pop();
    }

    let mut out = lines.join("\n");
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
