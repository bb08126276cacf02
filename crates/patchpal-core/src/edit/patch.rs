use crate::edit::parser::EditBlock;
use crate::error::{PatchpalError, Result};
use std::path::Path;

/// Result of applying one edit block with plain search/replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The original snippet was located and replaced.
    Applied,
    /// The file did not exist and was created from the replacement text.
    Created,
    /// The original snippet is not in the file. Nothing was written.
    NotFound,
}

impl PatchOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, PatchOutcome::NotFound)
    }
}

/// Apply `block` to the file at `path` (already resolved by the caller).
///
/// An empty `original` against a missing file is a request to create it.
/// Otherwise the file must exist.
pub async fn apply_edit(path: &Path, block: &EditBlock) -> Result<PatchOutcome> {
    let mut created = false;
    if block.original.is_empty() && !tokio::fs::try_exists(path).await? {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, "").await?;
        tracing::info!("Creating empty file: {}", path.display());
        created = true;
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PatchpalError::path(path, format!("failed to read: {e}")))?;

    let Some(new_content) = replace_lines(&content, &block.original, &block.updated) else {
        return Ok(PatchOutcome::NotFound);
    };

    tokio::fs::write(path, new_content)
        .await
        .map_err(|e| PatchpalError::path(path, format!("failed to write: {e}")))?;
    tracing::info!("Applied edit to {}", path.display());

    Ok(if created {
        PatchOutcome::Created
    } else {
        PatchOutcome::Applied
    })
}

/// Replace the first run of lines in `content` matching `original` with `updated`.
///
/// Lines are compared after trimming surrounding whitespace on both sides;
/// the replacement is inserted untrimmed. Returns `None` when there is no
/// match. When both `original` and `content` are empty the result is
/// `updated` unchanged; in every other case it ends with exactly one `\n`.
pub fn replace_lines(content: &str, original: &str, updated: &str) -> Option<String> {
    let content_lines: Vec<&str> = content.lines().collect();

    if original.is_empty() && content_lines.is_empty() {
        return Some(updated.to_string());
    }

    let needle: Vec<&str> = original.lines().map(str::trim).collect();
    let haystack: Vec<&str> = content_lines.iter().map(|l| l.trim()).collect();
    let start = find_window(&haystack, &needle)?;

    let mut lines: Vec<&str> = Vec::new();
    lines.extend_from_slice(&content_lines[..start]);
    lines.extend(updated.lines());
    lines.extend_from_slice(&content_lines[start + needle.len()..]);

    let mut out = lines.join("\n");
    out.push('\n');
    Some(out)
}

/// Index of the first window of `haystack` equal to `needle`. Earliest wins.
fn find_window(haystack: &[&str], needle: &[&str]) -> Option<usize> {
    (0..haystack.len()).find(|&i| haystack[i..].starts_with(needle))
}
