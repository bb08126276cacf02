use crate::constants::markers::{DIVIDER, FENCE, ORIGINAL, UPDATED};
use regex::Regex;
use std::sync::LazyLock;

/// One `ORIGINAL`/`UPDATED` block found in a model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBlock {
    /// Path token exactly as the model wrote it.
    pub path: String,
    /// Text expected to be present in the file. May be empty.
    pub original: String,
    /// Text to put in its place. May be empty.
    pub updated: String,
    /// The whole matched span, handed verbatim to the fallback editor.
    pub source: String,
}

static EDIT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?ms)(\S+)\s+({fence})?{original}\n(.*?\n?){divider}\n(.*?\n?){updated}",
        fence = regex::escape(FENCE),
        original = regex::escape(ORIGINAL),
        divider = regex::escape(DIVIDER),
        updated = regex::escape(UPDATED),
    );
    Regex::new(&pattern).expect("edit block pattern is valid")
});

/// Extract every well-formed edit block from `content`, in document order.
///
/// Anything that does not fit the block grammar (missing divider, no
/// `UPDATED` terminator, ...) is skipped silently.
pub fn parse_edit_blocks(content: &str) -> Vec<EditBlock> {
    EDIT_BLOCK
        .captures_iter(content)
        .map(|caps| EditBlock {
            path: caps[1].to_string(),
            original: caps[3].to_string(),
            updated: caps[4].to_string(),
            source: caps[0].to_string(),
        })
        .collect()
}
