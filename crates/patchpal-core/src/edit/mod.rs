//! Edit blocks: parsing model output and applying it to files.

mod fallback;
mod parser;
mod patch;
mod strip;

pub use fallback::FallbackEditor;
pub use parser::{parse_edit_blocks, EditBlock};
pub use patch::{apply_edit, replace_lines, PatchOutcome};
pub use strip::strip_quoted_wrapping;
