mod common;

use common::MockLlm;
use patchpal_core::context::prompts;
use patchpal_core::edit::{
    apply_edit, parse_edit_blocks, replace_lines, strip_quoted_wrapping, EditBlock,
    FallbackEditor, PatchOutcome,
};
use patchpal_core::Role;
use std::path::Path;
use tempfile::TempDir;

fn block(path: &str, original: &str, updated: &str) -> EditBlock {
    EditBlock {
        path: path.to_string(),
        original: original.to_string(),
        updated: updated.to_string(),
        source: format!("{path}\n<<<<<<< ORIGINAL\n{original}=======\n{updated}>>>>>>> UPDATED"),
    }
}

// ========================================================================
// Edit block parser
// ========================================================================

#[test]
fn test_parse_no_blocks() {
    assert!(parse_edit_blocks("").is_empty());
    assert!(parse_edit_blocks("Sure, here is an explanation with no edits.").is_empty());
}

#[test]
fn test_parse_single_block() {
    let response = "a.py\n<<<<<<< ORIGINAL\nx = 1\n=======\nx = 2\n>>>>>>> UPDATED\n";
    let blocks = parse_edit_blocks(response);

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].path, "a.py");
    assert_eq!(blocks[0].original, "x = 1\n");
    assert_eq!(blocks[0].updated, "x = 2\n");
    assert_eq!(
        blocks[0].source,
        "a.py\n<<<<<<< ORIGINAL\nx = 1\n=======\nx = 2\n>>>>>>> UPDATED"
    );
}

#[test]
fn test_parse_blocks_in_document_order() {
    let response = "\
First change:

src/one.rs
<<<<<<< ORIGINAL
fn one() {}
=======
fn one() -> u8 { 1 }
>>>>>>> UPDATED

Then another file:

src/two.rs
<<<<<<< ORIGINAL
fn two() {}
=======
fn two() -> u8 { 2 }
>>>>>>> UPDATED

And back to the first:

src/one.rs
<<<<<<< ORIGINAL
// end
=======
// the end
>>>>>>> UPDATED
";
    let blocks = parse_edit_blocks(response);
    let paths: Vec<&str> = blocks.iter().map(|b| b.path.as_str()).collect();

    assert_eq!(paths, vec!["src/one.rs", "src/two.rs", "src/one.rs"]);
    assert_eq!(blocks[1].original, "fn two() {}\n");
    assert_eq!(blocks[2].updated, "// the end\n");
}

#[test]
fn test_parse_fenced_block() {
    let response =
        "foo.py\n```<<<<<<< ORIGINAL\nprint(1+1)\n=======\nprint(2+2)\n>>>>>>> UPDATED```\n";
    let blocks = parse_edit_blocks(response);

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].path, "foo.py");
    assert_eq!(blocks[0].original, "print(1+1)\n");
    assert_eq!(blocks[0].updated, "print(2+2)\n");
}

#[test]
fn test_parse_empty_sections() {
    let response = "new.py\n<<<<<<< ORIGINAL\n=======\nprint('hi')\n>>>>>>> UPDATED\n\
                    old.py\n<<<<<<< ORIGINAL\nremove me\n=======\n>>>>>>> UPDATED\n";
    let blocks = parse_edit_blocks(response);

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].original, "");
    assert_eq!(blocks[0].updated, "print('hi')\n");
    assert_eq!(blocks[1].original, "remove me\n");
    assert_eq!(blocks[1].updated, "");
}

#[test]
fn test_parse_unterminated_block_is_skipped() {
    let response = "a.py\n<<<<<<< ORIGINAL\nx = 1\n=======\nx = 2\n";
    assert!(parse_edit_blocks(response).is_empty());

    let no_divider = "a.py\n<<<<<<< ORIGINAL\nx = 1\n>>>>>>> UPDATED\n";
    assert!(parse_edit_blocks(no_divider).is_empty());
}

// ========================================================================
// Line replacement
// ========================================================================

#[test]
fn test_replace_tolerates_indentation_differences() {
    let content = "def f():\n    return 1\n";
    let result = replace_lines(content, "def f():\nreturn 1\n", "def f():\n    return 2\n");
    assert_eq!(result.as_deref(), Some("def f():\n    return 2\n"));
}

#[test]
fn test_replace_keeps_surrounding_lines_and_adds_newline() {
    let result = replace_lines("a\nb\nc", "b", "B");
    assert_eq!(result.as_deref(), Some("a\nB\nc\n"));
}

#[test]
fn test_replace_inserts_replacement_verbatim() {
    let content = "fn main() {\n}\n";
    let result = replace_lines(content, "fn main() {\n", "fn main() {\n\t  let x = 1;  \n");
    assert_eq!(result.as_deref(), Some("fn main() {\n\t  let x = 1;  \n}\n"));
}

#[test]
fn test_replace_first_match_wins() {
    let result = replace_lines("x\ny\nx\n", "x\n", "z\n");
    assert_eq!(result.as_deref(), Some("z\ny\nx\n"));
}

#[test]
fn test_replace_delete_lines() {
    let result = replace_lines("a\nb\nc\n", "b\n", "");
    assert_eq!(result.as_deref(), Some("a\nc\n"));
}

#[test]
fn test_replace_empty_file_with_empty_original_is_verbatim() {
    assert_eq!(replace_lines("", "", "no trailing newline").as_deref(), Some("no trailing newline"));
    assert_eq!(replace_lines("", "", "x\n\n").as_deref(), Some("x\n\n"));
}

#[test]
fn test_replace_empty_original_prepends_to_existing_content() {
    let result = replace_lines("b\n", "", "a\n");
    assert_eq!(result.as_deref(), Some("a\nb\n"));
}

#[test]
fn test_replace_missing_snippet_is_none() {
    assert_eq!(replace_lines("a\nb\n", "c\n", "d\n"), None);
    assert_eq!(replace_lines("a\nb\n", "b\na\n", "d\n"), None);
    assert_eq!(replace_lines("", "a\n", "b\n"), None);
}

#[test]
fn test_replace_does_not_match_partial_lines() {
    assert_eq!(replace_lines("let value = 1;\n", "value = 1;\n", "x\n"), None);
}

// ========================================================================
// apply_edit
// ========================================================================

#[tokio::test]
async fn test_apply_edit_rewrites_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a.py");
    std::fs::write(&path, "x = 1\n").unwrap();

    let outcome = apply_edit(&path, &block("a.py", "x = 1\n", "x = 2\n"))
        .await
        .unwrap();

    assert_eq!(outcome, PatchOutcome::Applied);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "x = 2\n");
}

#[tokio::test]
async fn test_apply_edit_creates_new_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("pkg").join("new.py");

    let outcome = apply_edit(&path, &block("pkg/new.py", "", "print('hi')\n"))
        .await
        .unwrap();

    assert_eq!(outcome, PatchOutcome::Created);
    assert!(outcome.is_applied());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "print('hi')\n");
}

#[tokio::test]
async fn test_apply_edit_not_found_leaves_file_untouched() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a.py");
    std::fs::write(&path, "x = 1\n").unwrap();

    let outcome = apply_edit(&path, &block("a.py", "y = 1\n", "y = 2\n"))
        .await
        .unwrap();

    assert_eq!(outcome, PatchOutcome::NotFound);
    assert!(!outcome.is_applied());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "x = 1\n");
}

#[tokio::test]
async fn test_apply_edit_twice_fails_second_time() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a.py");
    std::fs::write(&path, "x = 1\ny = 1\n").unwrap();
    let edit = block("a.py", "x = 1\n", "x = 2\n");

    assert_eq!(apply_edit(&path, &edit).await.unwrap(), PatchOutcome::Applied);
    assert_eq!(apply_edit(&path, &edit).await.unwrap(), PatchOutcome::NotFound);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "x = 2\ny = 1\n");
}

#[tokio::test]
async fn test_apply_edit_missing_file_with_snippet_is_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("missing.py");

    let result = apply_edit(&path, &block("missing.py", "x = 1\n", "x = 2\n")).await;

    assert!(result.is_err());
    assert!(!path.exists());
}

// ========================================================================
// Stripping model wrapping
// ========================================================================

#[test]
fn test_strip_filename_and_fences() {
    let text = "src/a.py\n```python\nline1\n  line2\n```\n";
    let stripped = strip_quoted_wrapping(text, Some(Path::new("src/a.py")));
    assert_eq!(stripped, "line1\n  line2\n");
}

#[test]
fn test_strip_fences_without_filename() {
    let stripped = strip_quoted_wrapping("```\nx = 1\n```", Some(Path::new("a.py")));
    assert_eq!(stripped, "x = 1\n");
}

#[test]
fn test_strip_plain_text_only_gains_newline() {
    assert_eq!(strip_quoted_wrapping("x = 1", None), "x = 1\n");
    assert_eq!(strip_quoted_wrapping("x = 1\n", None), "x = 1\n");
}

#[test]
fn test_strip_keeps_unmatched_fence() {
    assert_eq!(strip_quoted_wrapping("```\nx = 1\n", None), "```\nx = 1\n");
}

#[test]
fn test_strip_without_path_keeps_first_line() {
    assert_eq!(strip_quoted_wrapping("a.py\nx = 1\n", None), "a.py\nx = 1\n");
}

#[test]
fn test_strip_empty_input() {
    assert_eq!(strip_quoted_wrapping("", Some(Path::new("a.py"))), "");
}

// ========================================================================
// Fallback editor
// ========================================================================

#[tokio::test]
async fn test_fallback_rewrites_whole_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a.py");
    std::fs::write(&path, "a = 1\nb = 2\n").unwrap();

    let mock = MockLlm::new("mock-editor").with_text(&["a.py\n```\n", "a = 1\n", "b = 3\n```\n"]);
    let requests = mock.requests();
    let edit = block("a.py", "b == 2\n", "b = 3\n");

    let editor = FallbackEditor::new(&mock);
    assert_eq!(editor.model(), "mock-editor");
    editor.rewrite("set b to 3", &edit, &path).await.unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a = 1\nb = 3\n");

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let messages = &requests[0];
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[0].content, prompts::EDITOR_SYSTEM);
    assert_eq!(messages[1].role, Role::User);
    assert!(messages[1].content.contains("set b to 3"));
    assert!(messages[1].content.contains(&edit.source));
    assert!(messages[1].content.contains("a = 1\nb = 2\n"));
}

#[tokio::test]
async fn test_fallback_request_failure_leaves_file_untouched() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a.py");
    std::fs::write(&path, "a = 1\n").unwrap();

    let mock = MockLlm::new("mock-editor").with_failure("service unavailable");
    let result = FallbackEditor::new(&mock)
        .rewrite("anything", &block("a.py", "zzz\n", "yyy\n"), &path)
        .await;

    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a = 1\n");
}

#[test]
fn test_fallback_messages_quote_file() {
    let edit = block("a.py", "x\n", "y\n");
    let messages = FallbackEditor::build_messages("req", &edit, Path::new("a.py"), "x = 1");

    assert!(messages[1].content.contains("a.py\n```\nx = 1\n```\n"));
}
