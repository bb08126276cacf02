use patchpal_core::{InputEvent, InputSource};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = "> ";

/// Line input backed by rustyline. History is kept in memory only.
/// Needs a multi-threaded runtime: each prompt runs under `block_in_place`.
pub struct ReadlineInput {
    editor: DefaultEditor,
    show_rule: bool,
}

impl ReadlineInput {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            show_rule: true,
        })
    }
}

impl InputSource for ReadlineInput {
    fn read_line(&mut self) -> InputEvent {
        if self.show_rule {
            println!();
            println!("{}", "=".repeat(60));
            self.show_rule = false;
        }

        let editor = &mut self.editor;
        let read = tokio::task::block_in_place(|| editor.readline(PROMPT));
        match read {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                    self.show_rule = true;
                    println!();
                }
                InputEvent::Line(line)
            }
            Err(ReadlineError::Interrupted) => InputEvent::Interrupted,
            Err(ReadlineError::Eof) => InputEvent::Eof,
            Err(err) => {
                tracing::error!("Readline error: {err}");
                InputEvent::Eof
            }
        }
    }
}
