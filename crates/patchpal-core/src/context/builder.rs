use crate::constants::conversation::ACK;
use crate::context::prompts::{FILES_CONTENT_PREFIX, FILES_CONTENT_SUFFIX};
use crate::llm::Message;

/// Builds the file-contents snapshot shown to the model each round.
pub struct ContextBuilder {
    files: Vec<(String, String)>,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    pub fn add_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// The snapshot text: every file quoted in a code fence under its path.
    pub fn build(&self) -> String {
        let mut context = String::from(FILES_CONTENT_PREFIX);
        for (path, content) in &self.files {
            context.push_str(&format!("\n{}\n```\n{}\n```\n", path, content));
        }
        context.push_str(FILES_CONTENT_SUFFIX);
        context
    }

    /// The snapshot as a user turn plus the assistant's acknowledgement.
    pub fn into_messages(self) -> Vec<Message> {
        vec![Message::user(self.build()), Message::assistant(ACK)]
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
