use crate::context::prompts;
use crate::edit::parser::EditBlock;
use crate::edit::strip::strip_quoted_wrapping;
use crate::error::{PatchpalError, Result};
use crate::llm::{LlmClient, Message, StreamEvent};
use futures::StreamExt;
use std::path::Path;

/// Rewrites a whole file through an auxiliary model when an edit block's
/// original snippet cannot be found verbatim.
pub struct FallbackEditor<'a> {
    llm: &'a dyn LlmClient,
}

impl<'a> FallbackEditor<'a> {
    pub fn new(llm: &'a dyn LlmClient) -> Self {
        Self { llm }
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// Messages sent to the auxiliary model for one failed block.
    pub fn build_messages(request: &str, block: &EditBlock, path: &Path, content: &str) -> Vec<Message> {
        vec![
            Message::system(prompts::EDITOR_SYSTEM),
            Message::user(prompts::editor_user(request, &block.source, path, content)),
        ]
    }

    /// Ask the model for the new file and overwrite `path` with whatever it
    /// returns, minus filename echo and fences. The output is not validated.
    pub async fn rewrite(&self, request: &str, block: &EditBlock, path: &Path) -> Result<()> {
        tracing::info!(
            "Asking {} to apply ambiguous edit to {}",
            self.llm.model(),
            path.display()
        );

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PatchpalError::path(path, format!("failed to read: {e}")))?;
        let messages = Self::build_messages(request, block, path, &content);

        let mut stream = self.llm.chat_stream(&messages).await?;
        let mut response = String::new();
        while let Some(event) = stream.next().await {
            match event {
                StreamEvent::TextDelta(delta) => response.push_str(&delta),
                StreamEvent::Done => break,
                StreamEvent::Error(err) => return Err(PatchpalError::Llm(err)),
            }
        }

        let new_content = strip_quoted_wrapping(&response, Some(path));
        tokio::fs::write(path, new_content)
            .await
            .map_err(|e| PatchpalError::path(path, format!("failed to write: {e}")))?;
        tracing::info!("Rewrote {} via fallback editor", path.display());
        Ok(())
    }
}
