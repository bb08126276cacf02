use crate::constants::conversation::ACK;
use crate::llm::Message;

/// Conversation history split in two.
///
/// `committed` turns are never edited again. `pending` turns are replayed
/// after the file snapshot on every request until the next flush. A request
/// is always `system, committed.., snapshot.., pending..`.
pub struct ConversationHistory {
    committed: Vec<Message>,
    pending: Vec<Message>,
    system_prompt: Option<String>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self {
            committed: Vec::new(),
            pending: Vec::new(),
            system_prompt: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.system_prompt = Some(prompt.into());
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.pending.push(Message::user(content));
    }

    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.pending.push(Message::assistant(content));
    }

    /// Drop the newest pending turn, e.g. a user turn whose request failed.
    pub fn discard_last_pending(&mut self) -> Option<Message> {
        self.pending.pop()
    }

    /// Move every pending turn into committed, followed by `notice` from the
    /// user and a canned assistant acknowledgement. Pending is left empty.
    pub fn commit_with_notice(&mut self, notice: impl Into<String>) {
        self.committed.append(&mut self.pending);
        self.committed.push(Message::user(notice));
        self.committed.push(Message::assistant(ACK));
    }

    /// Assemble the full request around a freshly built file snapshot.
    pub fn build_request(&self, snapshot: &[Message]) -> Vec<Message> {
        let mut messages =
            Vec::with_capacity(1 + self.committed.len() + snapshot.len() + self.pending.len());
        if let Some(ref system) = self.system_prompt {
            messages.push(Message::system(system));
        }
        messages.extend(self.committed.iter().cloned());
        messages.extend(snapshot.iter().cloned());
        messages.extend(self.pending.iter().cloned());
        messages
    }

    pub fn committed(&self) -> &[Message] {
        &self.committed
    }

    pub fn pending(&self) -> &[Message] {
        &self.pending
    }

    pub fn clear(&mut self) {
        self.committed.clear();
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.committed.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty() && self.pending.is_empty()
    }

    pub fn estimate_tokens(&self) -> usize {
        self.committed
            .iter()
            .chain(self.pending.iter())
            .map(|m| m.content.len() / 4)
            .sum()
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}
