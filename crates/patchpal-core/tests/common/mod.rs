#![allow(dead_code)]

use futures::channel::mpsc::{unbounded, UnboundedReceiver};
use patchpal_core::{LlmClient, Message, PatchpalError, StreamEvent};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

/// Mock LLM that replays scripted stream event sequences in order and
/// records every request it receives.
pub struct MockLlm {
    model: String,
    responses: Arc<Mutex<VecDeque<Result<Vec<StreamEvent>, String>>>>,
    requests: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockLlm {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a response streamed as the given fragments, then `Done`.
    pub fn with_text(self, fragments: &[&str]) -> Self {
        let mut events: Vec<StreamEvent> = fragments
            .iter()
            .map(|f| StreamEvent::TextDelta(f.to_string()))
            .collect();
        events.push(StreamEvent::Done);
        self.with_events(events)
    }

    pub fn with_events(self, events: Vec<StreamEvent>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(events));
        self
    }

    /// Queue a request that fails before streaming starts.
    pub fn with_failure(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    /// Handle to the recorded requests that survives moving the mock.
    pub fn requests(&self) -> Arc<Mutex<Vec<Vec<Message>>>> {
        self.requests.clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlm {
    fn model(&self) -> &str {
        &self.model
    }

    async fn chat_stream(
        &self,
        messages: &[Message],
    ) -> Result<UnboundedReceiver<StreamEvent>, PatchpalError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![StreamEvent::Done]));
        let events = next.map_err(PatchpalError::Llm)?;

        let (tx, rx) = unbounded();
        for event in events {
            tx.unbounded_send(event).unwrap();
        }
        Ok(rx)
    }
}

/// Move a file's modification time into the future so a change is visible
/// regardless of filesystem timestamp resolution.
pub fn bump_mtime(path: &Path, secs: u64) {
    let file = std::fs::OpenOptions::new().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() + Duration::from_secs(secs))
        .unwrap();
}
