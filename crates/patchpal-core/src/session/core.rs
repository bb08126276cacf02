use crate::context::prompts;
use crate::context::ConversationHistory;
use crate::edit::{apply_edit, parse_edit_blocks, EditBlock, FallbackEditor, PatchOutcome};
use crate::error::{PatchpalError, Result};
use crate::llm::{LlmClient, Message, StreamEvent};
use crate::project::{ChangeDetector, TrackedFiles};
use crate::session::input::{EventSink, InputEvent, InputSource, SessionEvent};
use futures::StreamExt;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Where the session is in its request/response cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    WaitInput,
    BuildRequest,
    StreamResponse,
    ApplyEdits,
    Finished,
}

/// What one round did.
#[derive(Debug, Clone, Default)]
pub struct TurnReport {
    pub response: String,
    /// Tracked files had been changed outside the session before this round.
    pub external_changes: bool,
    /// Distinct files written this round, as resolved on disk.
    pub edited: BTreeSet<PathBuf>,
}

/// An interactive editing session over a fixed set of files.
///
/// Owns everything that lives across rounds: the tracked files, the
/// modification-time bookkeeping and the committed/pending history.
pub struct Session {
    llm: Box<dyn LlmClient>,
    editor_llm: Box<dyn LlmClient>,
    files: TrackedFiles,
    detector: ChangeDetector,
    history: ConversationHistory,
    state: SessionState,
}

impl Session {
    /// `llm` drives the conversation; `editor_llm` is the cheaper model used
    /// for whole-file rewrites when a snippet cannot be located.
    pub fn new(llm: Box<dyn LlmClient>, editor_llm: Box<dyn LlmClient>, mut files: TrackedFiles) -> Self {
        let detector = ChangeDetector::new(&mut files);
        Self {
            llm,
            editor_llm,
            files,
            detector,
            history: ConversationHistory::new().with_system_prompt(prompts::MAIN_SYSTEM),
            state: SessionState::WaitInput,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.history.set_system_prompt(prompt);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn files(&self) -> &TrackedFiles {
        &self.files
    }

    /// Run rounds until the user ends the session.
    pub async fn run(&mut self, input: &mut dyn InputSource, events: &mut dyn EventSink) {
        loop {
            let Some(line) = self.wait_input(input, events) else {
                self.state = SessionState::Finished;
                tracing::debug!("Session finished");
                return;
            };

            if let Err(e) = self.run_turn(&line, events).await {
                tracing::warn!("Round failed: {e}");
                events.emit(SessionEvent::Error(e.to_string()));
            }
        }
    }

    /// Block until a non-blank line arrives. `None` ends the session.
    fn wait_input(&mut self, input: &mut dyn InputSource, events: &mut dyn EventSink) -> Option<String> {
        self.state = SessionState::WaitInput;
        let mut interrupts = 0;
        loop {
            match input.read_line() {
                InputEvent::Line(line) if line.trim().is_empty() => continue,
                InputEvent::Line(line) => return Some(line),
                InputEvent::Interrupted => {
                    interrupts += 1;
                    if interrupts >= 2 {
                        return None;
                    }
                    events.emit(SessionEvent::InterruptWarning);
                }
                InputEvent::Eof => return None,
            }
        }
    }

    /// One full round for `user_input`: change check, request, stream, edits.
    ///
    /// On a failed request the user turn is dropped again so the history
    /// looks as if the round never happened.
    pub async fn run_turn(&mut self, user_input: &str, events: &mut dyn EventSink) -> Result<TurnReport> {
        let mut report = TurnReport::default();

        self.state = SessionState::BuildRequest;
        let changed: Vec<String> = self
            .files
            .changed_since_refresh()
            .into_iter()
            .map(|f| f.display.clone())
            .collect();
        if self.detector.check(&mut self.files) {
            tracing::info!("Tracked files changed outside the session");
            self.history.commit_with_notice(prompts::FILES_CONTENT_LOCAL_EDITS);
            events.emit(SessionEvent::ExternalChanges { paths: changed });
            report.external_changes = true;
        }

        self.history.add_user_message(user_input);
        let messages = self.build_request();
        tracing::debug!(
            "Sending {} messages (~{} history tokens) to {}",
            messages.len(),
            self.history.estimate_tokens(),
            self.llm.model()
        );
        for message in &messages {
            tracing::trace!(role = ?message.role, "{}", message.content);
        }

        self.state = SessionState::StreamResponse;
        let content = match self.stream_response(&messages, events).await {
            Ok(content) => content,
            Err(e) => {
                self.history.discard_last_pending();
                self.state = SessionState::WaitInput;
                return Err(e);
            }
        };
        self.history.add_assistant_message(&content);

        self.state = SessionState::ApplyEdits;
        report.edited = self.apply_edits(&content, user_input, events).await;
        if !report.edited.is_empty() {
            self.detector.reset(&mut self.files);
            self.history.commit_with_notice(prompts::FILES_CONTENT_MODEL_EDITS);
        }

        report.response = content;
        self.state = SessionState::WaitInput;
        Ok(report)
    }

    /// The exact request for the current history: system prompt, committed
    /// turns, a fresh file snapshot, pending turns.
    pub fn build_request(&self) -> Vec<Message> {
        self.history.build_request(&self.files.snapshot())
    }

    async fn stream_response(&self, messages: &[Message], events: &mut dyn EventSink) -> Result<String> {
        let mut stream = self.llm.chat_stream(messages).await?;

        let mut content = String::new();
        while let Some(event) = stream.next().await {
            match event {
                StreamEvent::TextDelta(delta) => {
                    content.push_str(&delta);
                    events.emit(SessionEvent::TextDelta(delta));
                }
                StreamEvent::Done => break,
                StreamEvent::Error(err) => return Err(PatchpalError::Llm(err)),
            }
        }
        events.emit(SessionEvent::ResponseComplete);
        Ok(content)
    }

    /// Apply every edit block in `content`. Failures are reported per block
    /// and never stop the others. Returns the files actually written.
    async fn apply_edits(
        &self,
        content: &str,
        request: &str,
        events: &mut dyn EventSink,
    ) -> BTreeSet<PathBuf> {
        let mut edited = BTreeSet::new();

        for block in parse_edit_blocks(content) {
            match self.apply_block(&block, request, events).await {
                Ok(path) => {
                    edited.insert(path);
                }
                Err(e) => {
                    tracing::warn!("Failed to apply edit to {}: {e}", block.path);
                    events.emit(SessionEvent::EditFailed {
                        path: block.path.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        edited
    }

    async fn apply_block(&self, block: &EditBlock, request: &str, events: &mut dyn EventSink) -> Result<PathBuf> {
        let path = self.files.resolve(&block.path)?;

        match apply_edit(&path, block).await? {
            PatchOutcome::Applied => {
                events.emit(SessionEvent::EditApplied {
                    path: block.path.clone(),
                });
            }
            PatchOutcome::Created => {
                events.emit(SessionEvent::FileCreated {
                    path: block.path.clone(),
                });
            }
            PatchOutcome::NotFound => {
                let editor = FallbackEditor::new(self.editor_llm.as_ref());
                events.emit(SessionEvent::FallbackStarted {
                    path: block.path.clone(),
                    model: editor.model().to_string(),
                });
                editor.rewrite(request, block, &path).await?;
                events.emit(SessionEvent::EditApplied {
                    path: block.path.clone(),
                });
            }
        }

        Ok(path)
    }
}
