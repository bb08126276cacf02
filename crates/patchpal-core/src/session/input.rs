/// One result of waiting for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    /// Ctrl-C while the prompt was showing.
    Interrupted,
    /// Ctrl-D or closed stdin.
    Eof,
}

/// Where the session reads user turns from.
///
/// `read_line` is called directly from the async session loop, so a blocking
/// implementation holds a runtime worker for the whole wait. Wrap the wait in
/// `tokio::task::block_in_place` on a multi-threaded runtime.
pub trait InputSource {
    fn read_line(&mut self) -> InputEvent;
}

/// Events emitted while the session runs - the interface to the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// First interrupt at the prompt; a second one ends the session.
    InterruptWarning,
    /// Tracked files changed on disk since the last round.
    ExternalChanges { paths: Vec<String> },
    /// A fragment of the model's response, verbatim.
    TextDelta(String),
    ResponseComplete,
    FileCreated { path: String },
    EditApplied { path: String },
    FallbackStarted { path: String, model: String },
    EditFailed { path: String, error: String },
    /// A round failed before any edit was attempted.
    Error(String),
}

/// Receives session events as they happen.
pub trait EventSink {
    fn emit(&mut self, event: SessionEvent);
}

impl EventSink for tokio::sync::mpsc::UnboundedSender<SessionEvent> {
    fn emit(&mut self, event: SessionEvent) {
        let _ = self.send(event);
    }
}

impl EventSink for Vec<SessionEvent> {
    fn emit(&mut self, event: SessionEvent) {
        self.push(event);
    }
}
