pub mod config;
pub mod constants;
pub mod context;
pub mod edit;
pub mod error;
pub mod llm;
pub mod project;
pub mod session;

// Re-export key types
pub use config::Settings;
pub use context::{ContextBuilder, ConversationHistory};
pub use edit::{parse_edit_blocks, EditBlock, PatchOutcome};
pub use error::PatchpalError;
pub use llm::{LlmClient, Message, Role, StreamEvent};
pub use project::{ChangeDetector, TrackedFile, TrackedFiles};
pub use session::{EventSink, InputEvent, InputSource, Session, SessionEvent, SessionState, TurnReport};
