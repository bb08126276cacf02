mod core;
mod input;

pub use self::core::{Session, SessionState, TurnReport};
pub use input::{EventSink, InputEvent, InputSource, SessionEvent};
