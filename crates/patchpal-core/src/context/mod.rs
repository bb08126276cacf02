mod builder;
mod history;
pub mod prompts;

pub use builder::ContextBuilder;
pub use history::ConversationHistory;
