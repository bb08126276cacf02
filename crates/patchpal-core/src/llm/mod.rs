mod openai;
mod traits;

pub use openai::OpenAIClient;
pub use traits::*;
