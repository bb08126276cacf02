// Library interface for patchpal-cli, shared by the binary and the tests.

pub mod args;
pub mod input;
pub mod output;

pub use args::Cli;
pub use input::ReadlineInput;
pub use output::Printer;
