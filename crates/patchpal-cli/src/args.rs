use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "patchpal")]
#[command(about = "Chat with an LLM about your code and let it edit the files")]
#[command(version)]
pub struct Cli {
    /// Source files the assistant may read and edit
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<String>,

    /// Only use the cheaper model (gpt-3.5-turbo by default), not gpt-4
    #[arg(short = '3', long = "gpt-3-5-turbo")]
    pub gpt_3_5_turbo: bool,
}
