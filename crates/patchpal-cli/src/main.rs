use anyhow::Result;
use clap::Parser;
use patchpal_cli::{Cli, Printer, ReadlineInput};
use patchpal_core::{Session, Settings, TrackedFiles};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load();

    let llm = settings.build_llm_client(settings.primary_model(cli.gpt_3_5_turbo))?;
    let editor_llm = settings.build_llm_client(&settings.llm.weak_model)?;
    let files = TrackedFiles::open(std::env::current_dir()?, &cli.files)?;

    let mut session = Session::new(llm, editor_llm, files);
    let mut input = ReadlineInput::new()?;
    let mut printer = Printer::stdio();
    session.run(&mut input, &mut printer).await;

    Ok(())
}
