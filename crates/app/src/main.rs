use clap::Parser;
use cli::{Cli, Command};
use engine::{Engine, JsonFileStore};
use error::Result;
use settings::Settings;

mod cli;
mod error;
mod render;
mod settings;

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Command::Show);
    let settings = Settings::load(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "simplifinance={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let view = cli.view()?;
    let store = JsonFileStore::new(&settings.data_path);
    tracing::debug!("opening {} for {view}", store.path().display());

    let mut engine = Engine::builder()
        .store(store)
        .view(view)
        .build()?;
    engine.replicate_view()?;

    cli::run(&mut engine, command)
}
