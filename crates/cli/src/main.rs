//! Fatesheet CLI - make new characters and migrate stored documents.
//!
//! JSON goes to stdout; logs go to stderr.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::Command;
use config::CliConfig;
use fatesheet_domain::CharacterFactory;

fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fatesheet_cli=info,fatesheet_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CliConfig::from_env();
    tracing::debug!(?config, "Loaded configuration");

    let command = Command::parse(std::env::args().skip(1))?;
    let factory = CharacterFactory::default();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&command, &config, &factory, &mut out)
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
