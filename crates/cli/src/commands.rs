use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use fatesheet_domain::{BlockType, CharacterFactory, CharacterType, MigrationOutcome};
use serde::Serialize;

use crate::config::CliConfig;

pub const USAGE: &str = "Usage: fatesheet <command>

Commands:
  make <type>          Print a new character (types: see `fatesheet types`)
  migrate <path|->     Upgrade a stored character document to the latest schema
  block <type>         Print a default block (Text, RichText, Skill, PointCounter, SlotTracker)
  types                List the supported character types";

/// Where a document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    Path(PathBuf),
}

impl Input {
    fn read_to_string(&self) -> anyhow::Result<String> {
        let mut raw = String::new();
        match self {
            Input::Stdin => {
                std::io::stdin()
                    .read_to_string(&mut raw)
                    .context("reading document from stdin")?;
            }
            Input::Path(path) => {
                raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading document from {}", path.display()))?;
            }
        }
        Ok(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Make(CharacterType),
    Migrate(Input),
    Block(BlockType),
    Types,
}

impl Command {
    /// Parse the arguments following the program name.
    pub fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut args = args.into_iter();
        let command = match args.next().as_deref() {
            Some("make") => {
                let tag = args.next().context("make requires a character type")?;
                Command::Make(tag.parse()?)
            }
            Some("migrate") => match args.next().as_deref() {
                Some("-") | None => Command::Migrate(Input::Stdin),
                Some(path) => Command::Migrate(Input::Path(PathBuf::from(path))),
            },
            Some("block") => {
                let tag = args.next().context("block requires a block type")?;
                Command::Block(tag.parse()?)
            }
            Some("types") => Command::Types,
            Some(other) => bail!("Unknown command: {other}\n\n{USAGE}"),
            None => bail!("{USAGE}"),
        };

        if let Some(extra) = args.next() {
            bail!("Unexpected argument: {extra}\n\n{USAGE}");
        }
        Ok(command)
    }
}

fn write_json(out: &mut dyn Write, value: &impl Serialize, config: &CliConfig) -> anyhow::Result<()> {
    let rendered = if config.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serializing output")?;
    writeln!(out, "{rendered}").context("writing output")?;
    Ok(())
}

pub fn run(
    command: &Command,
    config: &CliConfig,
    factory: &CharacterFactory,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Command::Make(character_type) => {
            let character = factory.make(*character_type);
            tracing::info!(character_id = %character.id, %character_type, "Made new character");
            write_json(out, &character, config)
        }
        Command::Migrate(input) => {
            let raw = input.read_to_string()?;
            let document: serde_json::Value =
                serde_json::from_str(&raw).context("document is not valid JSON")?;

            let outcome = factory.migrate(&document);
            if let MigrationOutcome::Unmigrated { reason, .. } = &outcome {
                if config.strict {
                    bail!("document could not be migrated: {reason}");
                }
            }
            if let Some(character) = outcome.character() {
                tracing::info!(
                    character_id = %character.id,
                    pages = character.pages.len(),
                    "Document is at the latest schema"
                );
            }
            let value = outcome.into_value().context("serializing migrated document")?;
            write_json(out, &value, config)
        }
        Command::Block(block_type) => {
            write_json(out, &CharacterFactory::make_block(*block_type), config)
        }
        Command::Types => {
            for character_type in CharacterType::ALL {
                writeln!(out, "{}\t{}", character_type, character_type.display_name())
                    .context("writing output")?;
            }
            Ok(())
        }
    }
}
