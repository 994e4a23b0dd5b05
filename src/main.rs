use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use birthdays::app::{Session, add_and_save, update_and_save};
use birthdays::console::IoConsole;
use birthdays::logging;
use birthdays::storage::{
    BirthdayStorage, ConfigStorage, DelimitedFileStorage, TomlConfigStorage, default_config_path,
};

#[derive(Parser)]
#[command(name = "birthdays")]
#[command(about = "Birthday dictionary backed by a delimited text file", long_about = None)]
struct Cli {
    /// Birthday file to load (overrides the config file)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/birthdays/birthdays.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every birthday, sorted by name
    List,

    /// Add a birthday and write the file back
    Add { name: String, birthday: String },

    /// Change a birthday and write the file back
    Update { name: String, birthday: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = TomlConfigStorage::new(config_path).load()?;

    logging::init_logger(&config.logging)?;

    let source = cli.file.unwrap_or(config.general.birthdays_file);
    let storage = DelimitedFileStorage::new(
        config.general.create_if_missing,
        config.general.normalize_loaded,
    );

    match cli.command {
        Some(Commands::List) => cmd_list(&storage, source),
        Some(Commands::Add { name, birthday }) => cmd_add(&storage, source, &name, &birthday),
        Some(Commands::Update { name, birthday }) => {
            cmd_update(&storage, source, &name, &birthday)
        }
        None => cmd_interactive(storage, source),
    }
}

/// Interactive menu on stdin/stdout
fn cmd_interactive(storage: DelimitedFileStorage, source: PathBuf) -> Result<()> {
    let mut session = Session::open(IoConsole::stdio(), storage, source)?;
    let saved_to = session.run()?;
    log::debug!("Session finished, saved to {:?}", saved_to);
    Ok(())
}

/// Print birthdays
fn cmd_list(storage: &DelimitedFileStorage, source: PathBuf) -> Result<()> {
    let store = storage.load(&source)?;

    for record in store.list() {
        println!("{}", record.describe());
    }

    if store.is_empty() {
        log::info!("No birthdays in {:?}", source);
    }

    Ok(())
}

/// Add one birthday
fn cmd_add(
    storage: &DelimitedFileStorage,
    source: PathBuf,
    name: &str,
    birthday: &str,
) -> Result<()> {
    let record = add_and_save(storage, &source, name, birthday)?;
    println!("{}", record.added_message());
    Ok(())
}

/// Update one birthday
fn cmd_update(
    storage: &DelimitedFileStorage,
    source: PathBuf,
    name: &str,
    birthday: &str,
) -> Result<()> {
    let record = update_and_save(storage, &source, name, birthday)?;
    println!("{}", record.updated_message());
    Ok(())
}
