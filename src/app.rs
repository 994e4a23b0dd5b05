use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::console::Console;
use crate::menu::{self, Command};
use crate::models::{BirthdayRecord, BirthdayStore};
use crate::storage::BirthdayStorage;

const PERSON_PROMPT: &str = "Enter a person: ";
const BIRTHDAY_PROMPT: &str = "Enter their birthday: ";
const FILENAME_PROMPT: &str = "Enter a filename: ";

/// One interactive menu session
///
/// Owns the store for its whole lifetime. The console and storage are
/// injected, so a session can run against scripted input and memory storage.
pub struct Session<C, S> {
    /// The birthdays being edited
    store: BirthdayStore,

    /// Where menu text goes and answers come from
    console: C,

    /// Used once, to write the store on quit
    storage: S,

    /// File the store was loaded from, the save target when no filename is given
    source: PathBuf,
}

impl<C: Console, S: BirthdayStorage> Session<C, S> {
    /// Create a session around an already loaded store
    pub fn new(store: BirthdayStore, console: C, storage: S, source: PathBuf) -> Self {
        Session {
            store,
            console,
            storage,
            source,
        }
    }

    /// Load `source` through `storage` and start a session on it
    pub fn open(console: C, storage: S, source: PathBuf) -> Result<Self> {
        let store = storage
            .load(&source)
            .with_context(|| format!("Failed to load birthdays from {:?}", source))?;
        Ok(Self::new(store, console, storage, source))
    }

    pub fn store(&self) -> &BirthdayStore {
        &self.store
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Run the menu loop until Quit, then save.
    /// Returns the path the birthdays were written to.
    pub fn run(&mut self) -> Result<PathBuf> {
        loop {
            match menu::read_command(&mut self.console)? {
                Command::List => self.print_birthdays()?,
                Command::Add => self.add_birthday()?,
                Command::Update => self.update_birthday()?,
                Command::Invalid(input) => {
                    log::debug!("Invalid menu choice {:?}", input);
                    self.console.println("Invalid choice")?;
                }
                Command::Quit => return self.save_and_quit(),
            }
        }
    }

    fn print_birthdays(&mut self) -> Result<()> {
        for record in self.store.list() {
            self.console.println(&record.describe())?;
        }
        Ok(())
    }

    fn add_birthday(&mut self) -> Result<()> {
        let Some(person) = self.console.prompt(PERSON_PROMPT)? else {
            return Ok(());
        };

        // Duplicates are rejected before asking for a birthday
        let name = match self.store.check_new(&person) {
            Ok(name) => name,
            Err(e) => return self.console.println(&e.to_string()),
        };

        let Some(birthday) = self.console.prompt(BIRTHDAY_PROMPT)? else {
            return Ok(());
        };

        match self.store.add(&name, &birthday) {
            Ok(record) => {
                log::info!("Added {} ({})", record.name, record.birthday);
                self.console.println(&record.added_message())
            }
            Err(e) => self.console.println(&e.to_string()),
        }
    }

    fn update_birthday(&mut self) -> Result<()> {
        let Some(person) = self.console.prompt(PERSON_PROMPT)? else {
            return Ok(());
        };

        let name = match self.store.check_existing(&person) {
            Ok(name) => name,
            Err(e) => return self.console.println(&e.to_string()),
        };

        let Some(birthday) = self.console.prompt(BIRTHDAY_PROMPT)? else {
            return Ok(());
        };

        match self.store.update(&name, &birthday) {
            Ok(record) => {
                log::info!("Updated {} to {}", record.name, record.birthday);
                self.console.println(&record.updated_message())
            }
            Err(e) => self.console.println(&e.to_string()),
        }
    }

    fn save_and_quit(&mut self) -> Result<PathBuf> {
        let answer = self.console.prompt(FILENAME_PROMPT)?;
        let path = match answer.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => PathBuf::from(name),
            _ => {
                log::info!("No filename given, saving to {:?}", self.source);
                self.source.clone()
            }
        };

        save_store(&self.storage, &self.store, &path)?;
        self.console
            .println(&format!("Data written to the {} file.", path.display()))?;

        Ok(path)
    }
}

/// Save through `storage`, adding the path to any error
pub fn save_store<S: BirthdayStorage>(storage: &S, store: &BirthdayStore, path: &Path) -> Result<()> {
    storage
        .save(store, path)
        .with_context(|| format!("Failed to save birthdays to {:?}", path))?;
    log::info!("Wrote {} birthdays to {:?}", store.len(), path);
    Ok(())
}

/// Load `path`, add one birthday and write the file back.
/// A duplicate name fails before anything is written.
pub fn add_and_save<S: BirthdayStorage>(
    storage: &S,
    path: &Path,
    name: &str,
    birthday: &str,
) -> Result<BirthdayRecord> {
    let mut store = storage.load(path)?;
    let record = store.add(name, birthday)?;
    save_store(storage, &store, path)?;
    Ok(record)
}

/// Load `path`, update one birthday and write the file back.
/// An unknown name fails before anything is written.
pub fn update_and_save<S: BirthdayStorage>(
    storage: &S,
    path: &Path,
    name: &str,
    birthday: &str,
) -> Result<BirthdayRecord> {
    let mut store = storage.load(path)?;
    let record = store.update(name, birthday)?;
    save_store(storage, &store, path)?;
    Ok(record)
}
