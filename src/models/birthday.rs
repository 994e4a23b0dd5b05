use std::collections::BTreeMap;

/// Errors from store mutations. Neither changes the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{name} ({birthday}) is already in the dictionary")]
    AlreadyExists { name: String, birthday: String },

    #[error("{name} is not in the dictionary")]
    NotFound { name: String },
}

/// A single name/birthday pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayRecord {
    pub name: String,
    pub birthday: String,
}

impl BirthdayRecord {
    pub fn new(name: impl Into<String>, birthday: impl Into<String>) -> Self {
        BirthdayRecord {
            name: name.into(),
            birthday: birthday.into(),
        }
    }

    /// Menu rendering, e.g. "Alice was born on January 1"
    pub fn describe(&self) -> String {
        format!("{} was born on {}", self.name, self.birthday)
    }

    /// Confirmation after a successful add
    pub fn added_message(&self) -> String {
        format!("{} ({}) has been added to the dictionary", self.name, self.birthday)
    }

    /// Confirmation after a successful update
    pub fn updated_message(&self) -> String {
        format!("{}'s birthday has been updated to {}", self.name, self.birthday)
    }
}

/// In-memory name -> birthday mapping
/// Keys are kept in code point order, so iteration is already sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BirthdayStore {
    entries: BTreeMap<String, String>,
}

impl BirthdayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert without normalization, replacing any earlier birthday.
    /// Used when reading files, where later lines win.
    pub fn insert_raw(&mut self, name: impl Into<String>, birthday: impl Into<String>) {
        self.entries.insert(name.into(), birthday.into());
    }

    /// Add a new person. Name and birthday are trimmed and title-cased first.
    pub fn add(&mut self, name: &str, birthday: &str) -> Result<BirthdayRecord, StoreError> {
        let name = self.check_new(name)?;
        let birthday = normalize(birthday);
        log::debug!("Adding {} ({})", name, birthday);
        self.entries.insert(name.clone(), birthday.clone());

        Ok(BirthdayRecord { name, birthday })
    }

    /// Replace the birthday of an existing person (same normalization as `add`)
    pub fn update(&mut self, name: &str, birthday: &str) -> Result<BirthdayRecord, StoreError> {
        let name = self.check_existing(name)?;
        let Some(slot) = self.entries.get_mut(&name) else {
            return Err(StoreError::NotFound { name });
        };

        let birthday = normalize(birthday);
        log::debug!("Updating {}: {} -> {}", name, slot, birthday);
        *slot = birthday.clone();

        Ok(BirthdayRecord { name, birthday })
    }

    /// Normalize `name` and fail if it is already taken.
    /// Lets a caller reject a duplicate before asking for the birthday.
    pub fn check_new(&self, name: &str) -> Result<String, StoreError> {
        let name = normalize(name);
        match self.entries.get(&name) {
            Some(existing) => Err(StoreError::AlreadyExists {
                birthday: existing.clone(),
                name,
            }),
            None => Ok(name),
        }
    }

    /// Normalize `name` and fail if nobody has it
    pub fn check_existing(&self, name: &str) -> Result<String, StoreError> {
        let name = normalize(name);
        if self.entries.contains_key(&name) {
            Ok(name)
        } else {
            Err(StoreError::NotFound { name })
        }
    }

    /// Look up a birthday by exact (already normalized) name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// All records sorted by name
    pub fn list(&self) -> Vec<BirthdayRecord> {
        self.entries
            .iter()
            .map(|(name, birthday)| BirthdayRecord::new(name.as_str(), birthday.as_str()))
            .collect()
    }

    /// Title-case every stored name and birthday.
    /// Names that collapse onto the same key keep the last one in sort order.
    pub fn normalize_all(&mut self) {
        self.entries = std::mem::take(&mut self.entries)
            .into_iter()
            .map(|(name, birthday)| (normalize(&name), normalize(&birthday)))
            .collect();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Trim surrounding whitespace and title-case the rest
pub fn normalize(input: &str) -> String {
    title_case(input.trim())
}

/// Upper-case a letter that follows a non-letter, lower-case every other letter.
/// "o'brien 3rd" becomes "O'Brien 3Rd".
///
/// Only approximates Python's `str.title` outside ASCII: any alphabetic char
/// counts as a letter, including uncased scripts ("中a" stays "中a"), and
/// word starts are upper-cased rather than title-cased ("ßa" becomes "SSa").
pub fn title_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut prev_is_letter = false;

    for c in input.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            result.push(c);
            prev_is_letter = false;
        }
    }

    result
}
