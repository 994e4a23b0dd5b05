pub mod birthday;

pub use birthday::{BirthdayRecord, BirthdayStore, StoreError, normalize, title_case};
