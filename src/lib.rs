//! Birthdays - interactive birthday dictionary
//!
//! This library exports the core modules for testing and potential reuse.

pub mod app;
pub mod console;
pub mod logging;
pub mod menu;
pub mod models;
pub mod storage;
