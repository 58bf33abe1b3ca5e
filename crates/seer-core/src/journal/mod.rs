//! Journaling system for recording driver observations.

pub mod banner;
pub mod entry;
pub mod log;

pub use entry::JournalEntry;
pub use log::Journal;
