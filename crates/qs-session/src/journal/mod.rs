//! Audit trail of everything a moderator committed during a session.

pub mod entry;
pub mod log;

pub use self::entry::JournalEntry;
pub use self::log::Journal;
