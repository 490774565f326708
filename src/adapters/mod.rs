// Adapters layer: concrete `LeadStore` backends (SQLite database, JSON documents).

pub mod json_files;
pub mod sqlite;

pub use json_files::JsonFileStore;
pub use sqlite::SqliteStore;
