//! Embedded document store for rosterd
//!
//! The store holds the canonical persistent state of all documents as
//! an append-only record log, replayed into memory when the database
//! is opened.
//!
//! # Design Principles
//!
//! - Append-only (no in-place updates)
//! - Checksum-verified on every read
//! - Halt on corruption rather than serve partial state
//! - Full-document writes (updates rewrite the whole document)
//! - Insertion order is the only order, stable across restarts

mod collection;
mod database;
mod errors;
mod filter;
mod reader;
mod record;
mod update;
mod writer;

pub use collection::{
    Collection, Cursor, DeleteOneResult, InsertOneResult, UpdateOneResult, ID_FIELD,
};
pub use database::Database;
pub use errors::{StoreError, StoreResult};
pub use filter::Filter;
pub use reader::LogReader;
pub use record::LogRecord;
pub use update::Update;
pub use writer::LogWriter;
