// src/record/mod.rs

//! The shared record threaded through a run: a fixed field schema plus a
//! write-once store and the per-task read views handed out by the runner.

pub mod fields;
pub mod store;

pub use fields::{Category, Field, FieldKind, Value};
pub use store::{Record, RecordView};
