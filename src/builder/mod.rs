//! Intent-based batch building.
//!
//! `build_batch()` turns a JSON-friendly [`BatchIntent`] into a finalized
//! [`crate::batch::Batch`]; `build_transaction()` goes one step further and
//! returns the unsigned wire bytes.

mod build;
mod types;

pub use build::{build_batch, build_transaction};
pub use types::{BatchIntent, Instruction};
