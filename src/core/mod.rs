//! Core modules
//!
//! Configuration, critical sections, errors, shared types, the bitset used by
//! descriptor tables, the native context and the sleep primitive.

pub mod bitset;
pub mod config;
pub mod context;
pub mod critical;
pub mod cs_cell;
pub mod error;
pub mod time;
pub mod types;
