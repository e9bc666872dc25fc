//! Core contracts for the shelfmark catalog.
//!
//! This crate defines the entity types and the repository traits through
//! which callers perform persistence operations. It contains no I/O: the
//! concrete storage backend lives in the `shelfmark` crate and implements
//! the traits defined here.

pub mod catalog;
pub mod storage;
