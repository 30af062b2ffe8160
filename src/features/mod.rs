//! Feature implementations for smartstudy.
//!
//! This module contains the features built on top of the store and the core
//! engines:
//! - Daily task replication
//! - Statistics

pub mod recurring;
pub mod stats;
