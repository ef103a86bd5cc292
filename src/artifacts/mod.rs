//! Repository data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `branch`: Branch names and revision parsing
//! - `checkout`: Working tree migration and conflict detection
//! - `objects`: Object types (blob, tree, commit)
//! - `safety`: Path validation and ignore rules

pub mod branch;
pub mod checkout;
pub mod objects;
pub mod safety;
