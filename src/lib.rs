//! A minimal content-tracking version control tool.
//!
//! The crate is organized into three layers:
//!
//! - `areas`: the on-disk stores (object database, index, refs) and the
//!   working tree, coordinated by [`areas::repository::Repository`]
//! - `artifacts`: the data structures and algorithms those areas exchange
//!   (objects, revisions, checkout migrations, path safety)
//! - `commands`: porcelain and plumbing operations implemented on
//!   [`areas::repository::Repository`]

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
