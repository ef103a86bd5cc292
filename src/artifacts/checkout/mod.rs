//! Checkout operations and conflict handling
//!
//! This module handles switching between snapshots by:
//! - Diffing the index against the target snapshot
//! - Detecting conflicts with local modifications
//! - Planning and executing file system changes
//! - Replacing the index contents with the target snapshot
//!
//! Migrations are designed to be safe, detecting all conflicts before
//! making any changes to the working directory.

pub mod conflict;
pub mod migration;
