//! Porcelain commands (user-facing operations)
//!
//! Porcelain commands provide the high-level user interface for version control.
//! They compose plumbing commands and internal operations into workflows that
//! match typical usage patterns.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `commit`: Create a new commit
//! - `branch`: Create or list branches
//! - `checkout`: Switch branches or detach HEAD at a commit
//! - `rm`: Remove files from the index and working tree
//! - `reset`: Move HEAD, optionally resetting the index and working tree

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod reset;
pub mod rm;
