//! Plumbing commands (low-level object operations)
//!
//! Plumbing commands provide direct access to the internal data structures
//! and operations. They're primarily used for scripting and as building blocks
//! for porcelain commands.
//!
//! ## Commands
//!
//! - `hash-object`: Compute object ID and optionally store in database
//! - `cat-file`: Pretty-print a stored object

pub mod cat_file;
pub mod hash_object;
