//! Object types and operations
//!
//! The store keeps all content as immutable objects identified by SHA-1
//! digests. There are three types:
//!
//! - **Blob**: Raw file content
//! - **Tree**: Flat snapshot mapping paths to blob digests
//! - **Commit**: Snapshot with metadata (timestamp, message, parent commits, tree)
//!
//! All objects implement serialization/deserialization for the object format:
//! `<type> <size>\0<content>`

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 digest in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
