//! Code Generation Output
//!
//! The effectful half of header generation. Text is produced by the pure
//! functions in [`crate::header`]; this module commits it to disk.
//!
//! - **writer**: `SafeCodeWriter` (buffered, atomic replacement of the target)
//!   and SHA-256 helpers used to fingerprint generated output
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use patomic_tsx_gen::codegen::SafeCodeWriter;
//! use patomic_tsx_gen::header::{GeneratedDocument, HeaderSpec, RepeatCount};
//! use std::path::Path;
//!
//! # fn example() -> patomic_tsx_gen::Result<()> {
//! let doc = GeneratedDocument::assemble(&HeaderSpec::default(), RepeatCount::new(16));
//! SafeCodeWriter::new().write(Path::new("repeat.h"), doc.as_str())?;
//! # Ok(())
//! # }
//! ```

pub mod writer;

pub use writer::{SafeCodeWriter, compute_file_hash, compute_string_hash};
