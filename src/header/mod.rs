//! Header Text Production
//!
//! Pure functions that turn a logical header name and a repetition count into
//! the text of the `PATOMIC_TSX_REPEAT` header. Nothing in this module touches
//! the filesystem; see [`crate::codegen`] for the write step.
//!
//! ## Layout
//!
//! ```text
//! prologue (include guard) → banner → N constant → repeat macro → epilogue
//! ```
//!
//! - **guard**: include-guard symbol derivation and prologue/epilogue text
//! - **repeat**: `RepeatCount` and the repetition macro body
//! - **document**: `HeaderSpec` and the assembled `GeneratedDocument`

pub mod document;
pub mod guard;
pub mod repeat;

pub use document::{GENERATED_BANNER, GeneratedDocument, HeaderSpec};
pub use guard::{GUARD_PREFIX, GUARD_SUFFIX, IncludeGuard, build_guard, guard_symbol};
pub use repeat::{REPEAT_CONSTANT, REPEAT_MACRO, RepeatCount, build_repeat_macro};
