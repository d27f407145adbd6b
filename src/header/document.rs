//! Header specification and the assembled document.

use crate::codegen::compute_string_hash;
use crate::header::guard::{IncludeGuard, build_guard, guard_symbol};
use crate::header::repeat::{RepeatCount, build_repeat_macro};
use serde::{Deserialize, Serialize};

/// Banner placed after the include guard of every generated header.
///
/// The tool tag stays `gen.py` so regenerated headers are byte-identical to
/// the ones already checked in downstream.
pub const GENERATED_BANNER: &str = "/* NOTE: this file is auto-generated by gen.py */\n\n";

/// Logical header name, e.g. `"repeat"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSpec {
    pub name: String,
}

impl HeaderSpec {
    pub const DEFAULT_NAME: &'static str = "repeat";

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Output file name: the logical name verbatim plus `.h`
    pub fn file_name(&self) -> String {
        format!("{}.h", self.name)
    }

    /// Name fragment of the include guard (`MY_HEADER` for `"My Header"`)
    pub fn guard_symbol(&self) -> String {
        guard_symbol(&self.name)
    }

    pub fn guard(&self) -> IncludeGuard {
        build_guard(&self.name)
    }
}

impl Default for HeaderSpec {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }
}

/// Fully rendered header, ready to be written in one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    file_name: String,
    count: RepeatCount,
    text: String,
}

impl GeneratedDocument {
    /// Concatenate prologue, banner, repeat macro and epilogue.
    pub fn assemble(spec: &HeaderSpec, count: RepeatCount) -> Self {
        let guard = spec.guard();
        let body = build_repeat_macro(count);
        let prologue = guard.prologue();
        let epilogue = guard.epilogue();

        let mut text = String::with_capacity(
            prologue.len() + GENERATED_BANNER.len() + body.len() + epilogue.len(),
        );
        text.push_str(&prologue);
        text.push_str(GENERATED_BANNER);
        text.push_str(&body);
        text.push_str(&epilogue);

        Self {
            file_name: spec.file_name(),
            count,
            text,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn count(&self) -> RepeatCount {
        self.count
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// SHA-256 of the document text, hex encoded
    pub fn digest(&self) -> String {
        compute_string_hash(&self.text)
    }

    pub fn into_string(self) -> String {
        self.text
    }
}
