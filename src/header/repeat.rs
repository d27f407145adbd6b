//! Repetition count and the `PATOMIC_TSX_REPEAT` macro body.

use crate::error::GeneratorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Name of the constant exposing the repetition bound
pub const REPEAT_CONSTANT: &str = "PATOMIC_TSX_REPEAT_N";

/// Name of the repetition macro
pub const REPEAT_MACRO: &str = "PATOMIC_TSX_REPEAT";

const MAX_CAPACITY_HINT_LINES: usize = 1 << 20;

/// Number of variants `N`; the macro expands `def(i)` for every `i` in `[1, N)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepeatCount(u64);

impl RepeatCount {
    /// Count used when the tool runs with no overrides (0x4000)
    pub const DEFAULT: RepeatCount = RepeatCount(0x4000);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Arguments passed to `def`, in ascending order. Empty for `N <= 1`.
    pub fn expansion_arguments(self) -> Range<u64> {
        1..self.0.max(1)
    }

    /// Number of `def(i)` lines, i.e. `max(N - 1, 0)`
    pub fn expansion_count(self) -> u64 {
        self.0.saturating_sub(1)
    }
}

impl Default for RepeatCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u64> for RepeatCount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RepeatCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RepeatCount {
    type Err = GeneratorError;

    /// Accepts decimal (`16384`) or `0x`-prefixed hex (`0x4000`).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
            None => trimmed.replace('_', "").parse::<u64>(),
        };
        parsed.map(RepeatCount).map_err(|_| GeneratorError::InvalidCount {
            raw: raw.to_string(),
        })
    }
}

/// Build the constant definition and the line-continued repetition macro.
///
/// The constant always carries `n` verbatim in decimal. The macro body holds
/// one `    def(i) \` line per argument and ends with an empty line, so for
/// `n <= 1` it degenerates to a definition that expands to nothing.
pub fn build_repeat_macro(n: RepeatCount) -> String {
    let hint = usize::try_from(n.expansion_count())
        .unwrap_or(usize::MAX)
        .min(MAX_CAPACITY_HINT_LINES)
        * 20;
    let mut text = String::with_capacity(128 + hint);

    text.push_str(&format!("#define {REPEAT_CONSTANT} {n}\n\n"));
    text.push_str(&format!("#define {REPEAT_MACRO}(def) \\\n"));
    for i in n.expansion_arguments() {
        text.push_str(&format!("    def({i}) \\\n"));
    }
    text.push('\n');

    text
}
