//! Include-guard derivation.

/// Project prefix shared by every generated TSX preprocessor header
pub const GUARD_PREFIX: &str = "PATOMIC_IMPL_TSX_PP_";

/// Suffix appended after the name-derived fragment
pub const GUARD_SUFFIX: &str = "_H";

/// Derive the name fragment of a guard symbol.
///
/// The name is uppercased and its whitespace-separated tokens are joined with
/// single underscores. Leading, trailing and repeated whitespace collapse, so
/// `"  my   header "` becomes `MY_HEADER`. An empty or all-whitespace name
/// yields an empty fragment.
pub fn guard_symbol(name: &str) -> String {
    name.split(is_separator)
        .filter(|token| !token.is_empty())
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Token separators: Unicode whitespace plus the ASCII file, group, record and
/// unit separators (`\x1c`..=`\x1f`), which `char::is_whitespace` leaves out
/// but header names written for the old generator were split on.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\x1c'..='\x1f')
}

/// Include guard for one generated header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeGuard {
    macro_name: String,
}

impl IncludeGuard {
    /// Full guard macro, e.g. `PATOMIC_IMPL_TSX_PP_REPEAT_H`
    pub fn macro_name(&self) -> &str {
        &self.macro_name
    }

    /// `#ifndef` / `#define` pair followed by one blank line
    pub fn prologue(&self) -> String {
        format!(
            "#ifndef {name}\n#define {name}\n\n",
            name = self.macro_name
        )
    }

    /// Blank line, then the closing `#endif` annotated with the guard name
    pub fn epilogue(&self) -> String {
        format!("\n#endif  /* !{} */\n", self.macro_name)
    }
}

/// Build the include guard for a logical header name.
///
/// Any name is accepted; an empty name still produces well-formed guard text
/// (`PATOMIC_IMPL_TSX_PP__H`).
pub fn build_guard(name: &str) -> IncludeGuard {
    IncludeGuard {
        macro_name: format!("{GUARD_PREFIX}{}{GUARD_SUFFIX}", guard_symbol(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_symbol_uppercases_single_word() {
        assert_eq!(guard_symbol("repeat"), "REPEAT");
    }

    #[test]
    fn test_guard_symbol_joins_words_with_underscore() {
        assert_eq!(guard_symbol("My Header"), "MY_HEADER");
        assert_eq!(guard_symbol("  my \t  header\n"), "MY_HEADER");
    }

    #[test]
    fn test_guard_symbol_splits_on_ascii_separators() {
        assert_eq!(guard_symbol("my\x1cheader\x1fname"), "MY_HEADER_NAME");
        assert_eq!(guard_symbol("\x1d\x1e"), "");
    }

    #[test]
    fn test_guard_symbol_keeps_existing_uppercase_and_underscores() {
        assert_eq!(guard_symbol("ALREADY_UPPER"), "ALREADY_UPPER");
    }

    #[test]
    fn test_guard_symbol_empty_name() {
        assert_eq!(guard_symbol(""), "");
        assert_eq!(guard_symbol("   "), "");
    }

    #[test]
    fn test_build_guard_prologue_and_epilogue() {
        let guard = build_guard("repeat");
        assert_eq!(guard.macro_name(), "PATOMIC_IMPL_TSX_PP_REPEAT_H");
        assert_eq!(
            guard.prologue(),
            "#ifndef PATOMIC_IMPL_TSX_PP_REPEAT_H\n#define PATOMIC_IMPL_TSX_PP_REPEAT_H\n\n"
        );
        assert_eq!(
            guard.epilogue(),
            "\n#endif  /* !PATOMIC_IMPL_TSX_PP_REPEAT_H */\n"
        );
    }

    #[test]
    fn test_build_guard_empty_name_is_well_formed() {
        let guard = build_guard("");
        assert_eq!(guard.macro_name(), "PATOMIC_IMPL_TSX_PP__H");
        assert!(guard.prologue().starts_with("#ifndef PATOMIC_IMPL_TSX_PP__H\n"));
    }
}
