//! Generator for the `PATOMIC_TSX_REPEAT` preprocessor header.
//!
//! The header defines `PATOMIC_TSX_REPEAT(def)`, which expands `def(i)` once
//! for every `i` in `[1, N)`, plus `PATOMIC_TSX_REPEAT_N` holding `N`. The
//! TSX atomic implementation uses it to unroll its variants at compile time.
//!
//! Rendering ([`header`]) is pure; committing ([`codegen`]) is a single
//! buffered write. [`generator::HeaderGenerator`] ties the two together.

pub mod codegen;
pub mod config;
pub mod error;
pub mod generator;
pub mod header;
pub mod logging;

pub use config::{CliArgs, GeneratorConfig, RunMode};
pub use error::{GeneratorError, Result};
pub use generator::{CheckOutcome, GenerationReport, HeaderGenerator};
pub use header::{GeneratedDocument, HeaderSpec, RepeatCount};
pub use logging::{LoggingConfig, init_logging};

use std::fmt;
use std::path::PathBuf;

/// What a completed run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Written(GenerationReport),
    Verified { path: PathBuf, count: RepeatCount },
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Written(report) => write!(f, "{report}"),
            RunOutcome::Verified { path, count } => {
                write!(f, "{} is up to date with n={}", path.display(), count)
            }
        }
    }
}

/// Execute one run as described by `config`.
///
/// In check mode a stale or missing header is an error.
pub fn run(config: &GeneratorConfig) -> Result<RunOutcome> {
    let writer = codegen::SafeCodeWriter::new().with_backups(config.create_backups);
    let generator = HeaderGenerator::new(&config.output_dir).with_writer(writer);

    tracing::debug!(
        header.name = %config.spec.name,
        header.count = config.count.get(),
        output_dir = %config.output_dir.display(),
        mode = ?config.mode,
        "starting header generation"
    );

    match config.mode {
        RunMode::Write => generator
            .run(&config.spec, config.count)
            .map(RunOutcome::Written),
        RunMode::Check => {
            let path = generator.check(&config.spec, config.count)?.into_result()?;
            Ok(RunOutcome::Verified {
                path,
                count: config.count,
            })
        }
    }
}
