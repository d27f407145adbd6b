//! Header generation run: render, then commit or verify.

use crate::codegen::{SafeCodeWriter, compute_file_hash};
use crate::error::{GeneratorError, Result};
use crate::header::{GeneratedDocument, HeaderSpec, RepeatCount};
use std::fmt;
use std::path::PathBuf;
use tracing::instrument;

/// Summary of one committed header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub path: PathBuf,
    pub file_name: String,
    pub count: RepeatCount,
    pub expansions: u64,
    pub bytes_written: usize,
    pub digest: String,
}

impl fmt::Display for GenerationReport {
    /// The confirmation line printed after a successful write
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Created {} with n={}", self.file_name, self.count)
    }
}

/// State of an existing header compared with what would be generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    UpToDate { path: PathBuf },
    Stale { path: PathBuf, expected: String, found: String },
    Missing { path: PathBuf },
}

impl CheckOutcome {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, CheckOutcome::UpToDate { .. })
    }

    /// Turn anything but `UpToDate` into the matching error
    pub fn into_result(self) -> Result<PathBuf> {
        match self {
            CheckOutcome::UpToDate { path } => Ok(path),
            CheckOutcome::Stale { path, .. } => Err(GeneratorError::StaleHeader { path }),
            CheckOutcome::Missing { path } => Err(GeneratorError::MissingHeader { path }),
        }
    }
}

/// Renders headers and writes them into one output directory
#[derive(Debug, Clone)]
pub struct HeaderGenerator {
    output_dir: PathBuf,
    writer: SafeCodeWriter,
}

impl HeaderGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            writer: SafeCodeWriter::new(),
        }
    }

    pub fn with_writer(mut self, writer: SafeCodeWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Path the header for `spec` is written to
    pub fn target_path(&self, spec: &HeaderSpec) -> PathBuf {
        self.output_dir.join(spec.file_name())
    }

    /// Render the header text. No filesystem access.
    pub fn generate(&self, spec: &HeaderSpec, count: RepeatCount) -> GeneratedDocument {
        GeneratedDocument::assemble(spec, count)
    }

    /// Commit a rendered document, replacing any existing file
    pub fn write(&self, doc: &GeneratedDocument) -> Result<GenerationReport> {
        let path = self.output_dir.join(doc.file_name());
        self.writer.write(&path, doc.as_str())?;

        let report = GenerationReport {
            path,
            file_name: doc.file_name().to_string(),
            count: doc.count(),
            expansions: doc.count().expansion_count(),
            bytes_written: doc.len(),
            digest: doc.digest(),
        };

        tracing::info!(
            header.path = %report.path.display(),
            header.count = report.count.get(),
            header.expansions = report.expansions,
            header.digest = %report.digest,
            bytes = report.bytes_written,
            "header written"
        );

        Ok(report)
    }

    /// Render and commit in one step
    #[instrument(skip_all, fields(header.name = %spec.name, header.count = count.get()))]
    pub fn run(&self, spec: &HeaderSpec, count: RepeatCount) -> Result<GenerationReport> {
        let doc = self.generate(spec, count);
        tracing::debug!(bytes = doc.len(), "header rendered");
        self.write(&doc)
    }

    /// Compare the header on disk with a fresh rendering; never writes.
    #[instrument(skip_all, fields(header.name = %spec.name, header.count = count.get()))]
    pub fn check(&self, spec: &HeaderSpec, count: RepeatCount) -> Result<CheckOutcome> {
        let path = self.target_path(spec);
        if !path.is_file() {
            tracing::warn!(header.path = %path.display(), "generated header missing");
            return Ok(CheckOutcome::Missing { path });
        }

        let expected = self.generate(spec, count).digest();
        let found = compute_file_hash(&path)?;

        if expected == found {
            tracing::info!(header.path = %path.display(), header.digest = %found, "header up to date");
            Ok(CheckOutcome::UpToDate { path })
        } else {
            tracing::warn!(
                header.path = %path.display(),
                expected = %expected,
                found = %found,
                "generated header is stale"
            );
            Ok(CheckOutcome::Stale {
                path,
                expected,
                found,
            })
        }
    }
}

impl Default for HeaderGenerator {
    fn default() -> Self {
        Self::new(".")
    }
}
