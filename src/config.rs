use crate::error::{GeneratorError, Result};
use crate::header::{HeaderSpec, RepeatCount};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Render and overwrite the header
    Write,
    /// Verify the existing header matches; never writes
    Check,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub spec: HeaderSpec,
    pub count: RepeatCount,
    pub output_dir: PathBuf,
    pub create_backups: bool,
    pub mode: RunMode,
}

impl Default for GeneratorConfig {
    /// Same as running the tool with no arguments: `repeat.h`, n=16384, cwd
    fn default() -> Self {
        Self {
            spec: HeaderSpec::default(),
            count: RepeatCount::DEFAULT,
            output_dir: PathBuf::from("."),
            create_backups: false,
            mode: RunMode::Write,
        }
    }
}

impl GeneratorConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            name: cli_name,
            count: cli_count,
            output_dir: cli_output_dir,
            backup: cli_backup,
            check,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            name: file_name,
            count: file_count,
            output_dir: file_output_dir,
            backup: file_backup,
        } = file_config;

        let defaults = Self::default();

        let name = cli_name.or(file_name).unwrap_or(defaults.spec.name);
        if name.trim().is_empty() {
            return Err(GeneratorError::Config(
                "header name must contain at least one non-whitespace character".to_string(),
            ));
        }

        let count = match cli_count.or(file_count) {
            Some(raw) => raw.as_str().parse::<RepeatCount>()?,
            None => defaults.count,
        };

        let output_dir = cli_output_dir
            .or(file_output_dir)
            .unwrap_or(defaults.output_dir);

        Ok(Self {
            spec: HeaderSpec::new(name),
            count,
            output_dir,
            create_backups: cli_backup || file_backup.unwrap_or(defaults.create_backups),
            mode: if check { RunMode::Check } else { RunMode::Write },
        })
    }

    /// Where the header lands
    pub fn target_path(&self) -> PathBuf {
        self.output_dir.join(self.spec.file_name())
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "patomic-tsx-gen",
    about = "Generate the PATOMIC_TSX_REPEAT preprocessor header",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "PATOMIC_TSX_NAME",
        value_name = "NAME",
        help = "Logical header name; also names the output file <NAME>.h [default: repeat]"
    )]
    pub name: Option<String>,

    #[arg(
        long,
        env = "PATOMIC_TSX_COUNT",
        value_name = "N",
        help = "Repetition count, decimal or 0x hex [default: 0x4000]"
    )]
    pub count: Option<String>,

    #[arg(
        long,
        env = "PATOMIC_TSX_OUTPUT_DIR",
        value_name = "DIR",
        help = "Directory the header is written to [default: current directory]"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(long, help = "Keep a .bak copy of the previous header")]
    pub backup: bool,

    #[arg(
        long,
        help = "Verify the existing header is up to date instead of writing it"
    )]
    pub check: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    count: Option<String>,
    output_dir: Option<PathBuf>,
    backup: Option<bool>,
}

/// Counts may be written as numbers (`16384`) or strings (`"0x4000"`)
fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Number(u64),
        Text(String),
    }

    Ok(Option::<RawCount>::deserialize(deserializer)?.map(|raw| match raw {
        RawCount::Number(n) => n.to_string(),
        RawCount::Text(s) => s,
    }))
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        return Err(GeneratorError::Config(format!(
            "config file {:?} does not exist",
            path
        )));
    }
    let contents = fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
            GeneratorError::Config(format!("failed to parse YAML config {:?}: {e}", path))
        }),
        "json" => serde_json::from_str(&contents).map_err(|e| {
            GeneratorError::Config(format!("failed to parse JSON config {:?}: {e}", path))
        }),
        other => Err(GeneratorError::Config(format!(
            "unsupported config extension: {other}"
        ))),
    }
}
