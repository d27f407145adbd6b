use anyhow::Context;
use clap::Parser;
use patomic_tsx_gen::{CliArgs, GeneratorConfig, LoggingConfig, init_logging, run};

fn main() -> anyhow::Result<()> {
    let _guard = init_logging(LoggingConfig::from_env())?;

    let cli = CliArgs::parse();
    let config = GeneratorConfig::from_args(cli).context("invalid generator configuration")?;

    let outcome = run(&config).map_err(|error| {
        tracing::error!(error.kind = error.kind(), %error, "header generation failed");
        error
    })?;

    println!("{outcome}");
    Ok(())
}
