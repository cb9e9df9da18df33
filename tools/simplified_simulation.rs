// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Simplified simulation: learn `f(x) = x mod 2` over a 2-bit domain.
//!
//! Network: input areas A and B (one per bit, each recurrent) project into a
//! recurrent hidden area C, which projects into the output area. See
//! `asmlearn::simulation`.
//!
//! Usage: simplified_simulation [--config <path>] [--<key>=<value> ...] [--debug-<crate> | --debug-all]
//!
//! Keys are the CLI overrides of `asmlearn-config` (seed, p, cycles,
//! noise_probability, log_level, ...). Without `--config`, the configuration
//! file is searched for and defaults are used if none exists.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use asmlearn::config::{
    apply_cli_overrides, apply_environment_overrides, load_config, validate_config, AsmlearnConfig,
    ConfigError,
};
use asmlearn::observability::{debug_flags_help, init_logging, parse_debug_flags, LoggingConfig};
use asmlearn::simulation::{
    simplified_model, simplified_test_set, simplified_training_set, LOWEST_BIT_LABELS,
};
use tracing::info;

struct Args {
    config_path: Option<PathBuf>,
    overrides: HashMap<String, String>,
}

fn parse_args() -> Result<Args> {
    let mut config_path = None;
    let mut overrides = HashMap::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "-h" || arg == "--help" {
            println!("Usage: simplified_simulation [--config <path>] [--<key>=<value> ...]\n");
            println!("{}", debug_flags_help());
            std::process::exit(0);
        } else if arg == "--config" {
            let path = args.next().context("--config needs a path")?;
            config_path = Some(PathBuf::from(path));
        } else if arg.starts_with("--debug-") {
            // Handled by parse_debug_flags
        } else if let Some((key, value)) = arg.strip_prefix("--").and_then(|a| a.split_once('=')) {
            overrides.insert(key.to_string(), value.to_string());
        } else {
            bail!("Unknown argument: {}", arg);
        }
    }

    Ok(Args {
        config_path,
        overrides,
    })
}

fn load(args: &Args) -> Result<AsmlearnConfig> {
    let config = match load_config(args.config_path.as_deref(), Some(&args.overrides)) {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(_)) if args.config_path.is_none() => {
            let mut config = AsmlearnConfig::default();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, &args.overrides);
            config
        }
        Err(err) => return Err(err).context("Failed to load configuration"),
    };
    validate_config(&config)?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = parse_args()?;
    let config = load(&args)?;

    let logging = LoggingConfig::from_settings(&config.logging.level, &config.logging.format)?;
    let _logging_guard = init_logging(&parse_debug_flags(), &logging)?;

    info!(
        target: "asmlearn",
        "Starting simplified simulation (seed={:?}, p={}, cycles={})",
        config.brain.seed,
        config.brain.p,
        config.training.cycles
    );

    let mut model = simplified_model(&config)?;
    println!("{}", model.sequence().display_connections_graph());

    let training_set = simplified_training_set(&config)?;
    model.train_model(&training_set, config.training.cycles)?;

    let results = model.test_model(&simplified_test_set()?)?;
    for (value, expected) in LOWEST_BIT_LABELS.iter().enumerate() {
        info!(
            target: "asmlearn",
            "f({}) = {} (expected {})",
            value,
            model.run_model(value as u64)?,
            expected
        );
    }

    println!("{}", results);
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
