// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three tiers, later ones win:
//! 1. TOML file
//! 2. Environment variables
//! 3. CLI arguments

use crate::{AsmlearnConfig, ConfigError, ConfigResult};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILE_NAME: &str = "asmlearn_configuration.toml";

/// Find the configuration file
///
/// Search order:
/// 1. `ASMLEARN_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("ASMLEARN_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by ASMLEARN_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        search_paths.extend(
            cwd.ancestors()
                .skip(1)
                .take(5)
                .map(|dir| dir.join(CONFIG_FILE_NAME)),
        );
    }

    if let Some(path) = search_paths.iter().find(|path| path.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet ASMLEARN_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from a TOML file and apply overrides
///
/// * `config_path` - Optional path to config file. If `None`, the file is searched for.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the config file is not found or contains invalid TOML.
/// Values are not validated here; see [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<AsmlearnConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: AsmlearnConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `ASMLEARN_P` -> `brain.p`
/// - `ASMLEARN_SEED` -> `brain.seed`
/// - `ASMLEARN_CYCLES` -> `training.cycles`
/// - `ASMLEARN_NOISE_PROBABILITY` -> `training.noise_probability`
/// - `ASMLEARN_NOISE_SEED` -> `training.noise_seed`
/// - `ASMLEARN_LOG_LEVEL` -> `logging.level`
/// - `ASMLEARN_LOG_FORMAT` -> `logging.format`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut AsmlearnConfig) {
    let var = |name: &str| env::var(name).ok();

    set_parsed(&mut config.brain.p, var("ASMLEARN_P"));
    set_parsed_option(&mut config.brain.seed, var("ASMLEARN_SEED"));
    set_parsed(&mut config.training.cycles, var("ASMLEARN_CYCLES"));
    set_parsed(
        &mut config.training.noise_probability,
        var("ASMLEARN_NOISE_PROBABILITY"),
    );
    set_parsed_option(&mut config.training.noise_seed, var("ASMLEARN_NOISE_SEED"));
    if let Some(value) = var("ASMLEARN_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Some(value) = var("ASMLEARN_LOG_FORMAT") {
        config.logging.format = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// * `cli_args` - Map of CLI arguments (e.g., `{"seed": "7", "cycles": "20"}`)
pub fn apply_cli_overrides(config: &mut AsmlearnConfig, cli_args: &HashMap<String, String>) {
    let arg = |name: &str| cli_args.get(name).cloned();

    // Brain
    set_parsed(&mut config.brain.p, arg("p"));
    set_parsed_option(&mut config.brain.seed, arg("seed"));
    set_parsed(&mut config.brain.area_size, arg("area_size"));
    set_parsed(&mut config.brain.winners, arg("winners"));
    set_parsed(&mut config.brain.plasticity, arg("plasticity"));
    set_parsed(&mut config.brain.output_plasticity, arg("output_plasticity"));
    set_parsed(&mut config.brain.stimulus_size, arg("stimulus_size"));

    // Training
    set_parsed(&mut config.training.cycles, arg("cycles"));
    set_parsed_option(
        &mut config.training.training_set_length,
        arg("training_set_length"),
    );
    set_parsed(&mut config.training.noise_probability, arg("noise_probability"));
    set_parsed_option(&mut config.training.noise_seed, arg("noise_seed"));

    // Logging
    if let Some(value) = arg("log_level") {
        config.logging.level = value;
    }
    if let Some(value) = arg("log_format") {
        config.logging.format = value;
    }
}

fn set_parsed<T: FromStr>(field: &mut T, value: Option<String>) {
    if let Some(parsed) = value.and_then(|v| v.trim().parse().ok()) {
        *field = parsed;
    }
}

fn set_parsed_option<T: FromStr>(field: &mut Option<T>, value: Option<String>) {
    if let Some(parsed) = value.and_then(|v| v.trim().parse().ok()) {
        *field = Some(parsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const OVERRIDE_VARS: [&str; 7] = [
        "ASMLEARN_P",
        "ASMLEARN_SEED",
        "ASMLEARN_CYCLES",
        "ASMLEARN_NOISE_PROBABILITY",
        "ASMLEARN_NOISE_SEED",
        "ASMLEARN_LOG_LEVEL",
        "ASMLEARN_LOG_FORMAT",
    ];

    fn clear_override_vars() {
        for name in OVERRIDE_VARS {
            env::remove_var(name);
        }
    }

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("ASMLEARN_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("ASMLEARN_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing_file() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();

        env::set_var("ASMLEARN_CONFIG_PATH", dir.path().join("nope.toml"));
        let result = find_config_file();
        env::remove_var("ASMLEARN_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[brain]").unwrap();
        writeln!(file, "p = 0.3").unwrap();
        writeln!(file, "seed = 42").unwrap();
        writeln!(file, "[training]").unwrap();
        writeln!(file, "cycles = 10").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.brain.p, 0.3);
        assert_eq!(config.brain.seed, Some(42));
        assert_eq!(config.training.cycles, 10);
        assert_eq!(config.training.noise_probability, 0.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_config(Some(&dir.path().join(CONFIG_FILE_NAME)), None);
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let mut config = AsmlearnConfig::default();

        env::set_var("ASMLEARN_SEED", "99");
        env::set_var("ASMLEARN_NOISE_PROBABILITY", "0.25");
        env::set_var("ASMLEARN_CYCLES", "not-a-number");

        apply_environment_overrides(&mut config);
        clear_override_vars();

        assert_eq!(config.brain.seed, Some(99));
        assert_eq!(config.training.noise_probability, 0.25);
        assert_eq!(config.training.cycles, 50);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = AsmlearnConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("winners".to_string(), "12".to_string());
        cli_args.insert("training_set_length".to_string(), "40".to_string());
        cli_args.insert("log_format".to_string(), "json".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.brain.winners, 12);
        assert_eq!(config.training.training_set_length, Some(40));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[brain]").unwrap();
        writeln!(file, "seed = 1").unwrap();
        writeln!(file, "p = 0.2").unwrap();

        env::set_var("ASMLEARN_SEED", "2");
        env::set_var("ASMLEARN_P", "0.4");

        let mut cli_args = HashMap::new();
        cli_args.insert("seed".to_string(), "3".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();
        clear_override_vars();

        // CLI wins for seed, env wins for p
        assert_eq!(config.brain.seed, Some(3));
        assert_eq!(config.brain.p, 0.4);
    }
}
