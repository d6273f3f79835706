//! # GroupSync CLI
//!
//! Glue between the command line and `groupsync-core`: configuration,
//! logging, reading schedule codes and printing groups as JSON.

pub mod config;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use eyre::{Result, WrapErr};
use groupsync_core::random::random_students;
use groupsync_core::{create_groups_with, display_groups, DisplayGroup, Student, TimezoneRegistry};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::GroupsConfig;

/// Installs a global `tracing` subscriber writing to stderr, so stdout only
/// carries program output. Fails if a subscriber is already installed.
pub fn init_logging(level: Level) -> Result<()> {
    let filter = EnvFilter::default().add_directive(level.into());
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Collects one schedule code per line, skipping blank lines.
pub fn read_codes(reader: impl BufRead) -> Result<Vec<String>> {
    let mut codes = Vec::new();
    for line in reader.lines() {
        let line = line.wrap_err("Failed to read schedule codes")?;
        let code = line.trim();
        if !code.is_empty() {
            codes.push(code.to_string());
        }
    }
    Ok(codes)
}

/// Reads codes from the configured input file, or from stdin.
pub fn read_input(config: &GroupsConfig) -> Result<Vec<String>> {
    match &config.input {
        Some(path) => {
            let file = File::open(path)
                .wrap_err_with(|| format!("Failed to open input file {}", path.display()))?;
            read_codes(BufReader::new(file))
        }
        None => read_codes(io::stdin().lock()),
    }
}

/// Forms groups out of `codes` as described by `config`.
pub fn form_groups(config: &GroupsConfig, codes: &[String]) -> Result<Vec<DisplayGroup>> {
    let strategy = config.strategy.build(config.seed);
    info!(
        codes = codes.len(),
        strategy = %config.strategy,
        "Forming groups"
    );

    let groups = create_groups_with(
        TimezoneRegistry::global(),
        codes,
        config.group_size,
        &config.output_timezone,
        strategy.as_ref(),
    )
    .wrap_err("Failed to form groups")?;

    Ok(display_groups(&groups))
}

/// Reads the input, forms groups and renders them as pretty JSON.
pub fn run(config: &GroupsConfig) -> Result<String> {
    let codes = read_input(config)?;
    let groups = form_groups(config, &codes)?;
    serde_json::to_string_pretty(&groups).wrap_err("Failed to serialize groups")
}

/// Schedule codes of a random roster, plus the seed that reproduces it.
pub fn random_codes(config: &GroupsConfig) -> (Vec<String>, u64) {
    let (students, seed) = random_students(TimezoneRegistry::global(), config.random_count, config.seed);
    (students.iter().map(Student::encode).collect(), seed)
}
