use clap::{Parser, ValueEnum};

use crate::error::ConfigError;
use crate::scenario::Scenario;

pub const DEFAULT_HOST: &str = "http://127.0.0.1:50051";
pub const DEFAULT_TABLE: &str = "benchtable";
pub const DEFAULT_SHELL_COMMAND: &str = "hbase shell -n";

/// Largest single cell value the harness will generate.
pub const MAX_VALUE_BYTES: usize = 64 * 1024 * 1024;

/// Where table creation is sent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AdminKind {
    /// Through the store's own RPC interface.
    Rpc,
    /// Through an external administrative shell.
    Shell,
}

#[derive(Parser, Debug)]
#[command(name = "rowbench", author, version, about, long_about = None)]
pub struct Cli {
    /// Row store endpoint.
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Scenarios to run, in order (comma separated or repeated).
    #[arg(long, value_enum, value_delimiter = ',', default_value = "simple")]
    pub scenario: Vec<Scenario>,

    /// Number of rows written per scenario.
    #[arg(long, default_value_t = 1000)]
    pub rows: usize,

    /// Size in bytes of regular cell values.
    #[arg(long, default_value_t = 1024)]
    pub value_size: usize,

    /// Size in bytes of the cells written by the small/large scenarios.
    #[arg(long, default_value_t = 1024 * 1024)]
    pub large_value_size: usize,

    /// Columns per row in the wide-row scenarios.
    #[arg(long, default_value_t = 100)]
    pub columns: usize,

    /// Column families for scenarios with a variable family count.
    #[arg(long)]
    pub cf_count: Option<usize>,

    /// Block size hint given to every column family.
    #[arg(long, default_value_t = 65536)]
    pub block_size: u32,

    /// Name of the scratch table used by the benchmark scenarios.
    #[arg(long, default_value = DEFAULT_TABLE)]
    pub table: String,

    /// Channel used for table creation.
    #[arg(long, value_enum, default_value_t = AdminKind::Rpc)]
    pub admin: AdminKind,

    /// Command line of the administrative shell (with `--admin shell`).
    #[arg(long, default_value = DEFAULT_SHELL_COMMAND)]
    pub shell_command: String,

    /// Seed for value generation; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run against an in-process store instead of `--host`.
    #[arg(long, default_value_t = false)]
    pub embedded: bool,

    /// Print one JSON report per scenario instead of per-phase lines.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Cli {
    pub fn into_config(self) -> Result<BenchConfig, ConfigError> {
        let config = BenchConfig {
            host: self.host,
            scenarios: self.scenario,
            rows: self.rows,
            value_size: self.value_size,
            large_value_size: self.large_value_size,
            columns: self.columns,
            cf_count: self.cf_count,
            block_size: self.block_size,
            table: self.table,
            admin: self.admin,
            shell_command: self.shell_command,
            seed: self.seed,
            embedded: self.embedded,
            json: self.json,
        };
        config.validate()?;

        if config.cf_count.is_some()
            && config
                .scenarios
                .iter()
                .all(|s| s.default_cf_count().is_none())
        {
            tracing::warn!(
                scenarios = ?config.scenarios,
                "--cf-count has no effect on the selected scenarios"
            );
        }
        Ok(config)
    }
}

/// Validated benchmark parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub host: String,
    pub scenarios: Vec<Scenario>,
    pub rows: usize,
    pub value_size: usize,
    pub large_value_size: usize,
    pub columns: usize,
    pub cf_count: Option<usize>,
    pub block_size: u32,
    pub table: String,
    pub admin: AdminKind,
    pub shell_command: String,
    pub seed: Option<u64>,
    pub embedded: bool,
    pub json: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            scenarios: vec![Scenario::Simple],
            rows: 1000,
            value_size: 1024,
            large_value_size: 1024 * 1024,
            columns: 100,
            cf_count: None,
            block_size: 65536,
            table: DEFAULT_TABLE.into(),
            admin: AdminKind::Rpc,
            shell_command: DEFAULT_SHELL_COMMAND.into(),
            seed: None,
            embedded: false,
            json: false,
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scenarios.is_empty() {
            return Err(ConfigError::NoScenario);
        }
        for (name, value) in [
            ("rows", self.rows),
            ("value-size", self.value_size),
            ("large-value-size", self.large_value_size),
            ("columns", self.columns),
            ("block-size", self.block_size as usize),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero(name));
            }
        }
        if self.cf_count == Some(0) {
            return Err(ConfigError::Zero("cf-count"));
        }
        for (name, value) in [
            ("value-size", self.value_size),
            ("large-value-size", self.large_value_size),
        ] {
            if value > MAX_VALUE_BYTES {
                return Err(ConfigError::TooLarge {
                    name,
                    value,
                    max: MAX_VALUE_BYTES,
                });
            }
        }
        if self.table.trim().is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        if self.admin == AdminKind::Shell && self.shell_command.trim().is_empty() {
            return Err(ConfigError::EmptyShellCommand);
        }
        if self.admin == AdminKind::Shell && self.embedded {
            return Err(ConfigError::EmbeddedShellAdmin);
        }
        Ok(())
    }

    /// Family count for `scenario`: `--cf-count` when given, otherwise the
    /// scenario's own default. Fixed-shape scenarios return `None`.
    pub fn cf_count_for(&self, scenario: Scenario) -> Option<usize> {
        scenario
            .default_cf_count()
            .map(|default| self.cf_count.unwrap_or(default))
    }
}
