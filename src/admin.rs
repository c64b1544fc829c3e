use std::fmt::Write as _;
use std::io;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::{AdminKind, BenchConfig};
use crate::error::{AdminError, ConfigError};
use crate::store::{ColumnFamily, StoreClient};

/// Channel used for schema changes. Table creation is a blocking,
/// all-or-nothing step on either path.
#[derive(Debug, Clone)]
pub enum Admin {
    Rpc,
    Shell(ShellAdmin),
}

impl Admin {
    pub fn from_config(config: &BenchConfig) -> Result<Self, ConfigError> {
        match config.admin {
            AdminKind::Rpc => Ok(Admin::Rpc),
            AdminKind::Shell => Ok(Admin::Shell(ShellAdmin::new(&config.shell_command)?)),
        }
    }

    pub async fn create_table<C>(
        &self,
        client: &mut C,
        table: &str,
        families: &[ColumnFamily],
    ) -> Result<(), AdminError>
    where
        C: StoreClient + ?Sized,
    {
        match self {
            Admin::Rpc => Ok(client.create_table(table, families).await?),
            Admin::Shell(shell) => shell.create_table(table, families).await,
        }
    }
}

/// Creates tables by feeding a `create` statement to an HBase-style shell
/// running in non-interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellAdmin {
    program: String,
    args: Vec<String>,
}

impl ShellAdmin {
    /// `command` is split on whitespace; the first word is the program.
    pub fn new(command: &str) -> Result<Self, ConfigError> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next().ok_or(ConfigError::EmptyShellCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    pub async fn create_table(
        &self,
        table: &str,
        families: &[ColumnFamily],
    ) -> Result<(), AdminError> {
        let statement = create_statement(table, families);
        tracing::debug!(program = %self.program, %statement, "creating table through admin shell");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| AdminError::Spawn {
                command: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let script = format!("{statement}\nexit\n");
            match stdin.write_all(script.as_bytes()).await {
                // The shell may exit before reading its input; its status says why.
                Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {}
                other => other?,
            }
        }

        let output = child.wait_with_output().await?;
        let mut transcript = String::from_utf8_lossy(&output.stdout).into_owned();
        transcript.push_str(&String::from_utf8_lossy(&output.stderr));
        tracing::debug!(status = %output.status, %transcript, "admin shell finished");

        if !output.status.success() {
            return Err(AdminError::ShellFailed {
                status: output.status,
                output: transcript.trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Renders the shell statement creating `table` with `families`.
pub fn create_statement(table: &str, families: &[ColumnFamily]) -> String {
    let mut statement = format!("create '{table}'");
    for cf in families {
        let _ = write!(
            statement,
            ", {{NAME => '{}', VERSIONS => {}, BLOCKSIZE => {}, BLOCKCACHE => {}, \
             IN_MEMORY => {}, COMPRESSION => '{}', BLOOMFILTER => '{}'}}",
            cf.name,
            cf.max_versions,
            cf.block_size,
            cf.block_cache,
            cf.in_memory,
            cf.compression,
            cf.bloom_filter,
        );
    }
    statement
}
