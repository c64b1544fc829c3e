//! Benchmark scenarios.
//!
//! Every scenario follows the same skeleton: drop any leftover table, create
//! a fresh one, bulk-write rows, scan them back with different batch sizes and
//! column filters, delete every row, and drop the table. The variants differ in
//! row shape (column families, payload sizes, sparse or dense columns, number
//! of columns per row) and are run independently so their timings never mix.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

use crate::admin::Admin;
use crate::config::BenchConfig;
use crate::error::{BenchError, StoreError};
use crate::rows::{PayloadGenerator, row_key};
use crate::store::{ColumnFamily, DisableOutcome, Mutation, StoreClient};
use crate::timing::TimingBatch;

/// Table recreated by [`Scenario::PrepareUsertable`].
pub const USERTABLE: &str = "usertable";

/// Sparse columns are written on every `SPARSE_STRIDE`-th row.
pub const SPARSE_STRIDE: usize = 100;

/// Value size of the cells in the wide-row scenarios.
pub const NARROW_VALUE_BYTES: usize = 32;

/// Block sizes of the `usertable` families; the last step repeats.
pub const USERTABLE_BLOCK_SIZES: [u32; 5] = [65536 / 16, 65536 / 2, 65536, 65536 * 2, 65536 * 2];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Scenario {
    /// One family, one 1 KiB-class column per row.
    #[value(name = "simple")]
    Simple,
    /// As `simple`, sized by `--value-size`, without the post-delete scan.
    #[value(name = "simple-valsize")]
    SimpleValsize,
    /// Small then large cells in one family.
    #[value(name = "small-large-1cf")]
    SmallLarge1cf,
    /// Small and large cells in separate families.
    #[value(name = "small-large-2cf")]
    SmallLarge2cf,
    /// A sparse column and a dense column in one family.
    #[value(name = "few-many-1cf")]
    FewMany1cf,
    /// A sparse column and a dense column in separate families.
    #[value(name = "few-many-2cf")]
    FewMany2cf,
    /// Many narrow columns in one family.
    #[value(name = "manycols-1cf")]
    Manycols1cf,
    /// One narrow column in each of many families.
    #[value(name = "manycols-manycf")]
    ManycolsManycf,
    /// Recreate `usertable` with a ladder of block sizes and keep it.
    #[value(name = "prepare-usertable")]
    PrepareUsertable,
}

impl Scenario {
    pub const ALL: [Scenario; 9] = [
        Scenario::Simple,
        Scenario::SimpleValsize,
        Scenario::SmallLarge1cf,
        Scenario::SmallLarge2cf,
        Scenario::FewMany1cf,
        Scenario::FewMany2cf,
        Scenario::Manycols1cf,
        Scenario::ManycolsManycf,
        Scenario::PrepareUsertable,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Simple => "simple",
            Scenario::SimpleValsize => "simple-valsize",
            Scenario::SmallLarge1cf => "small-large-1cf",
            Scenario::SmallLarge2cf => "small-large-2cf",
            Scenario::FewMany1cf => "few-many-1cf",
            Scenario::FewMany2cf => "few-many-2cf",
            Scenario::Manycols1cf => "manycols-1cf",
            Scenario::ManycolsManycf => "manycols-manycf",
            Scenario::PrepareUsertable => "prepare-usertable",
        }
    }

    /// Family count used when `--cf-count` is not given; `None` for
    /// scenarios whose families are fixed.
    pub fn default_cf_count(self) -> Option<usize> {
        match self {
            Scenario::ManycolsManycf => Some(100),
            Scenario::PrepareUsertable => Some(USERTABLE_BLOCK_SIZES.len()),
            _ => None,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rows and round trips seen by one timed scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub rows: usize,
    pub batches: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanRecord {
    pub label: String,
    #[serde(flatten)]
    pub summary: ScanSummary,
}

/// What a scenario observed besides its timings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScenarioOutcome {
    pub scans: Vec<ScanRecord>,
}

impl ScenarioOutcome {
    /// Summary of the most recent scan recorded under `label`.
    pub fn scan(&self, label: &str) -> Option<ScanSummary> {
        self.scans
            .iter()
            .rev()
            .find(|record| record.label == label)
            .map(|record| record.summary)
    }
}

/// Label under which a scan with `batch` rows per fetch is timed.
pub fn scan_label(batch: usize, column: &str) -> String {
    format!("scanner:rows{batch}-{column}")
}

/// Drives a [`StoreClient`] through the benchmark scenarios, one blocking
/// call at a time.
pub struct Runner<C> {
    client: C,
    admin: Admin,
    config: BenchConfig,
    payloads: PayloadGenerator,
    outcome: ScenarioOutcome,
}

impl<C: StoreClient> Runner<C> {
    pub fn new(client: C, admin: Admin, config: BenchConfig) -> Self {
        let payloads = PayloadGenerator::new(config.seed);
        Self {
            client,
            admin,
            config,
            payloads,
            outcome: ScenarioOutcome::default(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Runs `scenario`, recording each phase into `timings`. The first store
    /// error aborts the scenario and is returned as is.
    pub async fn run(
        &mut self,
        scenario: Scenario,
        timings: &mut TimingBatch,
    ) -> Result<ScenarioOutcome, BenchError> {
        tracing::info!(%scenario, rows = self.config.rows, "starting scenario");
        self.outcome = ScenarioOutcome::default();

        match scenario {
            Scenario::Simple => self.simple(timings, "cf0:small", true).await?,
            Scenario::SimpleValsize => self.simple(timings, "cf0:0", false).await?,
            Scenario::SmallLarge1cf => self.small_large(timings, false).await?,
            Scenario::SmallLarge2cf => self.small_large(timings, true).await?,
            Scenario::FewMany1cf => self.few_many(timings, false).await?,
            Scenario::FewMany2cf => self.few_many(timings, true).await?,
            Scenario::Manycols1cf => self.manycols_1cf(timings).await?,
            Scenario::ManycolsManycf => self.manycols_manycf(timings).await?,
            Scenario::PrepareUsertable => self.prepare_usertable(timings).await?,
        }

        tracing::info!(%scenario, "scenario finished");
        Ok(std::mem::take(&mut self.outcome))
    }

    async fn simple(
        &mut self,
        timings: &mut TimingBatch,
        column: &str,
        rescan: bool,
    ) -> Result<(), BenchError> {
        self.recreate_table(timings, &["cf0"]).await?;
        let columns = [column.to_string()];
        let size = self.config.value_size;
        timings
            .time("mutateRow:Create", self.put_rows(&columns, size, 1))
            .await?;

        self.scan(timings, "", 10).await?;
        self.scan(timings, "", 1).await?;
        self.delete_rows(timings).await?;
        if rescan {
            self.scan(timings, "", 1).await?;
        }
        let table = self.config.table.clone();
        self.remove_table(&table).await?;
        Ok(())
    }

    async fn small_large(
        &mut self,
        timings: &mut TimingBatch,
        two_families: bool,
    ) -> Result<(), BenchError> {
        let families = if two_families { vec!["cf0", "cf1"] } else { vec!["cf0"] };
        let large = if two_families { "cf1:large" } else { "cf0:large" };
        self.recreate_table(timings, &families).await?;

        let small_size = self.config.value_size;
        timings
            .time(
                "mutateRow:Create-small",
                self.put_rows(&["cf0:small".to_string()], small_size, 1),
            )
            .await?;
        self.scan_each(timings, &["cf0:small"], &[10, 1]).await?;

        let large_size = self.config.large_value_size;
        timings
            .time(
                "mutateRow:Create-large",
                self.put_rows(&[large.to_string()], large_size, 1),
            )
            .await?;
        self.scan_each(timings, &["cf0:small", large, ""], &[10, 1])
            .await?;

        self.finish(timings).await
    }

    async fn few_many(
        &mut self,
        timings: &mut TimingBatch,
        two_families: bool,
    ) -> Result<(), BenchError> {
        let families = if two_families { vec!["cf0", "cf1"] } else { vec!["cf0"] };
        let many = if two_families { "cf1:many" } else { "cf0:many" };
        self.recreate_table(timings, &families).await?;

        let size = self.config.value_size;
        timings
            .time(
                "mutateRow:Create-few",
                self.put_rows(&["cf0:few".to_string()], size, SPARSE_STRIDE),
            )
            .await?;
        self.scan_each(timings, &["cf0:few"], &[100, 10, 1]).await?;

        timings
            .time(
                "mutateRow:Create-many",
                self.put_rows(&[many.to_string()], size, 1),
            )
            .await?;
        self.scan_each(timings, &["cf0:few", many, ""], &[100, 10, 1])
            .await?;

        self.finish(timings).await
    }

    async fn manycols_1cf(&mut self, timings: &mut TimingBatch) -> Result<(), BenchError> {
        self.recreate_table(timings, &["cf0"]).await?;
        let columns: Vec<String> = (0..self.config.columns).map(|y| format!("cf0:{y}")).collect();
        timings
            .time(
                "mutateRow:Create",
                self.put_rows(&columns, NARROW_VALUE_BYTES, 1),
            )
            .await?;
        self.scan_each(timings, &["cf0:0", ""], &[10, 1]).await?;
        self.finish(timings).await
    }

    async fn manycols_manycf(&mut self, timings: &mut TimingBatch) -> Result<(), BenchError> {
        let count = self
            .config
            .cf_count_for(Scenario::ManycolsManycf)
            .unwrap_or(1);
        let families: Vec<String> = (0..count).map(|y| format!("cf{y}")).collect();
        let family_refs: Vec<&str> = families.iter().map(String::as_str).collect();
        self.recreate_table(timings, &family_refs).await?;

        let columns: Vec<String> = (0..count).map(|y| format!("cf{y}:{y}")).collect();
        timings
            .time(
                "mutateRow:Create",
                self.put_rows(&columns, NARROW_VALUE_BYTES, 1),
            )
            .await?;
        self.scan_each(timings, &["cf0:0", ""], &[10, 1]).await?;
        self.finish(timings).await
    }

    async fn prepare_usertable(&mut self, timings: &mut TimingBatch) -> Result<(), BenchError> {
        let count = self
            .config
            .cf_count_for(Scenario::PrepareUsertable)
            .unwrap_or(USERTABLE_BLOCK_SIZES.len());
        let families: Vec<ColumnFamily> = (0..count)
            .map(|n| {
                let step = n.min(USERTABLE_BLOCK_SIZES.len() - 1);
                ColumnFamily::new(format!("cf{n}"), USERTABLE_BLOCK_SIZES[step])
            })
            .collect();

        self.remove_table(USERTABLE).await?;
        timings
            .time(
                "createTable",
                self.admin.create_table(&mut self.client, USERTABLE, &families),
            )
            .await?;
        Ok(())
    }

    /// Drops any existing benchmark table and creates it anew with `families`,
    /// each carrying the configured block size.
    async fn recreate_table(
        &mut self,
        timings: &mut TimingBatch,
        families: &[&str],
    ) -> Result<(), BenchError> {
        let table = self.config.table.clone();
        let families: Vec<ColumnFamily> = families
            .iter()
            .map(|name| ColumnFamily::new(*name, self.config.block_size))
            .collect();

        self.remove_table(&table).await?;
        timings
            .time(
                "createTable",
                self.admin.create_table(&mut self.client, &table, &families),
            )
            .await?;
        Ok(())
    }

    /// Deletes every row, rescans to confirm the table is empty, and drops it.
    async fn finish(&mut self, timings: &mut TimingBatch) -> Result<(), BenchError> {
        self.delete_rows(timings).await?;
        self.scan(timings, "", 1).await?;
        let table = self.config.table.clone();
        self.remove_table(&table).await?;
        Ok(())
    }

    /// Disables and deletes `table` if it exists. A table that is already
    /// disabled, or that vanished between listing and disabling, is not an
    /// error; anything else is.
    pub async fn remove_table(&mut self, table: &str) -> Result<(), StoreError> {
        let names = self.client.table_names().await?;
        if !names.iter().any(|name| name == table) {
            return Ok(());
        }

        match self.client.disable_table(table).await {
            Ok(DisableOutcome::Disabled) => {}
            Ok(DisableOutcome::AlreadyDisabled) => {
                tracing::debug!(%table, "table was already disabled");
            }
            Err(StoreError::NotFound(message)) => {
                tracing::debug!(%table, %message, "table disappeared before disable");
                return Ok(());
            }
            Err(err) => return Err(err),
        }
        self.client.delete_table(table).await
    }

    /// Writes `columns` on every `stride`-th row in `[0, rows)`, one mutation
    /// per row, each cell a fresh random value of `value_size` bytes.
    async fn put_rows(
        &mut self,
        columns: &[String],
        value_size: usize,
        stride: usize,
    ) -> Result<usize, StoreError> {
        let table = self.config.table.clone();
        let mut written = 0;
        for index in (0..self.config.rows).step_by(stride.max(1)) {
            let mutations = columns
                .iter()
                .map(|column| Mutation::put(column.clone(), self.payloads.value(value_size)))
                .collect();
            self.client
                .mutate_row(&table, &row_key(index), mutations)
                .await?;
            written += 1;
        }
        tracing::debug!(%table, written, ?columns, "rows written");
        Ok(written)
    }

    async fn scan_each(
        &mut self,
        timings: &mut TimingBatch,
        columns: &[&str],
        batches: &[usize],
    ) -> Result<(), StoreError> {
        for column in columns {
            for batch in batches {
                self.scan(timings, column, *batch).await?;
            }
        }
        Ok(())
    }

    async fn scan(
        &mut self,
        timings: &mut TimingBatch,
        column: &str,
        batch: usize,
    ) -> Result<ScanSummary, StoreError> {
        let label = scan_label(batch, column);
        let summary = timings
            .time(label.clone(), self.scan_rows(column, batch))
            .await?;
        tracing::info!(%label, rows = summary.rows, batches = summary.batches, "scan finished");
        self.outcome.scans.push(ScanRecord { label, summary });
        Ok(summary)
    }

    /// Opens a cursor filtered to `column` (empty for all columns) and
    /// fetches `batch` rows at a time, at most `ceil(rows / batch)` times,
    /// stopping at the first empty batch.
    async fn scan_rows(&mut self, column: &str, batch: usize) -> Result<ScanSummary, StoreError> {
        let table = self.config.table.clone();
        let columns = if column.is_empty() {
            Vec::new()
        } else {
            vec![column.to_string()]
        };
        let batch = batch.max(1);

        let scanner = self.client.scanner_open(&table, "", &columns).await?;
        let mut summary = ScanSummary::default();
        for _ in 0..self.config.rows.div_ceil(batch) {
            let rows = self.client.scanner_get_list(scanner, batch).await?;
            if rows.is_empty() {
                break;
            }
            summary.rows += rows.len();
            summary.batches += 1;
        }
        self.client.scanner_close(scanner).await?;
        Ok(summary)
    }

    async fn delete_rows(&mut self, timings: &mut TimingBatch) -> Result<(), StoreError> {
        let table = self.config.table.clone();
        let rows = self.config.rows;
        let client = &mut self.client;
        timings
            .time("deleteAllRow:Delete", async move {
                for index in 0..rows {
                    client.delete_all_row(&table, &row_key(index)).await?;
                }
                Ok::<_, StoreError>(())
            })
            .await
    }
}
