use async_trait::async_trait;

pub use rowstore::{ColumnFamily, DisableOutcome, Mutation, RowResult, ScannerId};

use crate::error::StoreError;

/// Client side of a row store. Calls are issued one at a time by the owner
/// of the handle, so every method takes `&mut self`.
#[async_trait]
pub trait StoreClient: Send {
    async fn table_names(&mut self) -> Result<Vec<String>, StoreError>;

    async fn create_table(
        &mut self,
        table: &str,
        families: &[ColumnFamily],
    ) -> Result<(), StoreError>;

    async fn column_descriptors(&mut self, table: &str) -> Result<Vec<ColumnFamily>, StoreError>;

    async fn enable_table(&mut self, table: &str) -> Result<(), StoreError>;

    /// Disabling an already disabled table is not an error; it is reported
    /// as [`DisableOutcome::AlreadyDisabled`].
    async fn disable_table(&mut self, table: &str) -> Result<DisableOutcome, StoreError>;

    /// The table must be disabled first.
    async fn delete_table(&mut self, table: &str) -> Result<(), StoreError>;

    async fn mutate_row(
        &mut self,
        table: &str,
        row: &str,
        mutations: Vec<Mutation>,
    ) -> Result<(), StoreError>;

    /// Opens a server-side cursor from `start_row` (empty for the first
    /// row). An empty `columns` selects every column.
    async fn scanner_open(
        &mut self,
        table: &str,
        start_row: &str,
        columns: &[String],
    ) -> Result<ScannerId, StoreError>;

    /// Fetches up to `rows` rows. An empty batch marks the end of the scan.
    async fn scanner_get_list(
        &mut self,
        scanner: ScannerId,
        rows: usize,
    ) -> Result<Vec<RowResult>, StoreError>;

    async fn scanner_close(&mut self, scanner: ScannerId) -> Result<(), StoreError>;

    async fn delete_all_row(&mut self, table: &str, row: &str) -> Result<(), StoreError>;
}
