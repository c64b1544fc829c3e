use async_trait::async_trait;
use rowstore::TableStore;

use crate::error::StoreError;
use crate::store::{ColumnFamily, DisableOutcome, Mutation, RowResult, ScannerId, StoreClient};

/// [`StoreClient`] over an in-process [`TableStore`], no network involved.
#[derive(Debug, Default)]
pub struct LocalStore {
    store: TableStore,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }
}

#[async_trait]
impl StoreClient for LocalStore {
    async fn table_names(&mut self) -> Result<Vec<String>, StoreError> {
        Ok(self.store.table_names())
    }

    async fn create_table(
        &mut self,
        table: &str,
        families: &[ColumnFamily],
    ) -> Result<(), StoreError> {
        Ok(self.store.create_table(table, families.to_vec())?)
    }

    async fn column_descriptors(&mut self, table: &str) -> Result<Vec<ColumnFamily>, StoreError> {
        Ok(self.store.column_descriptors(table)?)
    }

    async fn enable_table(&mut self, table: &str) -> Result<(), StoreError> {
        Ok(self.store.enable_table(table)?)
    }

    async fn disable_table(&mut self, table: &str) -> Result<DisableOutcome, StoreError> {
        Ok(self.store.disable_table(table)?)
    }

    async fn delete_table(&mut self, table: &str) -> Result<(), StoreError> {
        Ok(self.store.delete_table(table)?)
    }

    async fn mutate_row(
        &mut self,
        table: &str,
        row: &str,
        mutations: Vec<Mutation>,
    ) -> Result<(), StoreError> {
        Ok(self.store.mutate_row(table, row, mutations)?)
    }

    async fn scanner_open(
        &mut self,
        table: &str,
        start_row: &str,
        columns: &[String],
    ) -> Result<ScannerId, StoreError> {
        Ok(self.store.scanner_open(table, start_row, columns)?)
    }

    async fn scanner_get_list(
        &mut self,
        scanner: ScannerId,
        rows: usize,
    ) -> Result<Vec<RowResult>, StoreError> {
        let rows = i32::try_from(rows).unwrap_or(i32::MAX);
        Ok(self.store.scanner_get_list(scanner, rows)?)
    }

    async fn scanner_close(&mut self, scanner: ScannerId) -> Result<(), StoreError> {
        Ok(self.store.scanner_close(scanner)?)
    }

    async fn delete_all_row(&mut self, table: &str, row: &str) -> Result<(), StoreError> {
        Ok(self.store.delete_all_row(table, row)?)
    }
}
