use async_trait::async_trait;
use rowstore::proto::{
    self, CreateTableRequest, DeleteAllRowRequest, DeleteTableRequest, DisableTableRequest,
    EnableTableRequest, GetColumnDescriptorsRequest, GetTableNamesRequest, MutateRowRequest,
    ScannerCloseRequest, ScannerGetListRequest, ScannerOpenRequest,
};
use rowstore::{MAX_MESSAGE_BYTES, RowStoreClient};
use tonic::transport::Channel;

use crate::error::StoreError;
use crate::store::{ColumnFamily, DisableOutcome, Mutation, RowResult, ScannerId, StoreClient};

/// [`StoreClient`] speaking gRPC to a `RowStore` endpoint.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    inner: RowStoreClient<Channel>,
}

impl RemoteStore {
    /// Connects to `endpoint`, e.g. `http://127.0.0.1:50051`.
    pub async fn connect(endpoint: impl Into<String>) -> Result<Self, StoreError> {
        let endpoint = endpoint.into();
        tracing::debug!(%endpoint, "connecting to row store");
        let inner = RowStoreClient::connect(endpoint)
            .await?
            .max_decoding_message_size(MAX_MESSAGE_BYTES)
            .max_encoding_message_size(MAX_MESSAGE_BYTES);
        Ok(Self { inner })
    }
}

#[async_trait]
impl StoreClient for RemoteStore {
    async fn table_names(&mut self) -> Result<Vec<String>, StoreError> {
        let response = self
            .inner
            .get_table_names(GetTableNamesRequest {})
            .await?
            .into_inner();
        Ok(response.names)
    }

    async fn create_table(
        &mut self,
        table: &str,
        families: &[ColumnFamily],
    ) -> Result<(), StoreError> {
        self.inner
            .create_table(CreateTableRequest {
                table: table.to_string(),
                families: families.iter().cloned().map(Into::into).collect(),
            })
            .await?;
        Ok(())
    }

    async fn column_descriptors(&mut self, table: &str) -> Result<Vec<ColumnFamily>, StoreError> {
        let response = self
            .inner
            .get_column_descriptors(GetColumnDescriptorsRequest {
                table: table.to_string(),
            })
            .await?
            .into_inner();
        Ok(response.families.into_iter().map(Into::into).collect())
    }

    async fn enable_table(&mut self, table: &str) -> Result<(), StoreError> {
        self.inner
            .enable_table(EnableTableRequest {
                table: table.to_string(),
            })
            .await?;
        Ok(())
    }

    async fn disable_table(&mut self, table: &str) -> Result<DisableOutcome, StoreError> {
        let response = self
            .inner
            .disable_table(DisableTableRequest {
                table: table.to_string(),
            })
            .await?
            .into_inner();

        proto::DisableOutcome::try_from(response.outcome)
            .ok()
            .and_then(|outcome| DisableOutcome::try_from(outcome).ok())
            .ok_or(StoreError::MalformedResponse("disableTable"))
    }

    async fn delete_table(&mut self, table: &str) -> Result<(), StoreError> {
        self.inner
            .delete_table(DeleteTableRequest {
                table: table.to_string(),
            })
            .await?;
        Ok(())
    }

    async fn mutate_row(
        &mut self,
        table: &str,
        row: &str,
        mutations: Vec<Mutation>,
    ) -> Result<(), StoreError> {
        self.inner
            .mutate_row(MutateRowRequest {
                table: table.to_string(),
                row: row.to_string(),
                mutations: mutations.into_iter().map(Into::into).collect(),
            })
            .await?;
        Ok(())
    }

    async fn scanner_open(
        &mut self,
        table: &str,
        start_row: &str,
        columns: &[String],
    ) -> Result<ScannerId, StoreError> {
        let response = self
            .inner
            .scanner_open(ScannerOpenRequest {
                table: table.to_string(),
                start_row: start_row.to_string(),
                columns: columns.to_vec(),
            })
            .await?
            .into_inner();
        Ok(response.scanner_id)
    }

    async fn scanner_get_list(
        &mut self,
        scanner: ScannerId,
        rows: usize,
    ) -> Result<Vec<RowResult>, StoreError> {
        let response = self
            .inner
            .scanner_get_list(ScannerGetListRequest {
                scanner_id: scanner,
                rows: i32::try_from(rows).unwrap_or(i32::MAX),
            })
            .await?
            .into_inner();
        Ok(response.rows.into_iter().map(Into::into).collect())
    }

    async fn scanner_close(&mut self, scanner: ScannerId) -> Result<(), StoreError> {
        self.inner
            .scanner_close(ScannerCloseRequest {
                scanner_id: scanner,
            })
            .await?;
        Ok(())
    }

    async fn delete_all_row(&mut self, table: &str, row: &str) -> Result<(), StoreError> {
        self.inner
            .delete_all_row(DeleteAllRowRequest {
                table: table.to_string(),
                row: row.to_string(),
            })
            .await?;
        Ok(())
    }
}
