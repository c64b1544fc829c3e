use std::sync::Arc;

use tokio::sync::RwLock;
use tonic::{Request, Response, Status};

use crate::proto::row_store_server::RowStore;
use crate::proto::{
    self, CreateTableRequest, CreateTableResponse, DeleteAllRowRequest, DeleteAllRowResponse,
    DeleteTableRequest, DeleteTableResponse, DisableTableRequest, DisableTableResponse,
    EnableTableRequest, EnableTableResponse, GetColumnDescriptorsRequest,
    GetColumnDescriptorsResponse, GetTableNamesRequest, GetTableNamesResponse, MutateRowRequest,
    MutateRowResponse, ScannerCloseRequest, ScannerCloseResponse, ScannerGetListRequest,
    ScannerGetListResponse, ScannerOpenRequest, ScannerOpenResponse,
};
use crate::table::TableStore;

/// gRPC front end over a shared [`TableStore`].
#[derive(Debug, Default, Clone)]
pub struct RowStoreService {
    store: Arc<RwLock<TableStore>>,
}

impl RowStoreService {
    pub fn new(store: Arc<RwLock<TableStore>>) -> Self {
        Self { store }
    }
}

#[tonic::async_trait]
impl RowStore for RowStoreService {
    #[tracing::instrument(skip_all)]
    async fn get_table_names(
        &self,
        _request: Request<GetTableNamesRequest>,
    ) -> Result<Response<GetTableNamesResponse>, Status> {
        let names = self.store.read().await.table_names();
        tracing::debug!(count = names.len(), "listing tables");
        Ok(Response::new(GetTableNamesResponse { names }))
    }

    #[tracing::instrument(skip_all, fields(table = %request.get_ref().table))]
    async fn create_table(
        &self,
        request: Request<CreateTableRequest>,
    ) -> Result<Response<CreateTableResponse>, Status> {
        let input = request.into_inner();
        let families = input.families.into_iter().map(Into::into).collect();

        let mut store = self.store.write().await;
        store.create_table(&input.table, families)?;
        drop(store);

        tracing::info!("created table");
        Ok(Response::new(CreateTableResponse {}))
    }

    #[tracing::instrument(skip_all, fields(table = %request.get_ref().table))]
    async fn get_column_descriptors(
        &self,
        request: Request<GetColumnDescriptorsRequest>,
    ) -> Result<Response<GetColumnDescriptorsResponse>, Status> {
        let input = request.get_ref();
        let families = self
            .store
            .read()
            .await
            .column_descriptors(&input.table)?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(Response::new(GetColumnDescriptorsResponse { families }))
    }

    #[tracing::instrument(skip_all, fields(table = %request.get_ref().table))]
    async fn enable_table(
        &self,
        request: Request<EnableTableRequest>,
    ) -> Result<Response<EnableTableResponse>, Status> {
        let input = request.get_ref();
        self.store.write().await.enable_table(&input.table)?;
        tracing::info!("enabled table");
        Ok(Response::new(EnableTableResponse {}))
    }

    #[tracing::instrument(skip_all, fields(table = %request.get_ref().table))]
    async fn disable_table(
        &self,
        request: Request<DisableTableRequest>,
    ) -> Result<Response<DisableTableResponse>, Status> {
        let input = request.get_ref();
        let outcome = self.store.write().await.disable_table(&input.table)?;
        tracing::info!(?outcome, "disable requested");
        Ok(Response::new(DisableTableResponse {
            outcome: proto::DisableOutcome::from(outcome) as i32,
        }))
    }

    #[tracing::instrument(skip_all, fields(table = %request.get_ref().table))]
    async fn delete_table(
        &self,
        request: Request<DeleteTableRequest>,
    ) -> Result<Response<DeleteTableResponse>, Status> {
        let input = request.get_ref();
        self.store.write().await.delete_table(&input.table)?;
        tracing::info!("deleted table");
        Ok(Response::new(DeleteTableResponse {}))
    }

    #[tracing::instrument(skip_all, fields(table = %request.get_ref().table, row = %request.get_ref().row))]
    async fn mutate_row(
        &self,
        request: Request<MutateRowRequest>,
    ) -> Result<Response<MutateRowResponse>, Status> {
        let input = request.into_inner();
        let mutations = input.mutations.into_iter().map(Into::into).collect();

        let mut store = self.store.write().await;
        store.mutate_row(&input.table, &input.row, mutations)?;
        drop(store);

        tracing::trace!("applied mutation");
        Ok(Response::new(MutateRowResponse {}))
    }

    #[tracing::instrument(skip_all, fields(table = %request.get_ref().table))]
    async fn scanner_open(
        &self,
        request: Request<ScannerOpenRequest>,
    ) -> Result<Response<ScannerOpenResponse>, Status> {
        let input = request.get_ref();
        let scanner_id = self.store.write().await.scanner_open(
            &input.table,
            &input.start_row,
            &input.columns,
        )?;
        tracing::debug!(scanner_id, columns = ?input.columns, "opened scanner");
        Ok(Response::new(ScannerOpenResponse { scanner_id }))
    }

    #[tracing::instrument(skip_all, fields(scanner_id = request.get_ref().scanner_id))]
    async fn scanner_get_list(
        &self,
        request: Request<ScannerGetListRequest>,
    ) -> Result<Response<ScannerGetListResponse>, Status> {
        let input = request.get_ref();
        let rows = self
            .store
            .write()
            .await
            .scanner_get_list(input.scanner_id, input.rows)?;
        tracing::trace!(returned = rows.len(), "fetched rows");
        Ok(Response::new(ScannerGetListResponse {
            rows: rows.into_iter().map(Into::into).collect(),
        }))
    }

    #[tracing::instrument(skip_all, fields(scanner_id = request.get_ref().scanner_id))]
    async fn scanner_close(
        &self,
        request: Request<ScannerCloseRequest>,
    ) -> Result<Response<ScannerCloseResponse>, Status> {
        self.store
            .write()
            .await
            .scanner_close(request.get_ref().scanner_id)?;
        tracing::debug!("closed scanner");
        Ok(Response::new(ScannerCloseResponse {}))
    }

    #[tracing::instrument(skip_all, fields(table = %request.get_ref().table, row = %request.get_ref().row))]
    async fn delete_all_row(
        &self,
        request: Request<DeleteAllRowRequest>,
    ) -> Result<Response<DeleteAllRowResponse>, Status> {
        let input = request.get_ref();
        self.store
            .write()
            .await
            .delete_all_row(&input.table, &input.row)?;
        tracing::trace!("deleted row");
        Ok(Response::new(DeleteAllRowResponse {}))
    }
}
