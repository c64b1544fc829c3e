use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use rowbench::store::{ColumnFamily, DisableOutcome, Mutation, RowResult, ScannerId};
use rowbench::{RemoteStore, StoreClient, StoreError};
use rowstore::{RowStoreService, TableStore, grpc_server};
use tokio::net::TcpListener;
use tokio::sync::{RwLock, oneshot};
use tokio::task::JoinHandle;
use tonic::transport::server::TcpIncoming;
use tonic::transport::{Error as TransportError, Server};

/// Reference store served on an ephemeral port for the lifetime of a test.
#[allow(dead_code)]
pub struct TestServer {
    addr: SocketAddr,
    store: Arc<RwLock<TableStore>>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<Result<(), TransportError>>>,
}

#[allow(dead_code)]
impl TestServer {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let addr = listener
            .local_addr()
            .expect("failed to read listener address");
        let incoming = TcpIncoming::from_listener(listener, true, None)
            .expect("failed to construct TcpIncoming");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let store = Arc::new(RwLock::new(TableStore::new()));
        let service = RowStoreService::new(store.clone());

        let handle = tokio::spawn(async move {
            Server::builder()
                .add_service(grpc_server(service))
                .serve_with_incoming_shutdown(incoming, async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Self {
            addr,
            store,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn client(&self) -> RemoteStore {
        RemoteStore::connect(self.endpoint())
            .await
            .expect("client connect")
    }

    pub fn store(&self) -> Arc<RwLock<TableStore>> {
        self.store.clone()
    }

    pub async fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(handle) = self.handle.take() {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => panic!("server exited with error: {err}"),
                Err(err) => panic!("server task panicked: {err}"),
            }
        }
    }
}

/// Call counts observed by [`CountingStore`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CallCounts {
    pub create_table: usize,
    pub delete_table: usize,
    pub mutate_row: usize,
    pub scanner_open: usize,
    pub scanner_get_list: usize,
    pub scanner_close: usize,
    pub delete_all_row: usize,
}

/// Forwards every call to the wrapped client and counts it.
#[allow(dead_code)]
pub struct CountingStore<C> {
    pub inner: C,
    pub calls: CallCounts,
}

#[allow(dead_code)]
impl<C> CountingStore<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            calls: CallCounts::default(),
        }
    }
}

#[async_trait]
impl<C: StoreClient> StoreClient for CountingStore<C> {
    async fn table_names(&mut self) -> Result<Vec<String>, StoreError> {
        self.inner.table_names().await
    }

    async fn create_table(
        &mut self,
        table: &str,
        families: &[ColumnFamily],
    ) -> Result<(), StoreError> {
        self.calls.create_table += 1;
        self.inner.create_table(table, families).await
    }

    async fn column_descriptors(&mut self, table: &str) -> Result<Vec<ColumnFamily>, StoreError> {
        self.inner.column_descriptors(table).await
    }

    async fn enable_table(&mut self, table: &str) -> Result<(), StoreError> {
        self.inner.enable_table(table).await
    }

    async fn disable_table(&mut self, table: &str) -> Result<DisableOutcome, StoreError> {
        self.inner.disable_table(table).await
    }

    async fn delete_table(&mut self, table: &str) -> Result<(), StoreError> {
        self.calls.delete_table += 1;
        self.inner.delete_table(table).await
    }

    async fn mutate_row(
        &mut self,
        table: &str,
        row: &str,
        mutations: Vec<Mutation>,
    ) -> Result<(), StoreError> {
        self.calls.mutate_row += 1;
        self.inner.mutate_row(table, row, mutations).await
    }

    async fn scanner_open(
        &mut self,
        table: &str,
        start_row: &str,
        columns: &[String],
    ) -> Result<ScannerId, StoreError> {
        self.calls.scanner_open += 1;
        self.inner.scanner_open(table, start_row, columns).await
    }

    async fn scanner_get_list(
        &mut self,
        scanner: ScannerId,
        rows: usize,
    ) -> Result<Vec<RowResult>, StoreError> {
        self.calls.scanner_get_list += 1;
        self.inner.scanner_get_list(scanner, rows).await
    }

    async fn scanner_close(&mut self, scanner: ScannerId) -> Result<(), StoreError> {
        self.calls.scanner_close += 1;
        self.inner.scanner_close(scanner).await
    }

    async fn delete_all_row(&mut self, table: &str, row: &str) -> Result<(), StoreError> {
        self.calls.delete_all_row += 1;
        self.inner.delete_all_row(table, row).await
    }
}
