//! In-memory reference implementation of the `RowStore` gRPC service.
//!
//! The benchmark harness drives this service through its generated client;
//! the server binary lets the harness run without an external cluster.

pub mod convert;
pub mod error;
pub mod service;
pub mod table;

pub mod proto {
    tonic::include_proto!("rowstore");

    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("rowstore_descriptor");
}

pub use error::TableError;
pub use proto::row_store_client::RowStoreClient;
pub use proto::row_store_server::RowStoreServer;
pub use service::RowStoreService;
pub use table::{ColumnFamily, DisableOutcome, Mutation, RowResult, ScannerId, TableStore};

/// Upper bound for a single gRPC message in either direction. Scans over
/// megabyte-sized cells return several of them per batch, well past tonic's
/// 4 MiB default.
pub const MAX_MESSAGE_BYTES: usize = 256 * 1024 * 1024;

/// Wraps `service` in a server with the message limits raised to
/// [`MAX_MESSAGE_BYTES`].
pub fn grpc_server(service: RowStoreService) -> RowStoreServer<RowStoreService> {
    RowStoreServer::new(service)
        .max_decoding_message_size(MAX_MESSAGE_BYTES)
        .max_encoding_message_size(MAX_MESSAGE_BYTES)
}
