use std::net::SocketAddr;

use clap::Parser;
use tonic::transport::Server;
use tracing_subscriber::EnvFilter;

use rowstore::{RowStoreService, grpc_server, proto};

#[derive(Parser, Debug)]
#[command(name = "rowstore_server", author, version, about, long_about = None)]
struct Args {
    /// Socket address to serve the RowStore gRPC API on.
    #[arg(long, default_value = "127.0.0.1:50051")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let service = RowStoreService::default();
    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(proto::FILE_DESCRIPTOR_SET)
        .build_v1()?;

    tracing::info!("Starting RowStore gRPC server on socket address: {}", args.listen);
    Server::builder()
        .add_service(grpc_server(service))
        .add_service(reflection_service)
        .serve_with_shutdown(args.listen, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %err, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    tracing::info!("RowStore server stopped");
    Ok(())
}
