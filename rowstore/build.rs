use std::{env, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let protoc_path = protoc_bin_vendored::protoc_bin_path()?;
    unsafe {
        // Edition 2024 requires opting into environment mutation explicitly.
        env::set_var("PROTOC", protoc_path);
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    tonic_build::configure()
        .build_client(true)
        .build_server(true)
        .file_descriptor_set_path(out_dir.join("rowstore_descriptor.bin"))
        .compile_protos(&["proto/rowstore.proto"], &["proto"])?;
    Ok(())
}
