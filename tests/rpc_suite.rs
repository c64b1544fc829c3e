mod common;

use common::{CountingStore, TestServer};
use rowbench::store::{ColumnFamily, DisableOutcome, Mutation};
use rowbench::{Admin, BenchConfig, BenchError, Runner, Scenario, StoreClient, StoreError, TimingBatch};

fn config(rows: usize) -> BenchConfig {
    BenchConfig {
        rows,
        seed: Some(1),
        ..BenchConfig::default()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn simple_scenario_end_to_end() {
    let mut server = TestServer::spawn().await;
    let client = CountingStore::new(server.client().await);
    let mut runner = Runner::new(client, Admin::Rpc, config(10));
    let mut timings = TimingBatch::quiet();

    let outcome = runner
        .run(Scenario::Simple, &mut timings)
        .await
        .expect("simple scenario");

    let calls = runner.client().calls.clone();
    assert_eq!(calls.create_table, 1);
    assert_eq!(calls.mutate_row, 10);
    assert_eq!(calls.delete_all_row, 10);
    assert_eq!(calls.delete_table, 1);
    assert_eq!(calls.scanner_open, calls.scanner_close);

    assert_eq!(outcome.scans[0].label, "scanner:rows10-");
    assert_eq!(outcome.scans[0].summary.rows, 10);
    assert_eq!(outcome.scans[1].label, "scanner:rows1-");
    assert_eq!(outcome.scans[1].summary.rows, 10);
    assert_eq!(outcome.scans[2].summary.rows, 0);

    let batch = timings.drain_batch();
    for label in [
        "createTable",
        "mutateRow:Create",
        "scanner:rows10-",
        "scanner:rows1-",
        "deleteAllRow:Delete",
    ] {
        assert!(batch.contains_key(label), "missing {label}");
    }
    assert!(timings.drain_batch().is_empty());

    let store = server.store();
    assert!(store.read().await.table_names().is_empty());
    assert_eq!(store.read().await.open_scanners(), 0);

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn scan_over_rpc_returns_all_rows_then_empty_batch() {
    let mut server = TestServer::spawn().await;
    let mut client = server.client().await;

    client
        .create_table("t", &[ColumnFamily::new("cf0", 65536)])
        .await
        .unwrap();
    for i in 0..25 {
        client
            .mutate_row("t", &i.to_string(), vec![Mutation::put("cf0:a", vec![1u8; 16])])
            .await
            .unwrap();
    }

    let scanner = client.scanner_open("t", "", &[]).await.unwrap();
    let mut seen = 0;
    loop {
        let rows = client.scanner_get_list(scanner, 10).await.unwrap();
        if rows.is_empty() {
            break;
        }
        seen += rows.len();
    }
    assert_eq!(seen, 25);
    assert!(client.scanner_get_list(scanner, 10).await.unwrap().is_empty());
    client.scanner_close(scanner).await.unwrap();

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn disable_outcomes_cross_the_wire() {
    let mut server = TestServer::spawn().await;
    let mut client = server.client().await;

    client
        .create_table("t", &[ColumnFamily::new("cf0", 4096)])
        .await
        .unwrap();
    assert_eq!(
        client.disable_table("t").await.unwrap(),
        DisableOutcome::Disabled
    );
    assert_eq!(
        client.disable_table("t").await.unwrap(),
        DisableOutcome::AlreadyDisabled
    );
    assert!(matches!(
        client.disable_table("missing").await,
        Err(StoreError::NotFound(_))
    ));

    client.enable_table("t").await.unwrap();
    assert!(matches!(
        client.delete_table("t").await,
        Err(StoreError::Rpc(status)) if status.code() == tonic::Code::FailedPrecondition
    ));

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn remove_table_tolerates_disabled_table() {
    let mut server = TestServer::spawn().await;
    let mut client = server.client().await;
    client
        .create_table("benchtable", &[ColumnFamily::new("cf0", 4096)])
        .await
        .unwrap();
    client.disable_table("benchtable").await.unwrap();

    let mut runner = Runner::new(client, Admin::Rpc, config(1));
    runner.remove_table("benchtable").await.unwrap();
    assert!(runner.client_mut().table_names().await.unwrap().is_empty());

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn block_sizes_reach_the_store() {
    let mut server = TestServer::spawn().await;
    let client = server.client().await;
    let mut runner = Runner::new(
        client,
        Admin::Rpc,
        BenchConfig {
            cf_count: Some(3),
            ..BenchConfig::default()
        },
    );
    let mut timings = TimingBatch::quiet();
    runner
        .run(Scenario::PrepareUsertable, &mut timings)
        .await
        .unwrap();

    let families = runner
        .client_mut()
        .column_descriptors("usertable")
        .await
        .unwrap();
    let sizes: Vec<u32> = families.iter().map(|cf| cf.block_size).collect();
    assert_eq!(sizes, vec![4096, 32768, 65536]);
    assert!(families.iter().all(|cf| cf.compression == "NONE" && cf.max_versions == 1));

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn large_cells_fit_in_a_scan_batch() {
    let mut server = TestServer::spawn().await;
    let client = server.client().await;
    let mut runner = Runner::new(
        client,
        Admin::Rpc,
        BenchConfig {
            rows: 6,
            large_value_size: 1024 * 1024,
            seed: Some(2),
            ..BenchConfig::default()
        },
    );
    let mut timings = TimingBatch::quiet();
    let outcome = runner
        .run(Scenario::SmallLarge2cf, &mut timings)
        .await
        .unwrap();

    assert_eq!(outcome.scan("scanner:rows10-cf1:large").unwrap().rows, 6);
    assert_eq!(outcome.scan("scanner:rows10-").unwrap().rows, 6);
    assert!(timings.get("mutateRow:Create-large").is_some());

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn store_failures_propagate_unchanged() {
    let mut server = TestServer::spawn().await;
    let mut client = server.client().await;

    let err = client
        .mutate_row("nope", "0", vec![Mutation::put("cf0:a", b"x".to_vec())])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(ref message) if message.contains("nope")));

    // Closing the server makes the next scenario fail on its first call.
    server.shutdown().await;
    let mut runner = Runner::new(client, Admin::Rpc, config(3));
    let mut timings = TimingBatch::quiet();
    let err = runner
        .run(Scenario::Simple, &mut timings)
        .await
        .unwrap_err();
    assert!(matches!(err, BenchError::Store(_)));
    assert!(timings.is_empty());
}
