use std::sync::{Arc, Mutex};

use chainboot_fetch::test_utils::StaticClient;
use chainboot_fetch::{Error, FetchOptions, FetchOutcome, Fetcher, Progress};
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

const URL: &str = "https://bootstrap.example/BootstrapChain.zip";

fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[tokio::test]
async fn single_chunk_reports_once_at_hundred() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("BootstrapChain.zip");
    let fetcher = Fetcher::new(StaticClient::new(payload(1000)));

    let mut seen = Vec::new();
    let outcome = fetcher
        .fetch(URL, &dest, &CancellationToken::new(), |p: &Progress| {
            seen.push(p.percentage())
        })
        .await
        .unwrap();

    assert_eq!(outcome, FetchOutcome::Completed { bytes_downloaded: 1000 });
    assert_eq!(seen, vec![Some(100)]);
    assert_eq!(std::fs::read(&dest).unwrap(), payload(1000));
}

#[tokio::test]
async fn percent_is_monotonic_and_deduplicated() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("archive.zip");
    let client = StaticClient::new(payload(10_000)).frame_size(4096);
    let fetcher = Fetcher::new(client).with_options(FetchOptions::default().chunk_size(7));

    let mut seen = Vec::new();
    fetcher
        .fetch(URL, &dest, &CancellationToken::new(), |p: &Progress| {
            seen.push(p.percentage().unwrap())
        })
        .await
        .unwrap();

    assert!(seen.windows(2).all(|w| w[0] < w[1]), "{seen:?}");
    assert_eq!(seen.last(), Some(&100));
}

#[tokio::test]
async fn unknown_length_reports_single_indeterminate() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("archive.zip");
    let client = StaticClient::new(payload(5000))
        .frame_size(100)
        .without_content_length();

    let mut seen = Vec::new();
    let outcome = Fetcher::new(client)
        .fetch(URL, &dest, &CancellationToken::new(), |p: &Progress| seen.push(*p))
        .await
        .unwrap();

    assert_eq!(outcome.bytes_downloaded(), 5000);
    assert_eq!(seen.len(), 1);
    assert!(seen[0].is_indeterminate());
}

#[tokio::test]
async fn empty_body_reports_single_indeterminate() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("archive.zip");

    let mut seen = Vec::new();
    let outcome = Fetcher::new(StaticClient::new(Vec::new()))
        .fetch(URL, &dest, &CancellationToken::new(), |p: &Progress| seen.push(*p))
        .await
        .unwrap();

    assert_eq!(outcome, FetchOutcome::Completed { bytes_downloaded: 0 });
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].total_bytes, Some(0));
    assert!(seen[0].is_indeterminate());
    assert_eq!(std::fs::metadata(&dest).unwrap().len(), 0);
}

#[tokio::test]
async fn cancellation_stops_between_chunks_and_keeps_partial_file() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("archive.zip");
    let client = StaticClient::new(payload(1000)).frame_size(100);
    let fetcher = Fetcher::new(client);
    let cancel = CancellationToken::new();

    let outcome = fetcher
        .fetch(URL, &dest, &cancel, |p: &Progress| {
            if p.bytes_downloaded >= 300 {
                cancel.cancel();
            }
        })
        .await
        .unwrap();

    assert_eq!(outcome, FetchOutcome::Cancelled { bytes_downloaded: 300 });
    assert_eq!(std::fs::metadata(&dest).unwrap().len(), 300);
}

#[tokio::test]
async fn cancelled_before_start_does_not_connect() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("archive.zip");
    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = Fetcher::new(StaticClient::refusing())
        .fetch(URL, &dest, &cancel, |_: &Progress| {})
        .await
        .unwrap();

    assert!(outcome.is_cancelled());
}

#[tokio::test]
async fn stale_file_is_replaced() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("nested/archive.zip");
    std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
    std::fs::write(&dest, vec![0xFFu8; 50_000]).unwrap();

    Fetcher::new(StaticClient::new(payload(10)))
        .fetch(URL, &dest, &CancellationToken::new(), |_: &Progress| {})
        .await
        .unwrap();

    assert_eq!(std::fs::read(&dest).unwrap(), payload(10));
}

#[tokio::test]
async fn connect_failure_is_request_error() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("archive.zip");

    let result = Fetcher::new(StaticClient::refusing())
        .fetch(URL, &dest, &CancellationToken::new(), |_: &Progress| {})
        .await;

    assert!(matches!(result, Err(Error::Request { .. })));
}

#[tokio::test]
async fn body_failure_leaves_partial_file() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("archive.zip");
    let client = StaticClient::new(payload(1000))
        .frame_size(100)
        .fail_after_frames(4);
    let reports = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&reports);

    let result = Fetcher::new(client)
        .fetch(URL, &dest, &CancellationToken::new(), move |_: &Progress| {
            *counter.lock().unwrap() += 1;
        })
        .await;

    match result {
        Err(Error::Body { bytes_downloaded, .. }) => assert_eq!(bytes_downloaded, 400),
        other => panic!("expected body error, got {other:?}"),
    }
    assert_eq!(*reports.lock().unwrap(), 4);
    assert!(dest.exists());
}
