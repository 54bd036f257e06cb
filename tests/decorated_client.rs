//! Decorator chain tests over the real hyper transport.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use resilient_client::client::{authorization, decorate, request_id, try_header, BoxSender};
use resilient_client::config::TransportConfig;
use resilient_client::demo;
use resilient_client::http::X_REQUEST_ID;
use resilient_client::resilience::{retry, timeout};
use resilient_client::{CancellationScope, HyperSender, Request, SendError, Sender};

mod common;

fn base() -> BoxSender {
    Arc::new(HyperSender::new(&TransportConfig::default()))
}

#[tokio::test]
async fn test_retry_on_dropped_connections() {
    let call_count = Arc::new(AtomicU32::new(0));
    let cc = call_count.clone();
    let addr = common::start_programmable_backend(move |_head| {
        let cc = cc.clone();
        async move {
            let count = cc.fetch_add(1, Ordering::SeqCst);
            if count < 2 {
                None
            } else {
                Some((200, "Success".to_string()))
            }
        }
    })
    .await;

    let sender = decorate(base(), vec![retry(3, Duration::from_millis(20))]);
    let mut request = Request::get(&format!("http://{}/", addr)).unwrap();
    let response = sender.send(&mut request).await.expect("should succeed after retries");

    assert_eq!(response.text(), "Success");
    assert_eq!(call_count.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_retries_exhausted_surfaces_last_transport_error() {
    let addr = common::closed_port();
    let sender = decorate(base(), vec![retry(2, Duration::from_millis(50))]);

    let start = Instant::now();
    let mut request = Request::get(&format!("http://{}/", addr)).unwrap();
    let err = sender.send(&mut request).await.unwrap_err();

    assert!(matches!(err, SendError::Transport(_)), "got {:?}", err);
    // Backoff of 0ms then 50ms between the three attempts.
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[tokio::test]
async fn test_headers_reach_the_wire_once_per_request() {
    let call_count = Arc::new(AtomicU32::new(0));
    let cc = call_count.clone();
    let addr = common::start_programmable_backend(move |head| {
        let cc = cc.clone();
        async move {
            // First attempt is dropped so the retry layer sends again.
            if cc.fetch_add(1, Ordering::SeqCst) == 0 {
                None
            } else {
                Some((200, head))
            }
        }
    })
    .await;

    let sender = decorate(
        base(),
        vec![
            try_header("x-test", "1").unwrap(),
            try_header("x-test", "2").unwrap(),
            authorization("123").unwrap(),
            request_id(),
            retry(2, Duration::from_millis(10)),
        ],
    );

    let mut request = Request::get(&format!("http://{}/", addr)).unwrap();
    let response = sender.send(&mut request).await.unwrap();
    let head = response.text().to_lowercase();

    let first = head.find("x-test: 1").expect("first header value on the wire");
    let second = head.find("x-test: 2").expect("second header value on the wire");
    assert!(first < second);
    assert_eq!(head.matches("x-test: 1").count(), 1);
    assert!(head.contains("authorization: 123"));
    assert_eq!(head.matches(X_REQUEST_ID).count(), 1);
    assert_eq!(call_count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cancellation_aborts_in_flight_request() {
    let servers = CancellationScope::new();
    let slow = demo::spawn_slow("127.0.0.1:0", Duration::from_secs(2), &servers)
        .await
        .unwrap();

    let sender = decorate(base(), vec![retry(5, Duration::from_millis(100))]);
    let scope = CancellationScope::new();
    let canceller = scope.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let start = Instant::now();
    let mut request = Request::get(&slow.url()).unwrap().with_scope(scope);
    let err = sender.send(&mut request).await.unwrap_err();

    assert_eq!(err, SendError::Cancelled);
    assert!(start.elapsed() < Duration::from_secs(1));

    slow.shutdown().await;
}

#[tokio::test]
async fn test_timeout_turns_slow_attempt_into_transport_error() {
    let servers = CancellationScope::new();
    let slow = demo::spawn_slow("127.0.0.1:0", Duration::from_secs(2), &servers)
        .await
        .unwrap();

    let sender = decorate(base(), vec![timeout(Duration::from_millis(100))]);
    let start = Instant::now();
    let mut request = Request::get(&slow.url()).unwrap();
    let err = sender.send(&mut request).await.unwrap_err();

    assert!(matches!(err, SendError::Transport(ref msg) if msg.contains("timed out")));
    assert!(start.elapsed() < Duration::from_secs(1));

    slow.shutdown().await;
}
