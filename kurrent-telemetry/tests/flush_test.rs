//! Flush engine semantics: FIFO batches, stop-on-first-failure, retry
//! bookkeeping.

mod common;

use std::sync::Arc;

use serde_json::json;

use common::MockTransport;
use kurrent_store::MemoryKvStore;
use kurrent_telemetry::{DeliveryOutcome, DurableQueue, FlushEngine, FlushOutcome};

fn setup() -> (Arc<MockTransport>, Arc<DurableQueue>, FlushEngine<MockTransport>) {
    let store = Arc::new(MemoryKvStore::new());
    let queue = Arc::new(DurableQueue::new(store));
    let transport = MockTransport::new();
    let engine = FlushEngine::new(transport.clone(), queue.clone());
    (transport, queue, engine)
}

/// Empty queue: immediate success, nothing attempted.
#[tokio::test]
async fn flush_of_empty_queue_is_a_drained_noop() {
    let (transport, _, engine) = setup();
    let report = engine.flush(10).await.expect("flush");

    assert!(report.is_drained());
    assert_eq!(report.sent, 0);
    assert_eq!(report.remaining, 0);
    assert_eq!(transport.delivered_count(), 0);
}

/// One queued ping, delivery accepted: queue drains to zero.
#[tokio::test]
async fn flush_drains_single_event() {
    let (transport, queue, engine) = setup();
    queue.enqueue(json!({"a": 1})).unwrap();
    assert_eq!(queue.len(), 1);

    let report = engine.flush(10).await.expect("flush");

    assert!(report.is_drained());
    assert_eq!(report.sent, 1);
    assert_eq!(report.remaining, 0);
    assert_eq!(queue.len(), 0);
    assert_eq!(transport.delivered.lock().unwrap()[0], json!({"a": 1}));
}

/// A batch smaller than the queue removes exactly the oldest K events.
#[tokio::test]
async fn flush_respects_batch_size_and_fifo_order() {
    let (transport, queue, engine) = setup();
    for i in 0..5 {
        queue.enqueue(json!({"i": i})).unwrap();
    }

    let report = engine.flush(3).await.expect("flush");

    assert!(report.is_drained());
    assert_eq!(report.sent, 3);
    assert_eq!(report.remaining, 2);

    // Delivered oldest-first.
    let delivered = transport.delivered.lock().unwrap();
    let sent: Vec<i64> = delivered.iter().map(|p| p["i"].as_i64().unwrap()).collect();
    assert_eq!(sent, vec![0, 1, 2]);

    // The two newest remain, still in order.
    let left = queue.peek_batch(10);
    assert_eq!(left[0].payload["i"], json!(3));
    assert_eq!(left[1].payload["i"], json!(4));
}

/// Failure on the 2nd of 3: the 1st is removed, the 2nd gets one try bump,
/// the 3rd is never attempted.
#[tokio::test]
async fn flush_stops_at_first_failure() {
    let (transport, queue, engine) = setup();
    for i in 0..3 {
        queue.enqueue(json!({"i": i})).unwrap();
    }
    transport.script_delivery(DeliveryOutcome::http(200, "ok".to_string()));
    transport.script_delivery(DeliveryOutcome::http(503, "backend down".to_string()));

    let report = engine.flush(10).await.expect("flush");

    assert_eq!(report.sent, 1);
    assert_eq!(report.remaining, 2);
    let err = report.last_error().expect("stalled");
    assert_eq!(err.status, 503);
    assert_eq!(err.body, "backend down");

    // The 3rd item was never attempted.
    assert_eq!(transport.delivered_count(), 2);

    // Bookkeeping: failed item bumped once, unattempted untouched.
    let left = queue.peek_batch(10);
    assert_eq!(left.len(), 2);
    assert_eq!(left[0].payload["i"], json!(1));
    assert_eq!(left[0].tries, 1);
    assert_eq!(left[1].payload["i"], json!(2));
    assert_eq!(left[1].tries, 0);
}

/// A transport-level failure (no HTTP response) stalls with status -1.
#[tokio::test]
async fn transport_failure_stalls_with_sentinel_status() {
    let (transport, queue, engine) = setup();
    queue.enqueue(json!({"a": 1})).unwrap();
    transport.script_delivery(DeliveryOutcome::transport_failure("connection refused"));

    let report = engine.flush(10).await.expect("flush");

    assert!(matches!(report.outcome, FlushOutcome::Stalled(_)));
    assert_eq!(report.sent, 0);
    assert_eq!(report.remaining, 1);
    assert_eq!(report.last_error().unwrap().status, -1);
    assert_eq!(queue.peek_batch(1)[0].tries, 1);
}

/// The failed item is retried on the next cycle and its counter keeps
/// climbing until delivery succeeds.
#[tokio::test]
async fn stalled_event_is_retried_next_cycle() {
    let (transport, queue, engine) = setup();
    queue.enqueue(json!({"a": 1})).unwrap();

    transport.script_delivery(DeliveryOutcome::http(500, String::new()));
    let first = engine.flush(10).await.unwrap();
    assert!(!first.is_drained());
    assert_eq!(queue.peek_batch(1)[0].tries, 1);

    transport.script_delivery(DeliveryOutcome::http(500, String::new()));
    let second = engine.flush(10).await.unwrap();
    assert!(!second.is_drained());
    assert_eq!(queue.peek_batch(1)[0].tries, 2);

    // Backend recovers; default script accepts.
    let third = engine.flush(10).await.unwrap();
    assert!(third.is_drained());
    assert_eq!(third.sent, 1);
    assert_eq!(queue.len(), 0);
}

/// Concurrent flush calls serialize: every queued event is delivered
/// exactly once across both cycles.
#[tokio::test]
async fn concurrent_flushes_never_double_send() {
    let store = Arc::new(MemoryKvStore::new());
    let queue = Arc::new(DurableQueue::new(store));
    let transport = MockTransport::new();
    let engine = Arc::new(FlushEngine::new(transport.clone(), queue.clone()));

    for i in 0..6 {
        queue.enqueue(json!({"i": i})).unwrap();
    }

    let (a, b) = tokio::join!(
        {
            let e = engine.clone();
            async move { e.flush(10).await.unwrap() }
        },
        {
            let e = engine.clone();
            async move { e.flush(10).await.unwrap() }
        }
    );

    assert_eq!(a.sent + b.sent, 6);
    assert_eq!(queue.len(), 0);
    assert_eq!(transport.delivered_count(), 6);
}
