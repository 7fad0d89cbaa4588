use std::sync::{Arc, Weak};
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::DebounceTimer;

const DELAY: Duration = Duration::from_millis(20);
const SETTLE: Duration = Duration::from_millis(250);

fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) + Send + Sync + 'static) {
    let fired = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&fired);
    (fired, move |payload| sink.lock().push(payload))
}

fn wait_until(mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    done()
}

#[test]
fn test_burst_fires_once_with_last_payload() {
    let (fired, callback) = recorder();
    let timer = DebounceTimer::new(Duration::from_millis(100), callback);
    timer.start().unwrap();

    timer.queue(1);
    timer.queue(2);
    timer.queue(3);
    assert!(wait_until(|| !fired.lock().is_empty()));
    thread::sleep(SETTLE);
    assert_eq!(*fired.lock(), [3]);
    assert!(!timer.has_pending());

    timer.queue(4);
    assert!(wait_until(|| fired.lock().len() == 2));
    assert_eq!(*fired.lock(), [3, 4]);
}

#[test]
fn test_cancel_drops_pending() {
    let (fired, callback) = recorder();
    let timer = DebounceTimer::new(Duration::from_millis(50), callback);
    timer.start().unwrap();

    timer.queue(1);
    timer.cancel();
    assert!(!timer.has_pending());
    thread::sleep(SETTLE);
    assert!(fired.lock().is_empty());
}

#[test]
fn test_queue_before_start_is_kept() {
    let (fired, callback) = recorder();
    let timer = DebounceTimer::new(DELAY, callback);

    timer.queue(7);
    assert!(timer.has_pending());
    timer.start().unwrap();
    assert!(wait_until(|| *fired.lock() == [7]));
}

#[test]
fn test_stop_is_idempotent_and_ignores_later_queues() {
    let (fired, callback) = recorder();
    let timer = DebounceTimer::new(Duration::from_secs(10), callback);
    timer.start().unwrap();
    assert!(timer.is_running());

    timer.queue(1);
    timer.stop();
    timer.stop();
    assert!(!timer.is_running());
    assert!(!timer.has_pending());

    timer.queue(2);
    assert!(!timer.has_pending());
    assert!(fired.lock().is_empty());
}

#[test]
fn test_restart_after_stop() {
    let (fired, callback) = recorder();
    let timer = DebounceTimer::new(DELAY, callback);
    timer.start().unwrap();
    timer.stop();

    timer.start().unwrap();
    timer.start().unwrap();
    timer.queue(5);
    assert!(wait_until(|| *fired.lock() == [5]));
}

#[test]
fn test_stop_from_callback() {
    let slot: Arc<Mutex<Weak<DebounceTimer<u32>>>> = Arc::new(Mutex::new(Weak::new()));
    let (fired, record) = recorder();

    let handle = Arc::clone(&slot);
    let timer = Arc::new(DebounceTimer::new(DELAY, move |payload| {
        record(payload);
        let timer = handle.lock().upgrade();
        if let Some(timer) = timer {
            timer.stop();
        }
    }));
    *slot.lock() = Arc::downgrade(&timer);

    timer.start().unwrap();
    timer.queue(1);
    assert!(wait_until(|| !timer.is_running()));
    assert_eq!(*fired.lock(), [1]);

    timer.queue(2);
    thread::sleep(SETTLE);
    assert_eq!(*fired.lock(), [1]);
}

#[test]
fn test_set_delay() {
    let (fired, callback) = recorder();
    let timer = DebounceTimer::new(Duration::from_secs(10), callback);
    timer.set_delay(DELAY);
    assert_eq!(timer.delay(), DELAY);

    timer.start().unwrap();
    timer.queue(9);
    assert!(wait_until(|| *fired.lock() == [9]));
}
