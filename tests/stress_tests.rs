//! Concurrency tests for the dispatch critical section
//!
//! These tests verify:
//! - Concurrent dispatches on one logger never overlap inside the pipeline
//! - Handler output for one event is never interleaved with another's
//! - No event is lost under concurrent load

use chainlog::prelude::*;
use chainlog::fields;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const EVENTS_PER_THREAD: usize = 250;

/// Fails loudly if two dispatches are inside the handler chain at once
struct ExclusiveHandler {
    in_flight: Arc<AtomicBool>,
    overlaps: Arc<AtomicUsize>,
}

impl Handler for ExclusiveHandler {
    fn handle(&self, _event: &Event) -> Result<()> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        thread::yield_now();
        self.in_flight.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Writes one byte per call so interleaving would be visible
#[derive(Clone, Default)]
struct ByteByByteSink(Arc<Mutex<Vec<u8>>>);

impl Write for ByteByByteSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match buf.first() {
            Some(byte) => {
                self.0.lock().push(*byte);
                thread::yield_now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_dispatch_is_mutually_exclusive() {
    let in_flight = Arc::new(AtomicBool::new(false));
    let overlaps = Arc::new(AtomicUsize::new(0));

    // The interceptor and the handler share the flag: the whole chain is one
    // critical section, not just each handler call.
    let interceptor_flag = Arc::clone(&in_flight);
    let interceptor_overlaps = Arc::clone(&overlaps);

    let logger = Arc::new(
        Logger::builder()
            .add_interceptor_fn(move |_| {
                if interceptor_flag.load(Ordering::SeqCst) {
                    interceptor_overlaps.fetch_add(1, Ordering::SeqCst);
                }
                false
            })
            .add_handler(ExclusiveHandler {
                in_flight: Arc::clone(&in_flight),
                overlaps: Arc::clone(&overlaps),
            })
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..EVENTS_PER_THREAD {
                    logger.info(&fields! { "thread" => t as i64 }, format!("event {}", i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    assert_eq!(
        logger.metrics().dispatched(),
        (THREADS * EVENTS_PER_THREAD) as u64
    );
}

#[test]
fn test_handler_output_not_interleaved() {
    let sink = ByteByByteSink::default();
    let logger = Arc::new(
        Logger::builder()
            .add_handler(JsonHandler::new(sink.clone()))
            .add_field("service", "stress")
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..50 {
                    logger.warn(None, format!("thread {} event {}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let output = String::from_utf8(sink.0.lock().clone()).expect("utf8 output");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), THREADS * 50);

    for line in lines {
        let parsed: serde_json::Value = serde_json::from_str(line).expect("intact JSON line");
        assert_eq!(parsed["level"], "warn");
        assert_eq!(parsed["fields"]["service"], "stress");
    }
}

#[test]
fn test_no_events_lost_under_load() {
    let memory = MemoryHandler::new();
    let logger = Arc::new(Logger::builder().add_handler(memory.clone()).build());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..EVENTS_PER_THREAD {
                    match i % 4 {
                        0 => logger.debug(None, "d"),
                        1 => logger.info(None, "i"),
                        2 => logger.warn(None, "w"),
                        _ => logger.error(None, &"e"),
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let events = memory.events();
    assert_eq!(events.len(), THREADS * EVENTS_PER_THREAD);
    let errors = events.iter().filter(|e| e.level == LogLevel::Error).count();
    assert_eq!(errors, THREADS * EVENTS_PER_THREAD / 4);
}
