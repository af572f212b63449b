//! Two producers, three consumers, one 40-slot buffer.
//!
//! Producer 1 pushes `a..=z` and producer 2 pushes `A..=Z`. Consumers pop
//! 22, 15 and 15 characters. Everyone sleeps 100ms between operations.
//!
//! Run: RUST_LOG=info cargo run --example producer_consumer --features tracing

use std::thread;
use std::time::Duration;

use nexus_buffer::{BoundedBuffer, init_tracing};
use tracing::info;

const CAPACITY: usize = 40;
const PAUSE: Duration = Duration::from_millis(100);

fn consumer(id: usize, buffer: &BoundedBuffer<char>, count: usize) {
    for _ in 0..count {
        let value = buffer.pop();
        info!(consumer = id, %value, "fetched");
        thread::sleep(PAUSE);
    }
}

fn producer(id: usize, buffer: &BoundedBuffer<char>, first: char) {
    for value in (first..).take(26) {
        buffer.push(value);
        info!(producer = id, %value, "pushed");
        thread::sleep(PAUSE);
    }
}

fn main() {
    init_tracing();

    let buffer = match BoundedBuffer::new(CAPACITY) {
        Ok(buffer) => buffer,
        Err(err) => {
            tracing::error!(%err, "cannot create buffer");
            return;
        }
    };

    thread::scope(|s| {
        s.spawn(|| consumer(1, &buffer, 22));
        s.spawn(|| consumer(2, &buffer, 15));
        s.spawn(|| consumer(3, &buffer, 15));
        s.spawn(|| producer(1, &buffer, 'a'));
        s.spawn(|| producer(2, &buffer, 'A'));
    });

    info!(remaining = buffer.len(), "all producers and consumers finished");
}
