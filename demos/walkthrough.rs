//! Walks two queues through the checked operations and logs what happens.
//!
//! Run with `RUST_LOG=info cargo run --example walkthrough`, or
//! `RUST_LOG=trace` to also see the queue's own logging.

extern crate env_logger;
#[macro_use]
extern crate log;
extern crate smringbuf;

use smringbuf::{Error, RingBuffer};

fn write_logged(ring: &mut RingBuffer, value: u8) {
    match ring.write(value) {
        Ok(()) => info!("wrote {} into an available slot", value),
        Err(Error::Full { element }) => warn!("buffer full, dropped {}", element),
        Err(err) => error!("unexpected write failure: {}", err),
    }
}

fn read_logged(ring: &mut RingBuffer) -> Option<u8> {
    match ring.read() {
        Ok(value) => {
            info!("read {}", value);
            Some(value)
        }
        Err(err) => {
            warn!("read refused: {}", err);
            None
        }
    }
}

fn write_block(ring: &mut RingBuffer, len: usize, start: u8) {
    info!("writing {} sequential values starting at {}", len, start);
    let mut value = start;
    for _ in 0..len {
        write_logged(ring, value);
        value = value.wrapping_add(1);
    }
}

fn report(name: &str, ring: &RingBuffer) {
    info!("{}: empty={} full={} space={} data={}",
          name,
          ring.is_empty(),
          ring.is_full(),
          ring.available_space(),
          ring.available_data());
}

fn main() {
    env_logger::init();

    let mut storage_a = [0u8; 11];
    let mut storage_b = [0u8; 22];
    let ring_a: RingBuffer = match RingBuffer::with_storage(&mut storage_a) {
        Ok(ring) => ring,
        Err(err) => {
            error!("ring A: {}", err);
            return;
        }
    };
    let mut ring_b: RingBuffer = match RingBuffer::with_storage(&mut storage_b) {
        Ok(ring) => ring,
        Err(err) => {
            error!("ring B: {}", err);
            return;
        }
    };
    report("A", &ring_a);
    report("B", &ring_b);

    let written = 26;
    write_logged(&mut ring_b, written);
    report("B", &ring_b);
    match read_logged(&mut ring_b) {
        Some(value) if value == written => info!("read/write pairing succeeded"),
        _ => error!("read/write pairing FAILED"),
    }
    report("B", &ring_b);

    write_block(&mut ring_b, 8, 1);
    for _ in 0..8 {
        read_logged(&mut ring_b);
    }

    write_block(&mut ring_b, 25, 100);
    report("B", &ring_b);
    for _ in 0..25 {
        read_logged(&mut ring_b);
    }
    report("B", &ring_b);

    write_block(&mut ring_b, 5, 100);
    report("B", &ring_b);
    ring_b.flush();
    info!("flushed, the next reads should all be refused");
    report("B", &ring_b);
    for _ in 0..5 {
        read_logged(&mut ring_b);
    }

    let by_ref = &written;
    write_logged(&mut ring_b, *by_ref);
    read_logged(&mut ring_b);
}
