use counter::Counter;
use error::Error;

use super::{Drain, RingBuffer};

/// The writing half of a split `RingBuffer`.
///
/// Only touches the write index, the write count and the slot being written,
/// so it may run concurrently with the matching `Consumer`, for example from
/// an interrupt handler while the main loop reads.
pub struct Producer<'r, 'a: 'r, C: Counter = u8> {
    ring: &'r RingBuffer<'a, C>,
}

/// The reading half of a split `RingBuffer`.
///
/// Only touches the read index, the read count and the slot being read.
pub struct Consumer<'r, 'a: 'r, C: Counter = u8> {
    ring: &'r RingBuffer<'a, C>,
}

impl<'r, 'a, C: Counter> Producer<'r, 'a, C> {
    pub(super) fn new(ring: &'r RingBuffer<'a, C>) -> Producer<'r, 'a, C> {
        Producer { ring }
    }

    /// Returns the capacity of the underlying queue.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity
    }

    /// Returns `true` if a write would overwrite unread data.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ring.producer_full()
    }

    /// Returns how many bytes can be written before the queue is full.
    ///
    /// The consumer may free more space at any moment, never less.
    #[inline]
    pub fn available_space(&self) -> usize {
        self.ring.producer_space()
    }

    /// Appends `element`, refusing with `Error::Full` if there is no room.
    #[inline]
    pub fn write(&mut self, element: u8) -> Result<(), Error> {
        self.ring.try_push(element)
    }

    /// Appends `element` without checking for room.
    ///
    /// # Safety
    ///
    /// `is_full()` must have returned `false` since the last write. Writing
    /// into a full queue overwrites the slot the consumer reads next, which
    /// races with a concurrent read.
    #[inline]
    pub unsafe fn write_unchecked(&mut self, element: u8) {
        self.ring.push(element)
    }

    /// Appends as many leading bytes of `src` as fit and returns how many
    /// were written.
    #[inline]
    pub fn write_slice(&mut self, src: &[u8]) -> usize {
        self.ring.push_slice(src)
    }
}

impl<'r, 'a, C: Counter> Consumer<'r, 'a, C> {
    pub(super) fn new(ring: &'r RingBuffer<'a, C>) -> Consumer<'r, 'a, C> {
        Consumer { ring }
    }

    /// Returns the capacity of the underlying queue.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity
    }

    /// Returns `true` if there is nothing to read.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.consumer_data() == 0
    }

    /// Returns how many bytes are waiting to be read.
    ///
    /// The producer may add more at any moment, never fewer.
    #[inline]
    pub fn available_data(&self) -> usize {
        self.ring.consumer_data()
    }

    /// Removes the oldest byte, refusing with `Error::Empty` if there is none.
    #[inline]
    pub fn read(&mut self) -> Result<u8, Error> {
        self.ring.try_pop()
    }

    /// Removes the byte at the read position without checking for data.
    ///
    /// # Safety
    ///
    /// `is_empty()` must have returned `false` since the last read. Reading
    /// an empty queue returns a stale byte, may race with the producer writing
    /// that same slot, and leaves the occupancy corrupted until the next
    /// flush.
    #[inline]
    pub unsafe fn read_unchecked(&mut self) -> u8 {
        self.ring.pop()
    }

    /// Moves up to `dst.len()` bytes into `dst` and returns how many were
    /// read.
    #[inline]
    pub fn read_slice(&mut self, dst: &mut [u8]) -> usize {
        self.ring.pop_slice(dst)
    }

    /// Returns an iterator reading until the queue is observed empty.
    pub fn drain<'s>(&'s mut self) -> Drain<'s, 'a, C> {
        Drain { ring: self.ring }
    }
}

#[cfg(test)]
mod tests {
    use super::super::RingBuffer;
    use error::Error;
    use std::thread;
    use std::vec::Vec;

    #[test]
    fn test_split_roles() {
        let mut storage = [0u8; 4];
        let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
        {
            let (mut producer, mut consumer) = ring.split();
            assert_eq!(producer.capacity(), 4);
            assert_eq!(consumer.capacity(), 4);
            assert!(consumer.is_empty());
            assert_eq!(consumer.read(), Err(Error::Empty));

            assert_eq!(producer.write_slice(&[1, 2, 3]), 3);
            assert_eq!(producer.available_space(), 1);
            assert_eq!(consumer.available_data(), 3);
            producer.write(4).unwrap();
            assert!(producer.is_full());
            assert_eq!(producer.write(5), Err(Error::Full { element: 5 }));

            assert_eq!(consumer.read(), Ok(1));
            let mut out = [0u8; 2];
            assert_eq!(consumer.read_slice(&mut out), 2);
            assert_eq!(out, [2, 3]);
            assert_eq!(consumer.drain().collect::<Vec<u8>>(), vec![4]);
            assert!(consumer.is_empty());
        }
        assert!(ring.is_empty());
    }

    #[test]
    fn test_unchecked_halves() {
        let mut storage = [0u8; 2];
        let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
        let (mut producer, mut consumer) = ring.split();
        for value in 0..10u8 {
            if !producer.is_full() {
                unsafe { producer.write_unchecked(value) };
            }
            if !consumer.is_empty() {
                assert_eq!(unsafe { consumer.read_unchecked() }, value);
            }
        }
    }

    #[test]
    fn test_threaded_bytes() {
        const TOTAL: usize = 10_000;

        let mut storage = [0u8; 16];
        let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
        let (mut producer, mut consumer) = ring.split();

        let received = thread::scope(|s| {
            s.spawn(move || {
                let mut sent = 0;
                while sent < TOTAL {
                    match producer.write(sent as u8) {
                        Ok(()) => sent += 1,
                        Err(_) => thread::yield_now(),
                    }
                }
            });

            let mut received = Vec::with_capacity(TOTAL);
            while received.len() < TOTAL {
                match consumer.read() {
                    Ok(value) => received.push(value),
                    Err(_) => thread::yield_now(),
                }
            }
            received
        });

        for (i, value) in received.into_iter().enumerate() {
            assert_eq!(value, i as u8);
        }
        assert!(ring.is_empty());
    }

    #[test]
    fn test_threaded_slices() {
        const TOTAL: usize = 50_000;

        let mut storage = [0u8; 200];
        let mut ring: RingBuffer<u16> = RingBuffer::with_storage(&mut storage).unwrap();
        let (mut producer, mut consumer) = ring.split();

        let received = thread::scope(|s| {
            s.spawn(move || {
                let src: Vec<u8> = (0..TOTAL).map(|i| (i % 251) as u8).collect();
                let mut sent = 0;
                while sent < TOTAL {
                    let end = ::std::cmp::min(sent + 37, TOTAL);
                    let written = producer.write_slice(&src[sent..end]);
                    if written == 0 {
                        thread::yield_now();
                    }
                    sent += written;
                }
            });

            let mut received = Vec::with_capacity(TOTAL);
            let mut chunk = [0u8; 64];
            while received.len() < TOTAL {
                let read = consumer.read_slice(&mut chunk);
                if read == 0 {
                    thread::yield_now();
                }
                received.extend_from_slice(&chunk[..read]);
            }
            received
        });

        for (i, value) in received.into_iter().enumerate() {
            assert_eq!(value, (i % 251) as u8);
        }
    }
}
