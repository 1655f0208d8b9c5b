use std::fmt;
use std::sync::atomic::Ordering;

use counter::{AtomicCounter, Counter};

use super::RingBuffer;

impl<'a, C: Counter> Default for RingBuffer<'a, C> {
    #[inline]
    fn default() -> RingBuffer<'a, C> {
        RingBuffer::new()
    }
}

/// Shows the bookkeeping, not the stored bytes.
impl<'a, C: Counter> fmt::Debug for RingBuffer<'a, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity)
            .field("write_index", &self.write_index.load(Ordering::Relaxed))
            .field("read_index", &self.read_index.load(Ordering::Relaxed))
            .field("write_count", &self.write_count.load(Ordering::Acquire))
            .field("read_count", &self.read_count.load(Ordering::Acquire))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::RingBuffer;

    #[test]
    fn test_default_is_unbound() {
        let ring: RingBuffer = Default::default();
        assert_eq!(ring.capacity(), 0);
        assert!(ring.is_empty());
        assert!(ring.is_full());
    }

    #[test]
    fn test_fmt() {
        let mut storage = [0u8; 3];
        let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
        ring.write_slice(&[1, 2, 3]);
        ring.read().unwrap();
        ring.write(4).unwrap();
        assert_eq!(format!("{:?}", ring),
                   "RingBuffer { capacity: 3, write_index: 1, read_index: 1, \
                    write_count: 4, read_count: 1 }");
    }
}
