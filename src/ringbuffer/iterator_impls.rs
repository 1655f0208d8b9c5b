use counter::Counter;

use super::Drain;

impl<'r, 'a, C: Counter> Iterator for Drain<'r, 'a, C> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        self.ring.try_pop().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        // the producer may still be adding bytes behind us
        (self.ring.consumer_readable(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::super::RingBuffer;
    use std::vec::Vec;

    #[test]
    fn test_drain() {
        let mut storage = [0u8; 5];
        let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
        ring.write_slice(&[1, 2, 3, 4]);
        ring.read().unwrap();
        ring.write_slice(&[5, 6]);
        {
            let drain = ring.drain();
            assert_eq!(drain.size_hint(), (5, None));
            assert_eq!(drain.take(2).collect::<Vec<_>>(), vec![2, 3]);
        }
        assert_eq!(ring.available_data(), 3);
        assert_eq!(ring.drain().collect::<Vec<_>>(), vec![4, 5, 6]);
        assert_eq!(ring.drain().next(), None);
    }

    #[test]
    fn test_drain_hint_after_overfill() {
        let mut storage = [0u8; 3];
        let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
        for value in 0..7u8 {
            unsafe { ring.write_unchecked(value) };
        }
        assert_eq!(ring.available_data(), 7);
        assert_eq!(ring.drain().size_hint(), (3, None));
    }
}
