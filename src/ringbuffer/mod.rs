use std::cmp;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};
use std::sync::atomic::Ordering;

use counter::{AtomicCounter, Counter};
use error::Error;
use utils::*;

mod iterator_impls;
mod split;
mod trait_impls;

pub use self::split::{Consumer, Producer};

/// `RingBuffer` is a fixed capacity single-producer/single-consumer byte queue
/// over caller-supplied storage.
///
/// Besides the two slot indices the queue keeps a cumulative write count and a
/// cumulative read count. The producer only ever stores to the write side, the
/// consumer only ever stores to the read side, and the number of unread bytes
/// is the wrapping difference of the two counts. The counts wrap silently in
/// the width of `C`, which is why the capacity is limited to `C::MAX`.
///
/// The queue never allocates. Storage is borrowed for `'a` and stays
/// inaccessible to the caller until the queue is dropped.
///
/// # Checked and unchecked access
///
/// `write` and `read` refuse with `Error::Full` / `Error::Empty` and leave the
/// queue untouched. `write_unchecked` and `read_unchecked` skip the check for
/// the smallest code on 8-bit targets; the caller must have consulted
/// `is_full` / `is_empty` first.
///
/// # Examples
///
/// ```
/// use smringbuf::RingBuffer;
///
/// let mut storage = [0u8; 4];
/// let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
///
/// ring.write(1).unwrap();
/// ring.write(2).unwrap();
/// assert_eq!(ring.available_data(), 2);
/// assert_eq!(ring.available_space(), 2);
///
/// assert_eq!(ring.read(), Ok(1));
/// assert_eq!(ring.read(), Ok(2));
/// assert!(ring.read().is_err());
/// ```
pub struct RingBuffer<'a, C: Counter = u8> {
    buf: NonNull<u8>,
    capacity: usize,
    write_index: C::Atomic,
    read_index: C::Atomic,
    write_count: C::Atomic,
    read_count: C::Atomic,
    marker: PhantomData<&'a mut [u8]>,
}

// The storage pointer is only dereferenced at `write_index` by the producer and
// at `read_index` by the consumer, and shared references only load counters.
unsafe impl<'a, C: Counter> Send for RingBuffer<'a, C> {}
unsafe impl<'a, C: Counter> Sync for RingBuffer<'a, C> {}

impl<'a, C: Counter> RingBuffer<'a, C> {
    /// Creates a queue with no storage bound to it.
    ///
    /// An unbound queue has a capacity of 0: it reports both empty and full,
    /// so every checked read and write is refused until `init` succeeds.
    ///
    /// # Examples
    ///
    /// ```
    /// use smringbuf::RingBuffer;
    ///
    /// let ring: RingBuffer = RingBuffer::new();
    /// assert_eq!(ring.capacity(), 0);
    /// assert!(ring.is_empty() && ring.is_full());
    /// ```
    #[inline]
    pub fn new() -> RingBuffer<'a, C> {
        RingBuffer {
            buf: NonNull::dangling(),
            capacity: 0,
            write_index: C::Atomic::new(C::from_usize(0)),
            read_index: C::Atomic::new(C::from_usize(0)),
            write_count: C::Atomic::new(C::from_usize(0)),
            read_count: C::Atomic::new(C::from_usize(0)),
            marker: PhantomData,
        }
    }

    /// Creates a queue using all of `storage` as its slots.
    ///
    /// # Errors
    ///
    /// `Error::InvalidCapacity` if `storage` is empty or longer than `C::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use smringbuf::{Error, RingBuffer};
    ///
    /// let mut storage = [0u8; 11];
    /// let ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
    /// assert_eq!(ring.capacity(), 11);
    ///
    /// let mut large = [0u8; 300];
    /// let err = RingBuffer::<u8>::with_storage(&mut large).unwrap_err();
    /// assert_eq!(err, Error::InvalidCapacity { capacity: 300, max: 255 });
    /// ```
    pub fn with_storage(storage: &'a mut [u8]) -> Result<RingBuffer<'a, C>, Error> {
        let capacity = storage.len();
        let mut ring = RingBuffer::new();
        ring.init(storage, capacity)?;
        Ok(ring)
    }

    /// Binds `storage` to the queue with room for `capacity` bytes and resets
    /// both indices and both counters.
    ///
    /// Any previously bound storage is released from the queue; bytes it
    /// still held are lost.
    ///
    /// # Errors
    ///
    /// `Error::InvalidCapacity` if `capacity` is 0, exceeds `storage.len()` or
    /// exceeds `C::MAX`. The queue is left unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use smringbuf::RingBuffer;
    ///
    /// let mut storage = [0u8; 32];
    /// let mut ring: RingBuffer = RingBuffer::new();
    /// ring.init(&mut storage, 22).unwrap();
    ///
    /// assert!(ring.is_empty());
    /// assert_eq!(ring.available_space(), 22);
    /// ```
    pub fn init(&mut self, storage: &'a mut [u8], capacity: usize) -> Result<(), Error> {
        let max = cmp::min(storage.len(), C::MAX);
        if capacity == 0 || capacity > max {
            warn!("refusing ring buffer capacity {} (storage {}, counter max {})",
                  capacity,
                  storage.len(),
                  C::MAX);
            return Err(Error::InvalidCapacity { capacity, max });
        }
        self.buf = NonNull::from(storage).cast();
        self.capacity = capacity;
        self.reset();
        trace!("ring buffer bound to {} slots", capacity);
        Ok(())
    }

    /// Returns the number of slots the queue was initialized with.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of bytes written but not yet read.
    ///
    /// # Examples
    ///
    /// ```
    /// use smringbuf::RingBuffer;
    ///
    /// let mut storage = [0u8; 11];
    /// let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
    /// ring.write(26).unwrap();
    /// assert_eq!(ring.available_data(), 1);
    /// ```
    #[inline]
    pub fn available_data(&self) -> usize {
        let write_count = self.write_count.load(Ordering::Acquire);
        let read_count = self.read_count.load(Ordering::Acquire);
        occupied(write_count, read_count)
    }

    /// Returns the number of writes that may be issued before the queue is
    /// full.
    #[inline]
    pub fn available_space(&self) -> usize {
        self.capacity.saturating_sub(self.available_data())
    }

    /// Returns `true` if there is nothing to read.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.available_data() == 0
    }

    /// Returns `true` if a write would overwrite unread data.
    ///
    /// # Examples
    ///
    /// ```
    /// use smringbuf::RingBuffer;
    ///
    /// let mut storage = [0u8; 2];
    /// let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
    /// ring.write(1).unwrap();
    /// assert!(!ring.is_full());
    /// ring.write(2).unwrap();
    /// assert!(ring.is_full());
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        self.available_data() >= self.capacity
    }

    /// Appends `element`.
    ///
    /// # Errors
    ///
    /// `Error::Full` carrying `element` back if the queue is full. Nothing is
    /// stored and no counter moves.
    ///
    /// # Examples
    ///
    /// ```
    /// use smringbuf::{Error, RingBuffer};
    ///
    /// let mut storage = [0u8; 1];
    /// let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
    /// assert_eq!(ring.write(5), Ok(()));
    /// assert_eq!(ring.write(6), Err(Error::Full { element: 6 }));
    /// assert_eq!(ring.read(), Ok(5));
    /// ```
    #[inline]
    pub fn write(&mut self, element: u8) -> Result<(), Error> {
        self.try_push(element)
    }

    /// Appends `element` without checking for space.
    ///
    /// # Safety
    ///
    /// The queue must have been initialized. Writing while `is_full()` holds
    /// overwrites the oldest unread byte and leaves the occupancy above the
    /// capacity; callers are expected to check `is_full()` first. Bulk reads
    /// of an overfilled queue stay within the storage.
    #[inline]
    pub unsafe fn write_unchecked(&mut self, element: u8) {
        self.push(element)
    }

    /// Removes the oldest unread byte and returns it.
    ///
    /// # Errors
    ///
    /// `Error::Empty` if there is nothing to read. Nothing moves.
    #[inline]
    pub fn read(&mut self) -> Result<u8, Error> {
        self.try_pop()
    }

    /// Removes the byte at the read position without checking for data.
    ///
    /// On an empty queue this returns whatever stale byte occupies the slot
    /// and still advances the read side, so the queue then reports more
    /// unread data than it holds until the next `flush`. Bulk reads never
    /// move more than `capacity` bytes at once. Prefer `read`.
    ///
    /// # Safety
    ///
    /// The queue must have been initialized.
    #[inline]
    pub unsafe fn read_unchecked(&mut self) -> u8 {
        self.pop()
    }

    /// Appends as many leading bytes of `src` as fit and returns how many
    /// were written. Never overwrites unread data.
    ///
    /// # Examples
    ///
    /// ```
    /// use smringbuf::RingBuffer;
    ///
    /// let mut storage = [0u8; 4];
    /// let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
    /// assert_eq!(ring.write_slice(&[1, 2, 3, 4, 5, 6]), 4);
    ///
    /// let mut out = [0u8; 8];
    /// assert_eq!(ring.read_slice(&mut out), 4);
    /// assert_eq!(&out[..4], &[1, 2, 3, 4]);
    /// ```
    #[inline]
    pub fn write_slice(&mut self, src: &[u8]) -> usize {
        self.push_slice(src)
    }

    /// Moves up to `dst.len()` unread bytes into `dst` and returns how many
    /// were read.
    #[inline]
    pub fn read_slice(&mut self, dst: &mut [u8]) -> usize {
        self.pop_slice(dst)
    }

    /// Discards all unread bytes by resetting both indices and both counters.
    ///
    /// The storage itself is not cleared. Requires exclusive access, so it
    /// cannot race with a split producer or consumer.
    ///
    /// # Examples
    ///
    /// ```
    /// use smringbuf::RingBuffer;
    ///
    /// let mut storage = [0u8; 8];
    /// let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
    /// ring.write_slice(&[100, 101, 102, 103, 104]);
    /// ring.flush();
    ///
    /// assert!(ring.is_empty());
    /// assert_eq!(ring.available_space(), 8);
    /// ```
    pub fn flush(&mut self) {
        let discarded = self.available_data();
        self.reset();
        trace!("ring buffer flushed, {} unread bytes discarded", discarded);
    }

    /// Splits the queue into its producer and consumer halves.
    ///
    /// The halves may be moved to different threads or execution contexts.
    /// While they are alive the queue itself is mutably borrowed, so `flush`
    /// and `init` cannot run concurrently with them.
    ///
    /// # Examples
    ///
    /// ```
    /// use smringbuf::RingBuffer;
    ///
    /// let mut storage = [0u8; 8];
    /// let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
    /// {
    ///     let (mut producer, mut consumer) = ring.split();
    ///     producer.write(42).unwrap();
    ///     assert_eq!(consumer.read(), Ok(42));
    /// }
    /// ring.flush();
    /// ```
    pub fn split<'r>(&'r mut self) -> (Producer<'r, 'a, C>, Consumer<'r, 'a, C>) {
        trace!("ring buffer split with {} unread bytes", self.available_data());
        let ring: &'r RingBuffer<'a, C> = self;
        (Producer::new(ring), Consumer::new(ring))
    }

    /// Returns an iterator that reads until the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use smringbuf::RingBuffer;
    ///
    /// let mut storage = [0u8; 8];
    /// let mut ring: RingBuffer = RingBuffer::with_storage(&mut storage).unwrap();
    /// ring.write_slice(&[1, 2, 3]);
    ///
    /// let drained: Vec<u8> = ring.drain().collect();
    /// assert_eq!(drained, vec![1, 2, 3]);
    /// assert!(ring.is_empty());
    /// ```
    pub fn drain<'r>(&'r mut self) -> Drain<'r, 'a, C> {
        Drain { ring: &*self }
    }
}

// Role primitives, shared by the owning queue and the split halves.
impl<'a, C: Counter> RingBuffer<'a, C> {
    fn reset(&mut self) {
        let zero = C::from_usize(0);
        self.write_index.store(zero, Ordering::Relaxed);
        self.read_index.store(zero, Ordering::Relaxed);
        self.write_count.store(zero, Ordering::Release);
        self.read_count.store(zero, Ordering::Release);
    }

    #[inline]
    fn producer_full(&self) -> bool {
        self.producer_space() == 0
    }

    #[inline]
    fn producer_space(&self) -> usize {
        let write_count = self.write_count.load(Ordering::Relaxed);
        let read_count = self.read_count.load(Ordering::Acquire);
        self.capacity.saturating_sub(occupied(write_count, read_count))
    }

    #[inline]
    fn consumer_data(&self) -> usize {
        let write_count = self.write_count.load(Ordering::Acquire);
        let read_count = self.read_count.load(Ordering::Relaxed);
        occupied(write_count, read_count)
    }

    /// Unread bytes, capped at the capacity. An unchecked path may have
    /// pushed the counts apart by more than the storage holds.
    #[inline]
    fn consumer_readable(&self) -> usize {
        cmp::min(self.consumer_data(), self.capacity)
    }

    #[inline]
    unsafe fn push(&self, element: u8) {
        debug_assert!(self.capacity != 0, "write to an unbound ring buffer");
        let index = self.write_index.load(Ordering::Relaxed).to_usize();
        ptr::write(self.buf.as_ptr().add(index), element);
        self.write_index.store(C::from_usize(advance(index, self.capacity)), Ordering::Relaxed);
        let count = self.write_count.load(Ordering::Relaxed);
        self.write_count.store(count.wrapping_inc(), Ordering::Release);
    }

    #[inline]
    unsafe fn pop(&self) -> u8 {
        debug_assert!(self.capacity != 0, "read from an unbound ring buffer");
        let index = self.read_index.load(Ordering::Relaxed).to_usize();
        let element = ptr::read(self.buf.as_ptr().add(index));
        self.read_index.store(C::from_usize(advance(index, self.capacity)), Ordering::Relaxed);
        let count = self.read_count.load(Ordering::Relaxed);
        self.read_count.store(count.wrapping_inc(), Ordering::Release);
        element
    }

    fn try_push(&self, element: u8) -> Result<(), Error> {
        if self.producer_full() {
            debug!("ring buffer full, dropped {}", element);
            return Err(Error::Full { element });
        }
        unsafe { self.push(element) };
        Ok(())
    }

    fn try_pop(&self) -> Result<u8, Error> {
        if self.consumer_data() == 0 {
            debug!("ring buffer empty, nothing to read");
            return Err(Error::Empty);
        }
        Ok(unsafe { self.pop() })
    }

    fn push_slice(&self, src: &[u8]) -> usize {
        let len = cmp::min(src.len(), self.producer_space());
        if len == 0 {
            return 0;
        }
        let index = self.write_index.load(Ordering::Relaxed).to_usize();
        let first = cmp::min(len, self.capacity - index);
        unsafe {
            let buf = self.buf.as_ptr();
            ptr::copy_nonoverlapping(src.as_ptr(), buf.add(index), first);
            ptr::copy_nonoverlapping(src.as_ptr().add(first), buf, len - first);
        }
        self.write_index.store(C::from_usize(wrap_add(index, len, self.capacity)), Ordering::Relaxed);
        let count = self.write_count.load(Ordering::Relaxed);
        self.write_count.store(count.wrapping_add_usize(len), Ordering::Release);
        len
    }

    fn pop_slice(&self, dst: &mut [u8]) -> usize {
        let len = cmp::min(dst.len(), self.consumer_readable());
        if len == 0 {
            return 0;
        }
        let index = self.read_index.load(Ordering::Relaxed).to_usize();
        let first = cmp::min(len, self.capacity - index);
        unsafe {
            let buf = self.buf.as_ptr();
            ptr::copy_nonoverlapping(buf.add(index), dst.as_mut_ptr(), first);
            ptr::copy_nonoverlapping(buf, dst.as_mut_ptr().add(first), len - first);
        }
        self.read_index.store(C::from_usize(wrap_add(index, len, self.capacity)), Ordering::Relaxed);
        let count = self.read_count.load(Ordering::Relaxed);
        self.read_count.store(count.wrapping_add_usize(len), Ordering::Release);
        len
    }
}

/// A draining `RingBuffer` iterator, reading until the queue is empty.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct Drain<'r, 'a: 'r, C: Counter = u8> {
    ring: &'r RingBuffer<'a, C>,
}
