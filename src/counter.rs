//! Counter domains.

use std::fmt;
use std::sync::atomic::Ordering;

/// Trait for the fixed-width unsigned integers a `RingBuffer` counts in.
///
/// The write and read counters wrap silently in this width, and occupancy is
/// always their wrapping difference, so the largest capacity a queue may be
/// initialized with is `Counter::MAX`.
///
/// Only plain loads and stores are required from `Counter::Atomic`, so a
/// counter domain is available on any target with atomic load/store of its
/// width, even without compare-and-swap.
pub trait Counter: Copy + Eq + fmt::Debug + 'static {
    #[doc(hidden)]
    /// The atomic cell holding a value of this width.
    type Atomic: AtomicCounter<Self> + Send + Sync + 'static;

    /// The largest value of the counter, and therefore the largest capacity.
    const MAX: usize;

    /// Widens the counter to `usize`.
    fn to_usize(self) -> usize;

    /// Truncates `ix` to the counter's width.
    fn from_usize(ix: usize) -> Self;

    /// `self + 1`, wrapping at the counter's width.
    fn wrapping_inc(self) -> Self;

    /// `self + n`, wrapping at the counter's width.
    fn wrapping_add_usize(self, n: usize) -> Self;

    /// `self - other`, wrapping at the counter's width.
    fn wrapping_diff(self, other: Self) -> Self;
}

#[doc(hidden)]
/// Load/store access to the atomic cell of a counter domain.
pub trait AtomicCounter<C> {
    /// Creates a cell holding `value`.
    fn new(value: C) -> Self;
    /// Loads the value.
    fn load(&self, order: Ordering) -> C;
    /// Stores `value`.
    fn store(&self, value: C, order: Ordering);
}

macro_rules! impl_counter {
    ($int:ty, $atomic:ident) => {
        impl Counter for $int {
            type Atomic = ::std::sync::atomic::$atomic;

            const MAX: usize = <$int>::max_value() as usize;

            #[inline(always)]
            fn to_usize(self) -> usize {
                self as usize
            }

            #[inline(always)]
            fn from_usize(ix: usize) -> Self {
                ix as $int
            }

            #[inline(always)]
            fn wrapping_inc(self) -> Self {
                self.wrapping_add(1)
            }

            #[inline(always)]
            fn wrapping_add_usize(self, n: usize) -> Self {
                self.wrapping_add(n as $int)
            }

            #[inline(always)]
            fn wrapping_diff(self, other: Self) -> Self {
                self.wrapping_sub(other)
            }
        }

        impl AtomicCounter<$int> for ::std::sync::atomic::$atomic {
            #[inline(always)]
            fn new(value: $int) -> Self {
                ::std::sync::atomic::$atomic::new(value)
            }

            #[inline(always)]
            fn load(&self, order: Ordering) -> $int {
                ::std::sync::atomic::$atomic::load(self, order)
            }

            #[inline(always)]
            fn store(&self, value: $int, order: Ordering) {
                ::std::sync::atomic::$atomic::store(self, value, order)
            }
        }
    };
}

#[cfg(target_has_atomic = "8")]
impl_counter!(u8, AtomicU8);
#[cfg(target_has_atomic = "16")]
impl_counter!(u16, AtomicU16);
#[cfg(target_has_atomic = "32")]
impl_counter!(u32, AtomicU32);
#[cfg(target_has_atomic = "ptr")]
impl_counter!(usize, AtomicUsize);
