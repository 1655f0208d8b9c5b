use counter::Counter;

/// The slot after `index`, wrapping to 0 at `capacity`.
#[inline]
pub fn advance(index: usize, capacity: usize) -> usize {
    debug_assert!(index < capacity);
    let next = index + 1;
    if next == capacity {
        0
    } else {
        next
    }
}

#[inline]
pub fn wrap_add(index: usize, addend: usize, capacity: usize) -> usize {
    debug_assert!(addend <= capacity);
    (index + addend) % capacity
}

/// Unread elements, the wrapping difference of the two counters.
#[inline]
pub fn occupied<C: Counter>(write_count: C, read_count: C) -> usize {
    write_count.wrapping_diff(read_count).to_usize()
}
