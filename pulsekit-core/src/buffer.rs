//! Fixed-Size Circular Buffer
//!
//! ## Overview
//!
//! Ring buffer with compile-time capacity used for sliding windows on the
//! sampling path, e.g. the most recent beat-to-beat intervals of the
//! heart-rate detector. It never allocates.
//!
//! - `push()` is O(1) and overwrites the oldest element when full
//! - `last()` is O(1)
//! - `iter()` walks oldest to newest
//!
//! `heapless::Vec` refuses pushes when full; here the newest data wins, which
//! is what a sliding window wants.
//!
//! ```text
//! CircularBuffer<u32, 4> after pushing 1..=6:
//! ┌───┬───┬───┬───┐
//! │ 5 │ 6 │ 3 │ 4 │   physical slots
//! └───┴───┴───┴───┘
//!           ↑
//!           └── write_pos = 2, oldest element
//! logical order: [3, 4, 5, 6]
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use pulsekit_core::buffer::CircularBuffer;
//!
//! let mut intervals: CircularBuffer<u32, 3> = CircularBuffer::new();
//! intervals.push(820);
//! intervals.push(830);
//! intervals.push(810);
//! intervals.push(840);
//!
//! assert_eq!(intervals.len(), 3);
//! assert_eq!(intervals.last(), Some(&840));
//! assert_eq!(intervals.iter().copied().sum::<u32>(), 2480);
//! ```

/// Fixed-size circular buffer
///
/// ## Internal Invariants
///
/// - `write_pos < N` whenever `N > 0`
/// - `len <= N`
/// - Iteration yields elements in insertion order
///
/// Not thread-safe; owners wrap it in a lock when sharing.
#[derive(Debug, Clone)]
pub struct CircularBuffer<T: Copy, const N: usize> {
    /// Option avoids `MaybeUninit` and keeps the crate free of unsafe code
    data: [Option<T>; N],
    write_pos: usize,
    len: usize,
}

impl<T: Copy, const N: usize> CircularBuffer<T, N> {
    /// Creates a new empty buffer
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Appends an element, overwriting the oldest one when full
    ///
    /// A zero-capacity buffer drops every element.
    pub fn push(&mut self, item: T) {
        if N == 0 {
            return;
        }
        self.data[self.write_pos] = Some(item);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Number of stored elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once `N` elements are stored
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Compile-time capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Most recently pushed element
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        self.data[idx].as_ref()
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, T, N> {
        CircularBufferIter { buffer: self, index: 0 }
    }

    /// Forget every element
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }

    /// Element by logical index (0 = oldest)
    ///
    /// Until the buffer fills, logical and physical indices match. Once full,
    /// the oldest element sits at `write_pos`.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let physical = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };
        self.data[physical].as_ref()
    }
}

/// Iterator over circular buffer contents
pub struct CircularBufferIter<'a, T: Copy, const N: usize> {
    buffer: &'a CircularBuffer<T, N>,
    index: usize,
}

impl<'a, T: Copy, const N: usize> Iterator for CircularBufferIter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<T: Copy, const N: usize> Default for CircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer() {
        let buffer: CircularBuffer<u32, 5> = CircularBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert!(buffer.last().is_none());
        assert_eq!(buffer.capacity(), 5);
    }

    #[test]
    fn push_and_retrieve() {
        let mut buffer = CircularBuffer::<u32, 5>::new();
        buffer.push(830);

        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.last(), Some(&830));
    }

    #[test]
    fn circular_overwrite() {
        let mut buffer = CircularBuffer::<u32, 3>::new();
        for i in 0..5 {
            buffer.push(i);
        }

        assert_eq!(buffer.len(), 3);
        assert!(buffer.is_full());

        let values: Vec<u32> = buffer.iter().copied().collect();
        assert_eq!(values, vec![2, 3, 4]);
        assert_eq!(buffer.last(), Some(&4));
    }

    #[test]
    fn iterator_order_before_full() {
        let mut buffer = CircularBuffer::<u32, 4>::new();
        buffer.push(7);
        buffer.push(8);

        let values: Vec<u32> = buffer.iter().copied().collect();
        assert_eq!(values, vec![7, 8]);
        assert_eq!(buffer.iter().size_hint(), (2, Some(2)));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut buffer = CircularBuffer::<u32, 2>::new();
        buffer.push(1);
        buffer.push(2);
        buffer.push(3);
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.iter().count(), 0);

        buffer.push(9);
        assert_eq!(buffer.get(0), Some(&9));
    }

    #[test]
    fn zero_capacity_drops_pushes() {
        let mut buffer = CircularBuffer::<u32, 0>::new();
        buffer.push(1);
        assert!(buffer.is_empty());
        assert!(buffer.last().is_none());
    }
}
