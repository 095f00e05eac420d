//! Fixed-capacity memory region handed to the layout engine.
//!
//! The arena is allocated once with [`Arena::with_capacity`] and never grows.
//! Tables are carved out of it as [`ArenaSlice`] handles: plain offsets into
//! the backing buffer, resolved to typed slices through `bytemuck` on access.

use core::fmt;
use core::marker::PhantomData;

use bytemuck::{Pod, Zeroable};

/// Every allocation starts on a 16-byte boundary.
pub const ARENA_ALIGN: usize = 16;

#[repr(C, align(16))]
#[derive(Copy, Clone)]
struct Block([u8; ARENA_ALIGN]);

// SAFETY: a 16-byte array aligned to 16 has no padding and every bit
// pattern is valid.
unsafe impl Zeroable for Block {}
unsafe impl Pod for Block {}

/// Error returned when an allocation does not fit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ArenaError {
    pub requested: usize,
    pub available: usize,
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arena exhausted: requested {} bytes, {} available",
            self.requested, self.available
        )
    }
}

impl std::error::Error for ArenaError {}

/// Typed handle to a table inside an [`Arena`].
pub struct ArenaSlice<T> {
    offset: usize,
    len: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ArenaSlice<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArenaSlice<T> {}

impl<T> fmt::Debug for ArenaSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaSlice")
            .field("offset", &self.offset)
            .field("len", &self.len)
            .finish()
    }
}

impl<T> ArenaSlice<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn byte_range(&self) -> core::ops::Range<usize> {
        self.offset..self.offset + self.len * size_of::<T>()
    }
}

pub struct Arena {
    blocks: Vec<Block>,
    used: usize,
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity())
            .field("used", &self.used)
            .finish()
    }
}

impl Arena {
    /// Allocates a zeroed region of at least `bytes` bytes (rounded up to 16).
    pub fn with_capacity(bytes: usize) -> Self {
        let blocks = bytes.div_ceil(ARENA_ALIGN);
        Self { blocks: vec![Block([0; ARENA_ALIGN]); blocks], used: 0 }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.blocks.len() * ARENA_ALIGN
    }

    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.used
    }

    /// Padded byte size of a `len`-element table of `T`.
    pub fn table_size<T: Pod>(len: usize) -> usize {
        (len * size_of::<T>()).next_multiple_of(ARENA_ALIGN)
    }

    /// Reserves a zeroed table of `len` values.
    pub fn alloc<T: Pod>(&mut self, len: usize) -> Result<ArenaSlice<T>, ArenaError> {
        debug_assert!(align_of::<T>() <= ARENA_ALIGN);

        let requested = len
            .checked_mul(size_of::<T>())
            .map(|b| b.next_multiple_of(ARENA_ALIGN))
            .ok_or(ArenaError { requested: usize::MAX, available: self.remaining() })?;

        if requested > self.remaining() {
            return Err(ArenaError { requested, available: self.remaining() });
        }

        let offset = self.used;
        self.used += requested;

        let slice = ArenaSlice { offset, len, _marker: PhantomData };
        self.get_mut(&slice).fill(T::zeroed());
        Ok(slice)
    }

    /// Forgets every allocation. Existing handles must not be used afterwards.
    pub fn reset(&mut self) {
        self.used = 0;
    }

    pub fn get<T: Pod>(&self, slice: &ArenaSlice<T>) -> &[T] {
        let bytes: &[u8] = bytemuck::cast_slice(&self.blocks);
        bytemuck::cast_slice(&bytes[slice.byte_range()])
    }

    pub fn get_mut<T: Pod>(&mut self, slice: &ArenaSlice<T>) -> &mut [T] {
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut self.blocks);
        bytemuck::cast_slice_mut(&mut bytes[slice.byte_range()])
    }

    /// Borrows two distinct tables at once.
    ///
    /// # Panics
    /// Panics if the two handles overlap.
    pub fn pair_mut<A: Pod, B: Pod>(
        &mut self,
        a: &ArenaSlice<A>,
        b: &ArenaSlice<B>,
    ) -> (&mut [A], &mut [B]) {
        let ra = a.byte_range();
        let rb = b.byte_range();
        assert!(ra.end <= rb.start || rb.end <= ra.start, "arena tables overlap");

        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut self.blocks);
        if ra.start < rb.start {
            let (lo, hi) = bytes.split_at_mut(rb.start);
            (
                bytemuck::cast_slice_mut(&mut lo[ra]),
                bytemuck::cast_slice_mut(&mut hi[..rb.end - rb.start]),
            )
        } else {
            let (lo, hi) = bytes.split_at_mut(ra.start);
            (
                bytemuck::cast_slice_mut(&mut hi[..ra.end - ra.start]),
                bytemuck::cast_slice_mut(&mut lo[rb]),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_rounds_up_to_alignment() {
        assert_eq!(Arena::with_capacity(1).capacity(), 16);
        assert_eq!(Arena::with_capacity(32).capacity(), 32);
        assert_eq!(Arena::with_capacity(0).capacity(), 0);
    }

    #[test]
    fn alloc_is_zeroed_and_aligned() {
        let mut arena = Arena::with_capacity(256);
        let a: ArenaSlice<u32> = arena.alloc(3).unwrap();
        let b: ArenaSlice<f32> = arena.alloc(4).unwrap();
        assert_eq!(arena.used(), 32);
        assert!(arena.get(&a).iter().all(|&v| v == 0));
        assert_eq!(arena.get(&b).len(), 4);
    }

    #[test]
    fn alloc_past_capacity_fails() {
        let mut arena = Arena::with_capacity(32);
        let err = arena.alloc::<u64>(8).unwrap_err();
        assert_eq!(err.requested, 64);
        assert_eq!(err.available, 32);
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn writes_are_visible_through_handle() {
        let mut arena = Arena::with_capacity(64);
        let s: ArenaSlice<u32> = arena.alloc(4).unwrap();
        arena.get_mut(&s)[2] = 7;
        assert_eq!(arena.get(&s), &[0, 0, 7, 0]);
    }

    #[test]
    fn pair_mut_splits_disjoint_tables() {
        let mut arena = Arena::with_capacity(64);
        let a: ArenaSlice<u32> = arena.alloc(2).unwrap();
        let b: ArenaSlice<f32> = arena.alloc(2).unwrap();

        let (xs, ys) = arena.pair_mut(&b, &a);
        xs[0] = 1.5;
        ys[1] = 9;

        assert_eq!(arena.get(&a), &[0, 9]);
        assert_eq!(arena.get(&b), &[1.5, 0.0]);
    }

    #[test]
    fn reset_reclaims_space() {
        let mut arena = Arena::with_capacity(32);
        arena.alloc::<u8>(32).unwrap();
        assert_eq!(arena.remaining(), 0);
        arena.reset();
        assert_eq!(arena.remaining(), 32);
    }
}
