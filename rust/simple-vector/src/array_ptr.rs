//! `ArrayPtr`: exclusive owner of a single heap block of `T` slots.
//!
//! The owner tracks physical capacity only. It never knows which slots hold
//! live values, so it never drops elements: releasing an `ArrayPtr` returns
//! the block to the allocator and nothing else. Tracking the live prefix and
//! destroying it is the job of the container that wraps the owner.

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::{Error, Result};

/// A move-only handle to a heap block of `capacity` uninitialized slots.
///
/// - A zero-capacity owner holds no block.
/// - Zero-sized element types never touch the allocator, but the requested
///   capacity is still recorded.
/// - The pointer is never null, including for an empty owner (it is dangling
///   and well-aligned in that case).
pub struct ArrayPtr<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _owns: PhantomData<T>,
}

// The block is uniquely owned, so thread-safety follows the element type.
unsafe impl<T: Send> Send for ArrayPtr<T> {}

unsafe impl<T: Sync> Sync for ArrayPtr<T> {}

impl<T> ArrayPtr<T> {
    /// Creates a zero-capacity owner without allocating.
    pub const fn empty() -> ArrayPtr<T> {
        ArrayPtr {
            ptr: NonNull::dangling(),
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Allocates a block of `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if the byte size of the block overflows `isize::MAX`.
    /// Allocator failure is reported through [`std::alloc::handle_alloc_error`].
    pub fn new(capacity: usize) -> ArrayPtr<T> {
        let layout = match Layout::array::<T>(capacity) {
            Ok(layout) => layout,
            Err(_) => capacity_overflow(capacity),
        };
        match Self::allocate(capacity, layout) {
            Some(ptr) => ptr,
            None => alloc::handle_alloc_error(layout),
        }
    }

    /// Allocates a block of `capacity` slots, reporting failure as an error.
    pub fn try_new(capacity: usize) -> Result<ArrayPtr<T>> {
        let layout =
            Layout::array::<T>(capacity).map_err(|_| Error::CapacityOverflow { capacity })?;
        Self::allocate(capacity, layout).ok_or(Error::AllocFailed {
            bytes: layout.size(),
        })
    }

    /// Number of slots in the block.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if this owner holds an allocated block.
    #[inline]
    pub fn has_block(&self) -> bool {
        self.capacity != 0 && std::mem::size_of::<T>() != 0
    }

    /// Returns a raw pointer to the first slot.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns a mutable raw pointer to the first slot.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Returns a raw pointer to slot `index`.
    ///
    /// Whether the slot holds a live value is the caller's business.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`ArrayPtr::capacity`]. The bound is only
    /// checked in debug builds; an out-of-range index is undefined behavior.
    #[inline]
    pub unsafe fn slot(&mut self, index: usize) -> *mut T {
        debug_assert!(
            index < self.capacity,
            "slot {index} out of range for capacity {}",
            self.capacity
        );
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Exchanges blocks and capacities with `other`.
    #[inline]
    pub fn swap(&mut self, other: &mut ArrayPtr<T>) {
        std::mem::swap(&mut self.ptr, &mut other.ptr);
        std::mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Transfers the block out of `self`, leaving it with zero capacity.
    #[inline]
    pub fn take(&mut self) -> ArrayPtr<T> {
        std::mem::take(self)
    }
}

impl<T> ArrayPtr<T> {
    fn allocate(capacity: usize, layout: Layout) -> Option<ArrayPtr<T>> {
        if layout.size() == 0 {
            return Some(ArrayPtr {
                ptr: NonNull::dangling(),
                capacity,
                _owns: PhantomData,
            });
        }

        let ptr = unsafe { alloc::alloc(layout) } as *mut T;
        NonNull::new(ptr).map(|ptr| ArrayPtr {
            ptr,
            capacity,
            _owns: PhantomData,
        })
    }

    fn layout(&self) -> Layout {
        // The same layout was validated by `Layout::array` when the block was allocated.
        unsafe {
            Layout::from_size_align_unchecked(
                std::mem::size_of::<T>() * self.capacity,
                std::mem::align_of::<T>(),
            )
        }
    }
}

impl<T> Drop for ArrayPtr<T> {
    fn drop(&mut self) {
        if self.has_block() {
            unsafe {
                alloc::dealloc(self.ptr.as_ptr() as *mut u8, self.layout());
            }
        }
    }
}

impl<T> Default for ArrayPtr<T> {
    fn default() -> Self {
        ArrayPtr::empty()
    }
}

impl<T> std::fmt::Debug for ArrayPtr<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayPtr")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cold]
#[inline(never)]
pub(crate) fn capacity_overflow(capacity: usize) -> ! {
    panic!("{}", Error::CapacityOverflow { capacity })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_block() {
        let p = ArrayPtr::<u64>::empty();
        assert_eq!(p.capacity(), 0);
        assert!(!p.has_block());
        assert!(!p.as_ptr().is_null());

        let p = ArrayPtr::<u64>::new(0);
        assert_eq!(p.capacity(), 0);
        assert!(!p.has_block());
    }

    #[test]
    fn test_new_allocates_requested_slots() {
        let mut p = ArrayPtr::<u64>::new(16);
        assert_eq!(p.capacity(), 16);
        assert!(p.has_block());
        assert!(p.as_ptr().is_aligned());

        for i in 0..16 {
            unsafe { p.slot(i).write(i as u64 * 3) };
        }
        for i in 0..16 {
            assert_eq!(unsafe { p.slot(i).read() }, i as u64 * 3);
        }
    }

    #[test]
    fn test_slot_addresses_follow_block_start() {
        let mut p = ArrayPtr::<u32>::new(5);
        let base = p.as_ptr();
        for i in 0..5 {
            let slot = unsafe { p.slot(i) } as *const u32;
            assert_eq!(slot, base.wrapping_add(i));
        }
    }

    #[test]
    fn test_try_new_reports_overflow() {
        let err = ArrayPtr::<u64>::try_new(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            Error::CapacityOverflow {
                capacity: usize::MAX
            }
        );
        assert!(err.is_alloc_error());
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_new_panics_on_overflow() {
        let _ = ArrayPtr::<u32>::new(usize::MAX / 2);
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let mut a = ArrayPtr::<String>::new(4);
        let ptr = a.as_ptr();

        let b = a.take();
        assert_eq!(b.capacity(), 4);
        assert_eq!(b.as_ptr(), ptr);
        assert_eq!(a.capacity(), 0);
        assert!(!a.has_block());
    }

    #[test]
    fn test_swap_exchanges_blocks() {
        let mut a = ArrayPtr::<i32>::new(2);
        let mut b = ArrayPtr::<i32>::new(7);
        let (pa, pb) = (a.as_ptr(), b.as_ptr());

        a.swap(&mut b);
        assert_eq!(a.capacity(), 7);
        assert_eq!(b.capacity(), 2);
        assert_eq!(a.as_ptr(), pb);
        assert_eq!(b.as_ptr(), pa);
    }

    #[test]
    fn test_zero_sized_slots() {
        let p = ArrayPtr::<()>::new(1000);
        assert_eq!(p.capacity(), 1000);
        assert!(!p.has_block());
    }
}
