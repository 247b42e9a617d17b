//! `SimpleVector`: a growable, contiguous, random-access sequence.

use std::borrow::{Borrow, BorrowMut};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice::SliceIndex;

use crate::array_ptr::{ArrayPtr, capacity_overflow};
use crate::error::{Error, Result};
use crate::into_iter::IntoIter;

/// Capacity reservation marker, produced by [`reserve`].
///
/// Converting it into a [`SimpleVector`] preallocates the requested number
/// of slots without populating any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveProxy {
    capacity: usize,
}

impl ReserveProxy {
    pub fn new(capacity: usize) -> ReserveProxy {
        ReserveProxy { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Creates a reservation marker for `capacity_to_reserve` slots.
///
/// ```
/// use simple_vector::{SimpleVector, reserve};
///
/// let v = SimpleVector::<String>::from(reserve(8));
/// assert_eq!(v.len(), 0);
/// assert_eq!(v.capacity(), 8);
/// ```
pub fn reserve(capacity_to_reserve: usize) -> ReserveProxy {
    ReserveProxy::new(capacity_to_reserve)
}

/// A growable array that owns its elements in one contiguous heap block.
///
/// Slots `[0, len)` hold live elements; slots `[len, capacity)` are
/// allocated but inactive. Shrinking operations (`pop_back`, `erase`,
/// `truncate`, `clear`, `resize` down) drop the affected elements but never
/// release capacity.
///
/// # Growth
///
/// When an append or insertion finds `len == capacity`, the storage is
/// replaced by a block of `CAPACITY_MULTIPLIER * capacity` slots (one slot
/// when the capacity was zero). `resize` past the capacity allocates
/// `CAPACITY_MULTIPLIER * new_len` slots; `reserve` allocates exactly what
/// was asked for. Existing elements are moved into the new block and the
/// old block is released.
pub struct SimpleVector<T> {
    /// Owned storage; its capacity is the vector's capacity.
    data: ArrayPtr<T>,
    /// Number of live elements at the front of `data`.
    len: usize,
}

impl<T> SimpleVector<T> {
    /// Growth factor applied when the storage runs out of room.
    pub const CAPACITY_MULTIPLIER: usize = 2;

    /// Creates an empty vector without allocating.
    pub const fn new() -> SimpleVector<T> {
        SimpleVector {
            data: ArrayPtr::empty(),
            len: 0,
        }
    }

    /// Creates an empty vector with exactly `capacity` preallocated slots.
    pub fn with_capacity(capacity: usize) -> SimpleVector<T> {
        SimpleVector {
            data: ArrayPtr::new(capacity),
            len: 0,
        }
    }

    /// Fallible version of [`SimpleVector::with_capacity`].
    pub fn try_with_capacity(capacity: usize) -> Result<SimpleVector<T>> {
        Ok(SimpleVector {
            data: ArrayPtr::try_new(capacity)?,
            len: 0,
        })
    }

    /// Creates a vector of `len` default-valued elements, with capacity `len`.
    pub fn with_default(len: usize) -> SimpleVector<T>
    where
        T: Default,
    {
        let mut v = SimpleVector::with_capacity(len);
        v.resize_with(len, T::default);
        v
    }

    /// Creates a vector of `len` copies of `value`, with capacity `len`.
    pub fn from_value(len: usize, value: T) -> SimpleVector<T>
    where
        T: Clone,
    {
        let mut v = SimpleVector::with_capacity(len);
        v.resize_with(len, || value.clone());
        v
    }

    /// Returns the number of elements in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of slots the vector can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a raw pointer to the vector's buffer.
    ///
    /// The pointer is never null, but for a vector without storage it does not
    /// point to an allocation.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Returns a mutable raw pointer to the vector's buffer.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    /// Returns a slice containing the live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    /// Returns a mutable slice containing the live elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.data.as_mut_ptr(), self.len) }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T> {
        self.as_slice()
            .get(index)
            .ok_or(Error::out_of_range(index, self.len))
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::out_of_range(index, len))
    }

    /// Appends an element to the back of the vector.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow_for_one();
        }
        unsafe {
            self.data.slot(self.len).write(value);
        }
        self.len += 1;
    }

    /// Removes the last element and returns it, or `None` if the vector is empty.
    ///
    /// Popping an empty vector is a defined no-op.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(unsafe { self.data.slot(self.len).read() })
    }

    /// Inserts `value` at position `index`, shifting all elements after it
    /// one slot toward the back.
    ///
    /// Returns a reference to the inserted element.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        let len = self.len;
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );

        if len == self.capacity() {
            self.grow_for_one();
        }

        unsafe {
            let p = self.data.as_mut_ptr().add(index);
            if index < len {
                ptr::copy(p, p.add(1), len - index);
            }
            p.write(value);
            self.len = len + 1;
            &mut *p
        }
    }

    /// Removes and returns the element at `index`, shifting all elements
    /// after it one slot toward the front.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(
            index < len,
            "removal index (is {index}) should be < len (is {len})"
        );

        unsafe {
            let p = self.data.as_mut_ptr().add(index);
            let value = p.read();
            ptr::copy(p.add(1), p, len - index - 1);
            self.len = len - 1;
            value
        }
    }

    /// Drops the element at `index` and returns the position of the element
    /// that followed it (`len()` if the last element was erased).
    ///
    /// Erasing from an empty vector is a no-op that returns `0`.
    ///
    /// # Panics
    ///
    /// Panics if the vector is not empty and `index >= len`.
    pub fn erase(&mut self, index: usize) -> usize {
        if self.len == 0 {
            return 0;
        }
        drop(self.remove(index));
        index
    }

    /// Shortens the vector to `len` elements, dropping the rest.
    ///
    /// Has no effect if `len` is not less than the current length.
    /// Capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail_len = self.len - len;
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.data.as_mut_ptr().add(len), tail_len);
            self.len = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Drops all elements. Capacity and storage are retained.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes the vector to `new_len`, filling new slots with `T::default()`.
    ///
    /// Shrinking only drops the trailing elements. Growing past the capacity
    /// reallocates to `CAPACITY_MULTIPLIER * new_len` slots.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Resizes the vector to `new_len`, filling new slots with values returned
    /// by `f`.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }

        if new_len > self.capacity() {
            let new_capacity = new_len
                .checked_mul(Self::CAPACITY_MULTIPLIER)
                .unwrap_or_else(|| capacity_overflow(new_len));
            self.relocate(ArrayPtr::new(new_capacity));
        }

        // The length advances per element, so a panicking `f` leaves only
        // fully written elements behind.
        while self.len < new_len {
            unsafe {
                self.data.slot(self.len).write(f());
            }
            self.len += 1;
        }
    }

    /// Ensures the capacity is at least `new_capacity`.
    ///
    /// Reallocates to exactly `new_capacity` slots when it exceeds the current
    /// capacity; otherwise does nothing. The length is never changed.
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity > self.capacity() {
            self.relocate(ArrayPtr::new(new_capacity));
        }
    }

    /// Fallible version of [`SimpleVector::reserve`].
    ///
    /// On error the vector is left untouched.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity > self.capacity() {
            self.relocate(ArrayPtr::try_new(new_capacity)?);
        }
        Ok(())
    }

    /// Exchanges storage, length and capacity with `other` in constant time.
    ///
    /// This shadows the slice method `<[T]>::swap(a, b)`; to exchange two
    /// elements use `v.as_mut_slice().swap(a, b)`.
    #[inline]
    pub fn swap(&mut self, other: &mut SimpleVector<T>) {
        self.data.swap(&mut other.data);
        std::mem::swap(&mut self.len, &mut other.len);
    }

    /// Moves the contents out of `self`, leaving it with zero length and
    /// zero capacity.
    #[inline]
    pub fn take(&mut self) -> SimpleVector<T> {
        std::mem::take(self)
    }

    /// Move-assigns the elements of `source` into `self`.
    ///
    /// The current storage of `self` is reused when it can hold them (its
    /// length exceeds `source.len()`, or its capacity is at least
    /// `source.capacity()`); otherwise it is replaced by a block of exactly
    /// `source.capacity()` slots. The previous elements of `self` are dropped.
    /// `source` ends up empty but keeps its storage.
    pub fn assign_take(&mut self, source: &mut SimpleVector<T>) {
        let reuse = self.can_reuse_storage_for(source);
        self.clear();
        if !reuse {
            log::debug!(
                "SimpleVector move-assign: replacing storage of {} slots with {}",
                self.capacity(),
                source.capacity()
            );
            self.data = ArrayPtr::new(source.capacity());
        }

        unsafe {
            ptr::copy_nonoverlapping(source.data.as_ptr(), self.data.as_mut_ptr(), source.len);
        }
        self.len = std::mem::replace(&mut source.len, 0);
    }

    /// Appends clones of all elements of `other`.
    pub fn extend_from_slice(&mut self, other: &[T])
    where
        T: Clone,
    {
        for value in other {
            self.push_back(value.clone());
        }
    }
}

impl<T> SimpleVector<T> {
    fn can_reuse_storage_for(&self, source: &SimpleVector<T>) -> bool {
        self.len > source.len || self.capacity() >= source.capacity()
    }

    #[cold]
    fn grow_for_one(&mut self) {
        let new_capacity = self
            .capacity()
            .checked_mul(Self::CAPACITY_MULTIPLIER)
            .unwrap_or_else(|| capacity_overflow(self.capacity()))
            .max(1);
        self.relocate(ArrayPtr::new(new_capacity));
    }

    /// Moves the live elements into `storage`, which becomes the vector's
    /// buffer. The previous buffer is released.
    fn relocate(&mut self, mut storage: ArrayPtr<T>) {
        debug_assert!(storage.capacity() >= self.len);
        log::trace!(
            "SimpleVector reallocation: {} -> {} slots, {} elements moved",
            self.capacity(),
            storage.capacity(),
            self.len
        );
        unsafe {
            ptr::copy_nonoverlapping(self.data.as_ptr(), storage.as_mut_ptr(), self.len);
        }
        self.data.swap(&mut storage);
    }
}

impl<T> Drop for SimpleVector<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(self.as_mut_slice());
        }
    }
}

impl<T> Default for SimpleVector<T> {
    fn default() -> Self {
        SimpleVector::new()
    }
}

impl<T: Clone> Clone for SimpleVector<T> {
    fn clone(&self) -> SimpleVector<T> {
        let mut v = SimpleVector::with_capacity(self.capacity());
        v.extend_from_slice(self.as_slice());
        v
    }

    fn clone_from(&mut self, source: &Self) {
        if self.can_reuse_storage_for(source) {
            self.truncate(source.len);
            let (init, tail) = source.split_at(self.len);
            self.as_mut_slice().clone_from_slice(init);
            self.extend_from_slice(tail);
        } else {
            log::debug!(
                "SimpleVector copy-assign: replacing storage of {} slots with {}",
                self.capacity(),
                source.capacity()
            );
            let mut v = SimpleVector::with_capacity(source.capacity());
            v.extend_from_slice(source.as_slice());
            *self = v;
        }
    }
}

impl<T> Deref for SimpleVector<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for SimpleVector<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for SimpleVector<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for SimpleVector<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T> AsRef<[T]> for SimpleVector<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for SimpleVector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for SimpleVector<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for SimpleVector<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for SimpleVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleVector")
            .field("values", &self.as_slice())
            .field("len", &self.len)
            .field("cap", &self.capacity())
            .finish()
    }
}

impl<T: PartialEq> PartialEq for SimpleVector<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for SimpleVector<T> {}

impl<T: PartialEq> PartialEq<[T]> for SimpleVector<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for SimpleVector<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

/// Lexicographic comparison that only asks the elements `<`. Two elements
/// where neither is less than the other count as equivalent, so incomparable
/// pairs (NaN) do not stop the scan.
fn lexicographic_less<T: PartialOrd>(lhs: &[T], rhs: &[T]) -> bool {
    for (a, b) in lhs.iter().zip(rhs) {
        if a < b {
            return true;
        }
        if b < a {
            return false;
        }
    }
    lhs.len() < rhs.len()
}

impl<T: PartialOrd> PartialOrd for SimpleVector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.lt(other) {
            Some(Ordering::Less)
        } else if other.lt(self) {
            Some(Ordering::Greater)
        } else if self == other {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    fn lt(&self, other: &Self) -> bool {
        lexicographic_less(self.as_slice(), other.as_slice())
    }

    fn le(&self, other: &Self) -> bool {
        self == other || self.lt(other)
    }

    fn gt(&self, other: &Self) -> bool {
        !self.le(other)
    }

    fn ge(&self, other: &Self) -> bool {
        !self.lt(other)
    }
}

impl<T: Ord> Ord for SimpleVector<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for SimpleVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T> From<ReserveProxy> for SimpleVector<T> {
    fn from(proxy: ReserveProxy) -> Self {
        SimpleVector::with_capacity(proxy.capacity())
    }
}

impl<T, const N: usize> From<[T; N]> for SimpleVector<T> {
    fn from(values: [T; N]) -> Self {
        let mut v = SimpleVector::with_capacity(N);
        v.extend(values);
        v
    }
}

impl<T: Clone> From<&[T]> for SimpleVector<T> {
    fn from(values: &[T]) -> Self {
        let mut v = SimpleVector::with_capacity(values.len());
        v.extend_from_slice(values);
        v
    }
}

impl<T> From<Vec<T>> for SimpleVector<T> {
    fn from(values: Vec<T>) -> Self {
        let mut v = SimpleVector::with_capacity(values.len());
        v.extend(values);
        v
    }
}

impl<T> FromIterator<T> for SimpleVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut v = SimpleVector::with_capacity(iter.size_hint().0);
        v.extend(iter);
        v
    }
}

impl<T> Extend<T> for SimpleVector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for SimpleVector<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.push_back(value);
        }
    }
}

impl<T> IntoIterator for SimpleVector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let len = std::mem::replace(&mut self.len, 0);
        IntoIter::new(self.data.take(), len)
    }
}

impl<'a, T> IntoIterator for &'a SimpleVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SimpleVector<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
