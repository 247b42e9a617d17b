//! By-value iteration over a `SimpleVector`.

use std::iter::FusedIterator;

use crate::array_ptr::ArrayPtr;

/// An iterator that moves elements out of a `SimpleVector`.
///
/// Takes over the vector's storage. Elements not consumed by the time the
/// iterator is dropped are dropped with it.
pub struct IntoIter<T> {
    buf: ArrayPtr<T>,
    /// Index of the next element yielded from the front.
    start: usize,
    /// One past the index of the next element yielded from the back.
    end: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(buf: ArrayPtr<T>, len: usize) -> IntoIter<T> {
        debug_assert!(len <= buf.capacity());
        IntoIter {
            buf,
            start: 0,
            end: len,
        }
    }

    /// Returns the remaining elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            std::slice::from_raw_parts(self.buf.as_ptr().add(self.start), self.end - self.start)
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let value = unsafe { self.buf.slot(self.start).read() };
        self.start += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        Some(unsafe { self.buf.slot(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        unsafe {
            let rest = std::ptr::slice_from_raw_parts_mut(
                self.buf.as_mut_ptr().add(self.start),
                remaining,
            );
            self.start = self.end;
            std::ptr::drop_in_place(rest);
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{SimpleVector, simple_vec};

    #[test]
    fn test_into_iter_by_value() {
        let v: SimpleVector<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        let collected: Vec<String> = v.into_iter().collect();
        assert_eq!(collected, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_into_iter_both_ends() {
        let mut it = simple_vec![1, 2, 3, 4].into_iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next_back(), Some(4));
        assert_eq!(it.as_slice(), &[2, 3]);
        assert_eq!(it.next_back(), Some(3));
        assert_eq!(it.next(), Some(2));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn test_into_iter_empty() {
        let mut it = SimpleVector::<i32>::new().into_iter();
        assert_eq!(it.size_hint(), (0, Some(0)));
        assert_eq!(it.next(), None);
    }
}
