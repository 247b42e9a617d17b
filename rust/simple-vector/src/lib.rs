//! A growable, contiguous array with an explicit capacity policy.
//!
//! [`SimpleVector`] keeps its elements in a single heap block owned by an
//! [`ArrayPtr`]. Capacity doubles when an append runs out of room, storage is
//! reused whenever possible on assignment, and shrinking never gives memory
//! back.
//!
//! ```
//! use simple_vector::simple_vec;
//!
//! let mut v = simple_vec![1, 2, 3];
//! assert_eq!(v.capacity(), 3);
//!
//! v.push_back(4);
//! assert_eq!(v.capacity(), 6);
//!
//! v.insert(0, 0);
//! assert_eq!(v.erase(2), 2);
//! assert_eq!(v, [0, 1, 3, 4]);
//!
//! assert!(v.at(10).is_err());
//! ```

pub mod array_ptr;
pub mod error;
pub mod into_iter;
pub mod vector;

pub use array_ptr::ArrayPtr;
pub use error::{Error, Result};
pub use into_iter::IntoIter;
pub use vector::{ReserveProxy, SimpleVector, reserve};

/// Creates a [`SimpleVector`] whose capacity equals its length.
///
/// - `simple_vec![a, b, c]` holds the listed elements in order.
/// - `simple_vec![value; n]` holds `n` clones of `value`.
#[macro_export]
macro_rules! simple_vec {
    () => {
        $crate::SimpleVector::new()
    };
    ($value:expr; $n:expr) => {
        $crate::SimpleVector::from_value($n, $value)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::SimpleVector::from([$($x),+])
    };
}
