//! Growable arena storage for edge records, vertex attributes and triangles.
//!
//! An [`Arena`] keeps an explicit capacity next to its element count. When an
//! append would run past the capacity, the capacity doubles and the existing
//! contents are carried over before the append goes through. Capacity never
//! shrinks, and a failed reservation surfaces as
//! [`ManifoldError::AllocationFailed`] instead of aborting the process.

use core::fmt::{self, Debug};

use crate::manifold_error::ManifoldError;

/// Doubling, zero-filled storage for plain `Copy` records.
///
/// The backing `Vec` is always exactly `capacity` long; slots past `len` hold
/// `T::default()` and are never exposed.
#[derive(Clone)]
pub struct Arena<T> {
    buf: Vec<T>,
    len: usize,
    label: &'static str,
}

impl<T> Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("label", &self.label)
            .field("len", &self.len)
            .field("capacity", &self.buf.len())
            .finish()
    }
}

impl<T: Copy + Default> Arena<T> {
    /// Create an arena with room for `capacity` elements (at least one).
    pub fn with_capacity(label: &'static str, capacity: usize) -> Result<Self, ManifoldError> {
        let capacity = capacity.max(1);
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| ManifoldError::AllocationFailed {
                what: label,
                requested: capacity,
            })?;
        buf.resize(capacity, T::default());
        Ok(Self { buf, len: 0, label })
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when no element is live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current capacity in elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Double the capacity until `additional` more elements fit.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ManifoldError> {
        let needed = self
            .len
            .checked_add(additional)
            .ok_or(ManifoldError::AllocationFailed {
                what: self.label,
                requested: usize::MAX,
            })?;
        if needed <= self.buf.len() {
            return Ok(());
        }
        let mut new_cap = self.buf.len();
        while new_cap < needed {
            new_cap = new_cap
                .checked_mul(2)
                .ok_or(ManifoldError::AllocationFailed {
                    what: self.label,
                    requested: usize::MAX,
                })?;
        }
        self.buf
            .try_reserve_exact(new_cap - self.buf.len())
            .map_err(|_| ManifoldError::AllocationFailed {
                what: self.label,
                requested: new_cap,
            })?;
        log::trace!("arena {}: grow {} -> {}", self.label, self.buf.len(), new_cap);
        self.buf.resize(new_cap, T::default());
        Ok(())
    }

    /// Append one element and return its index.
    pub fn push(&mut self, value: T) -> Result<usize, ManifoldError> {
        self.reserve(1)?;
        let idx = self.len;
        self.buf[idx] = value;
        self.len += 1;
        Ok(idx)
    }

    /// Append every element of `src` and return the index of the first one.
    pub fn extend_from_slice(&mut self, src: &[T]) -> Result<usize, ManifoldError> {
        self.reserve(src.len())?;
        let start = self.len;
        self.buf[start..start + src.len()].copy_from_slice(src);
        self.len += src.len();
        Ok(start)
    }

    /// Drop every element past `len`; capacity is kept.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.buf[len..self.len].fill(T::default());
            self.len = len;
        }
    }

    /// Forget all elements; capacity is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Overwrite every live element with `value`.
    pub fn fill(&mut self, value: T) {
        self.buf[..self.len].fill(value);
    }

    /// Live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buf[..self.len]
    }

    /// Live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf[..self.len]
    }
}

impl<T> core::ops::Index<usize> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: usize) -> &T {
        &self.buf[..self.len][idx]
    }
}

impl<T> core::ops::IndexMut<usize> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.buf[..self.len][idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_doubles_capacity() {
        let mut a = Arena::<u32>::with_capacity("test", 2).unwrap();
        assert_eq!(a.capacity(), 2);
        a.push(1).unwrap();
        a.push(2).unwrap();
        assert_eq!(a.capacity(), 2);
        a.push(3).unwrap();
        assert_eq!(a.capacity(), 4);
        assert_eq!(a.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn extend_grows_in_one_step_past_several_doublings() {
        let mut a = Arena::<u8>::with_capacity("test", 1).unwrap();
        let idx = a.extend_from_slice(&[7; 9]).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(a.len(), 9);
        assert_eq!(a.capacity(), 16);
    }

    #[test]
    fn zero_capacity_is_rounded_up() {
        let a = Arena::<u8>::with_capacity("test", 0).unwrap();
        assert_eq!(a.capacity(), 1);
        assert!(a.is_empty());
    }

    #[test]
    fn truncate_and_clear_keep_capacity() {
        let mut a = Arena::<u16>::with_capacity("test", 4).unwrap();
        a.extend_from_slice(&[1, 2, 3, 4, 5]).unwrap();
        let cap = a.capacity();
        a.truncate(2);
        assert_eq!(a.as_slice(), &[1, 2]);
        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.capacity(), cap);
        // re-pushed slots start from the default again
        a.push(9).unwrap();
        assert_eq!(a.as_slice(), &[9]);
    }

    #[test]
    fn index_past_len_panics() {
        let mut a = Arena::<i32>::with_capacity("test", 8).unwrap();
        a.push(1).unwrap();
        assert_eq!(a.as_slice().len(), 1);
        let r = std::panic::catch_unwind(move || a[1]);
        assert!(r.is_err());
    }
}
