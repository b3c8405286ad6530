//! Growable sequences whose views alias a shared backing store.
//!
//! A [`Sequence`] is a small header `(store, offset, len, cap)` over a
//! reference-counted allocation. Cloning the header or taking a sub-view
//! produces another view of the same allocation: writes through one view are
//! visible through every other view covering the same slots. An append that
//! fits in the remaining capacity writes in place; one that does not
//! reallocates, and the returned sequence no longer aliases anything.
//!
//! ```
//! use minirt_foundation::Sequence;
//!
//! let s: Sequence<i32> = Sequence::from_literal([1, 2, 3, 4, 5, 6]);
//! let v = s.subview(1, 3).unwrap();
//! assert_eq!((v.len(), v.cap()), (2, 5));
//!
//! // In-place: the view's capacity reaches the parent's bound.
//! let _v = v.append([9]);
//! assert_eq!(s.get(3), Some(9));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::{Error, ErrorContext};
use crate::growth::GrowthPolicy;

type Store<T> = Rc<RefCell<Vec<T>>>;

/// A view over a shared, growable backing store.
///
/// `T::default()` plays the role of the element zero value: fresh
/// allocations are filled with it. The store is not synchronized, so
/// sequences are neither `Send` nor `Sync`.
pub struct Sequence<T> {
    /// `None` for the nil sequence.
    store: Option<Store<T>>,
    offset: usize,
    len: usize,
    cap: usize,
}

impl<T> Sequence<T> {
    /// Creates the nil (uninitialized) sequence.
    #[must_use]
    pub const fn nil() -> Self {
        Self {
            store: None,
            offset: 0,
            len: 0,
            cap: 0,
        }
    }

    /// Returns the number of visible elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of slots usable from this view's offset.
    #[must_use]
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Returns true if no elements are visible.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if this sequence has no backing store at all.
    ///
    /// An empty-initialized sequence (`from_literal([])`) is not nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        self.store.is_none()
    }

    /// Returns true if both sequences view the same allocation.
    #[must_use]
    pub fn shares_store_with(&self, other: &Self) -> bool {
        match (&self.store, &other.store) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T: Clone + Default> Sequence<T> {
    /// Creates a sequence whose store holds exactly `values`.
    ///
    /// Length and capacity both equal the number of values. The result is
    /// never nil, even when `values` is empty.
    pub fn from_literal(values: impl IntoIterator<Item = T>) -> Self {
        let buf: Vec<T> = values.into_iter().collect();
        let len = buf.len();
        Self {
            store: Some(Rc::new(RefCell::new(buf))),
            offset: 0,
            len,
            cap: len,
        }
    }

    /// Allocates `cap` zero-valued slots, of which the first `len` are visible.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if `len > cap`.
    pub fn with_len_cap(len: usize, cap: usize) -> crate::Result<Self> {
        if len > cap {
            return Err(Error::invalid_argument(format!(
                "len {len} exceeds cap {cap}"
            ))
            .with_context(ErrorContext::new().with_operation("with_len_cap")));
        }
        Ok(Self::allocate(len, cap))
    }

    /// Allocates `len` zero-valued slots, all visible.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self::allocate(len, len)
    }

    fn allocate(len: usize, cap: usize) -> Self {
        let buf: Vec<T> = std::iter::repeat_with(T::default).take(cap).collect();
        Self {
            store: Some(Rc::new(RefCell::new(buf))),
            offset: 0,
            len,
            cap,
        }
    }

    /// Returns a clone of the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let store = self.store.as_ref()?;
        let value = store.borrow()[self.offset + index].clone();
        Some(value)
    }

    /// Writes `value` at `index` in the shared store.
    ///
    /// Every sequence currently viewing that slot observes the write.
    ///
    /// # Errors
    ///
    /// Returns an index error if `index >= len`.
    pub fn set(&self, index: usize, value: T) -> crate::Result<()> {
        let store = match &self.store {
            Some(store) if index < self.len => store,
            _ => {
                return Err(Error::index_out_of_range(index, self.len)
                    .with_context(ErrorContext::new().with_operation("set")));
            }
        };
        store.borrow_mut()[self.offset + index] = value;
        Ok(())
    }

    /// Appends `values` using the default [`GrowthPolicy`].
    #[must_use]
    pub fn append(&self, values: impl IntoIterator<Item = T>) -> Self {
        self.append_with(&GrowthPolicy::default(), values)
    }

    /// Appends `values`, reallocating according to `policy` if needed.
    ///
    /// If the new length fits in [`cap`](Self::cap) the values are written in
    /// place and the result shares this sequence's store, so any alias
    /// covering those slots sees them. Otherwise a new store is allocated and
    /// the result is detached from every existing view.
    #[must_use]
    pub fn append_with(&self, policy: &GrowthPolicy, values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        if values.is_empty() {
            return self.clone();
        }

        let n = self.len;
        let required = n + values.len();

        if required <= self.cap {
            if let Some(store) = &self.store {
                {
                    let mut buf = store.borrow_mut();
                    let start = self.offset + n;
                    for (slot, value) in buf[start..start + values.len()].iter_mut().zip(values) {
                        *slot = value;
                    }
                }
                trace!(len = required, cap = self.cap, "append in place");
                return Self {
                    store: Some(Rc::clone(store)),
                    offset: self.offset,
                    len: required,
                    cap: self.cap,
                };
            }
        }

        let new_cap = policy.next_capacity(self.cap, required);
        let mut buf = Vec::with_capacity(new_cap);
        if let Some(store) = &self.store {
            buf.extend_from_slice(&store.borrow()[self.offset..self.offset + n]);
        }
        buf.extend(values);
        buf.resize_with(new_cap, T::default);
        debug!(
            old_cap = self.cap,
            new_cap,
            len = required,
            "sequence store reallocated"
        );

        Self {
            store: Some(Rc::new(RefCell::new(buf))),
            offset: 0,
            len: required,
            cap: new_cap,
        }
    }

    /// Appends the visible elements of `other`.
    ///
    /// `other` is read before anything is written, so `s.extend_from(&s)`
    /// is well defined.
    #[must_use]
    pub fn extend_from(&self, other: &Self) -> Self {
        self.append(other.to_vec())
    }

    /// Returns a view of elements `[start, end)` sharing this store.
    ///
    /// The view's capacity runs to this sequence's capacity bound, not to
    /// `end`, so in-place appends on the view overwrite the parent's elements
    /// after `end`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsOutOfRange`](crate::ErrorKind::BoundsOutOfRange)
    /// unless `start <= end <= len`. This is a separate kind from
    /// [`IndexOutOfRange`](crate::ErrorKind::IndexOutOfRange);
    /// [`Error::is_index_out_of_range`] accepts both.
    pub fn subview(&self, start: usize, end: usize) -> crate::Result<Self> {
        self.subview_capped(start, end, self.cap)
    }

    /// Returns a view of `[start, end)` whose capacity stops at `max`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsOutOfRange`](crate::ErrorKind::BoundsOutOfRange)
    /// unless `start <= end <= len` and `end <= max <= cap`.
    pub fn subview_capped(&self, start: usize, end: usize, max: usize) -> crate::Result<Self> {
        if start > end || end > self.len {
            return Err(Error::bounds_out_of_range(start, end, self.len)
                .with_context(ErrorContext::new().with_operation("subview")));
        }
        if max < end || max > self.cap {
            return Err(Error::bounds_out_of_range(start, max, self.cap)
                .with_context(ErrorContext::new().with_operation("subview_capped")));
        }

        trace!(start, end, max, "subview");
        Ok(Self {
            store: self.store.clone(),
            offset: self.offset + start,
            len: end - start,
            cap: max - start,
        })
    }

    /// Copies `min(self.len(), src.len())` elements from `src` into this
    /// sequence's existing slots and returns the count.
    ///
    /// No growth happens and no aliasing is created. Overlapping views of
    /// one store copy as if through a temporary buffer.
    pub fn copy_from(&self, src: &Self) -> usize {
        let count = self.len.min(src.len);
        let (Some(dst_store), Some(src_store)) = (&self.store, &src.store) else {
            return 0;
        };
        if count == 0 {
            return 0;
        }

        let snapshot = src_store.borrow()[src.offset..src.offset + count].to_vec();
        dst_store.borrow_mut()[self.offset..self.offset + count].clone_from_slice(&snapshot);
        count
    }

    /// Returns the visible elements as a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        match &self.store {
            Some(store) => store.borrow()[self.offset..self.offset + self.len].to_vec(),
            None => Vec::new(),
        }
    }

    /// Returns an iterator over clones of the visible elements.
    ///
    /// Each element is read when the iterator reaches it.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { seq: self, pos: 0 }
    }
}

/// Copies `min(dst.len(), src.len())` elements from `src` into `dst`.
///
/// Returns the number of elements copied.
pub fn copy_into<T: Clone + Default>(dst: &Sequence<T>, src: &Sequence<T>) -> usize {
    dst.copy_from(src)
}

/// Iterator over the elements of a [`Sequence`].
pub struct Iter<'a, T> {
    seq: &'a Sequence<T>,
    pos: usize,
}

impl<T: Clone + Default> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let value = self.seq.get(self.pos)?;
        self.pos += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.seq.len.saturating_sub(self.pos);
        (remaining, Some(remaining))
    }
}

impl<T: Clone + Default> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            offset: self.offset,
            len: self.len,
            cap: self.cap,
        }
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::nil()
    }
}

impl<T: Clone + Default + fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + Default> From<Vec<T>> for Sequence<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_literal(values)
    }
}

impl<T: Clone + Default> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_literal(iter)
    }
}

impl<'a, T: Clone + Default> IntoIterator for &'a Sequence<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<T: Clone + Default + serde::Serialize> serde::Serialize for Sequence<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_nil() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(&self.to_vec())
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Clone + Default + serde::Deserialize<'de>> serde::Deserialize<'de> for Sequence<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = <Option<Vec<T>> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(values.map_or_else(Self::nil, Self::from_literal))
    }
}
