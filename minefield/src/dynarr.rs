//! A growable array with an explicit capacity policy.
//!
//! [`DynArr`] keeps its own backing slice rather than leaning on `Vec`'s growth strategy
//! so that its capacity is fully determined by the sequence of operations applied to it:
//! capacity doubles whenever an insertion would overflow and halves (never below
//! [`MIN_CAPACITY`]) once a removal leaves the array at most a third full.
use std::{
    fmt,
    ops::{Index, IndexMut},
};

pub use self::errors::DynArrError;

mod errors;

/// Smallest capacity a [`DynArr`] will ever have. Also the capacity of a new array.
pub const MIN_CAPACITY: usize = 2;

/// Resizable, index-addressable sequence with amortized O(1) append.
#[derive(Clone)]
pub struct DynArr<T> {
    /// Backing store. Every slot in `[0, size)` is `Some`, every slot after it is `None`.
    storage: Box<[Option<T>]>,

    /// Number of elements currently stored.
    size: usize,
}

impl<T> DynArr<T> {
    /// Construct an empty array with the minimum capacity.
    pub fn new() -> Self {
        Self {
            storage: empty_storage(MIN_CAPACITY),
            size: 0,
        }
    }

    /// Construct an empty array with the given capacity. Fails if `capacity` is below
    /// [`MIN_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Result<Self, DynArrError> {
        if capacity < MIN_CAPACITY {
            return Err(DynArrError::CapacityTooSmall {
                requested: capacity,
                min: MIN_CAPACITY,
            });
        }
        Ok(Self {
            storage: empty_storage(capacity),
            size: 0,
        })
    }

    /// Number of elements in the array.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Alias of [`size`][DynArr::size] matching the std naming.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of elements the array can hold before it has to grow.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Get a reference to the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T, DynArrError> {
        self.check_index(index)?;
        Ok(self.slot(index))
    }

    /// Get a mutable reference to the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, DynArrError> {
        self.check_index(index)?;
        Ok(self.slot_mut(index))
    }

    /// Replace the element at `index`, returning the element that was there. Never
    /// changes the size of the array.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, DynArrError> {
        self.check_index(index)?;
        Ok(std::mem::replace(self.slot_mut(index), value))
    }

    /// Append an element to the end of the array, doubling capacity if it is full.
    pub fn add(&mut self, value: T) {
        self.grow_if_full();
        self.storage[self.size] = Some(value);
        self.size += 1;
    }

    /// Insert an element at `index`, shifting everything after it one slot to the right.
    /// `index == size` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), DynArrError> {
        if index > self.size {
            return Err(DynArrError::out_of_bounds(index, self.size));
        }
        self.grow_if_full();
        // Slot `size` is free, so rotating it to the front opens a gap at `index`.
        self.storage[index..=self.size].rotate_right(1);
        self.storage[index] = Some(value);
        self.size += 1;
        Ok(())
    }

    /// Remove and return the element at `index`, shifting everything after it one slot to
    /// the left. Halves the capacity if the array is left at most a third full.
    pub fn remove(&mut self, index: usize) -> Result<T, DynArrError> {
        self.check_index(index)?;
        let removed = self.storage[index].take();
        self.storage[index..self.size].rotate_left(1);
        self.size -= 1;
        if self.size * 3 <= self.capacity() {
            let halved = (self.capacity() / 2).max(MIN_CAPACITY);
            if halved != self.capacity() {
                self.set_capacity(halved);
            }
        }
        Ok(removed.expect("occupied slot was empty"))
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.storage[..self.size].iter().flatten()
    }

    /// Mutably iterate over the elements in order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.storage[..self.size].iter_mut().flatten()
    }

    fn check_index(&self, index: usize) -> Result<(), DynArrError> {
        if index < self.size {
            Ok(())
        } else {
            Err(DynArrError::out_of_bounds(index, self.size))
        }
    }

    /// Unchecked slot access. Caller must have validated `index < size`.
    fn slot(&self, index: usize) -> &T {
        self.storage[index]
            .as_ref()
            .expect("occupied slot was empty")
    }

    /// Unchecked mutable slot access. Caller must have validated `index < size`.
    fn slot_mut(&mut self, index: usize) -> &mut T {
        self.storage[index]
            .as_mut()
            .expect("occupied slot was empty")
    }

    fn grow_if_full(&mut self) {
        if self.size == self.capacity() {
            self.set_capacity(self.capacity() * 2);
        }
    }

    /// Move the elements into a fresh backing store of exactly `capacity` slots.
    fn set_capacity(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.size && capacity >= MIN_CAPACITY);
        let mut storage = empty_storage(capacity);
        for (dst, src) in storage.iter_mut().zip(self.storage[..self.size].iter_mut()) {
            *dst = src.take();
        }
        self.storage = storage;
    }
}

fn empty_storage<T>(capacity: usize) -> Box<[Option<T>]> {
    (0..capacity).map(|_| None).collect()
}

impl<T> Default for DynArr<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for DynArr<T> {
    /// Arrays are equal when they hold equal elements in the same order. Capacity is not
    /// compared.
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DynArr<T> {}

impl<T> Index<usize> for DynArr<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<usize> for DynArr<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let size = self.size;
        match self.get_mut(index) {
            Ok(v) => v,
            Err(_) => panic!("{}", DynArrError::out_of_bounds(index, size)),
        }
    }
}

impl<T> Extend<T> for DynArr<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T> std::iter::FromIterator<T> for DynArr<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = DynArr::new();
        arr.extend(iter);
        arr
    }
}

impl<T: fmt::Display> fmt::Display for DynArr<T> {
    /// Formats as `[a, b, c]`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(value, f)?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArr<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DynArr")
            .field("size", &self.size)
            .field("capacity", &self.capacity())
            .field("items", &DebugItems(self))
            .finish()
    }
}

struct DebugItems<'a, T>(&'a DynArr<T>);

impl<T: fmt::Debug> fmt::Debug for DebugItems<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
