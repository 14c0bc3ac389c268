//! Persistent indexed sequence backed by a B-ary tree of shared nodes.
//!
//! # Overview
//!
//! [`TreeVector`] stores its elements in contiguous leaf buffers of up to
//! `B` values hanging off a tree of branch nodes. Every update returns a new
//! vector that shares all untouched subtrees with its source: an operation
//! at the back duplicates only the `O(height)` nodes on the path it
//! modifies, never the whole structure.
//!
//! - O(log_B N) random access
//! - O(log_B N) `push_back` / `pop_back` / `set_at` / `erase`
//! - O(1) `len`, `is_empty` and `clone`
//!
//! A published vector value is never mutated, so it can be read from any
//! number of threads without synchronization.
//!
//! # Internal Structure
//!
//! A non-empty vector of height `H` addresses up to `B^H` elements. At
//! height 1 the root is a single leaf; at height `H ≥ 2` the root is a
//! branch and every branch carries exactly `B` children, with the slots past
//! the populated region pointing at shared empty spines. Leaves fill left to
//! right and all of them except the rightmost populated one (the *active*
//! leaf) are full. The vector keeps the path to the active leaf so the
//! common append/pop case needs no search.
//!
//! # Examples
//!
//! ```rust
//! use treevec::TreeVector;
//!
//! let vector: TreeVector<i32> = TreeVector::new()
//!     .push_back(1)
//!     .push_back(2)
//!     .push_back(3);
//!
//! assert_eq!(vector.get(1), Some(&2));
//!
//! // Structural sharing: the original vector is preserved
//! let extended = vector.push_back(4);
//! assert_eq!(vector.len(), 3);
//! assert_eq!(extended.len(), 4);
//! ```

use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;
use std::sync::Arc;

use crate::error::TreeVectorError;
use crate::iter::{TreeVectorIntoIterator, TreeVectorIterator};
use crate::node::{Node, NodeRef, build_from_leaves, copy_path, empty_spine, leaf_at};
use crate::path::{
    LeafPath, coordinate, height_for_len, last_leaf_path, next_leaf_path, previous_leaf_path,
    subtree_capacity, zero_path,
};

// =============================================================================
// TreeVector Definition
// =============================================================================

/// A persistent (immutable) vector backed by a B-ary tree with contiguous
/// leaf buffers.
///
/// All operations are non-mutating: updates return a new `TreeVector` that
/// shares unchanged subtrees with its source. `B` is the branching factor
/// (the fan-out of every branch and the size of every leaf buffer) and must
/// be a power of two of at least 2.
///
/// # Time Complexity
///
/// | Operation    | Complexity            |
/// |--------------|-----------------------|
/// | `new`        | O(1)                  |
/// | `get`        | O(log_B N)            |
/// | `push_back`  | O(log_B N)            |
/// | `pop_back`   | O(log_B N)            |
/// | `set_at`     | O(log_B N)            |
/// | `erase`      | O(log_B N)            |
/// | `for_each`   | O(N)                  |
/// | `len`        | O(1)                  |
/// | `clone`      | O(1)                  |
///
/// # Element ordering caveat
///
/// [`erase`](TreeVector::erase) removes by overwriting the victim with the
/// last element and popping (swap-with-last), so it does **not** preserve
/// element order. Positional [`insert`](TreeVector::insert) is consequently
/// not provided.
///
/// # Examples
///
/// ```rust
/// use treevec::TreeVector;
///
/// let vector: TreeVector<i32> = (0..100).collect();
/// assert_eq!(vector.len(), 100);
/// assert_eq!(vector[50], 50);
/// ```
pub struct TreeVector<T, const B: usize = 32> {
    /// Node levels on the root-to-element path, leaves included. 0 iff empty.
    height: usize,
    /// Root handle; `None` iff the vector is empty. A height-1 root is a
    /// leaf, taller roots are branches.
    root: Option<NodeRef<T, B>>,
    /// Element count.
    length: usize,
    /// Path to the leaf holding element `length - 1`; empty at height <= 1.
    active_path: LeafPath,
}

impl<T, const B: usize> TreeVector<T, B> {
    /// Creates a new empty vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treevec::TreeVector;
    ///
    /// let vector: TreeVector<i32> = TreeVector::new();
    /// assert!(vector.is_empty());
    /// assert_eq!(vector.height(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::assert_branching_factor();
        TreeVector {
            height: 0,
            root: None,
            length: 0,
            active_path: LeafPath::new(),
        }
    }

    /// Creates a vector containing a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treevec::TreeVector;
    ///
    /// let vector = TreeVector::<_>::singleton(42);
    /// assert_eq!(vector.len(), 1);
    /// assert_eq!(vector.height(), 1);
    /// ```
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::assert_branching_factor();
        let mut buffer = Vec::with_capacity(B);
        buffer.push(element);
        TreeVector {
            height: 1,
            root: Some(Arc::new(Node::Leaf(buffer))),
            length: 1,
            active_path: LeafPath::new(),
        }
    }

    /// Creates a vector of `length` default-initialized elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treevec::TreeVector;
    ///
    /// let vector: TreeVector<i32> = TreeVector::with_len(100);
    /// assert_eq!(vector.len(), 100);
    /// assert_eq!(vector[99], 0);
    /// ```
    #[must_use]
    pub fn with_len(length: usize) -> Self
    where
        T: Default,
    {
        Self::from_vec((0..length).map(|_| T::default()).collect())
    }

    /// Compile-time validation of the branching factor, evaluated whenever
    /// a vector is constructed for a concrete `B`.
    fn assert_branching_factor() {
        const {
            assert!(
                B >= 2 && B.is_power_of_two(),
                "branching factor must be a power of two of at least 2"
            );
        }
    }

    /// Builds the canonical tree for the given elements: minimal height,
    /// leaves packed left to right, active path at the last element.
    fn from_vec(values: Vec<T>) -> Self {
        Self::assert_branching_factor();
        let length = values.len();
        if length == 0 {
            return Self::new();
        }
        let height = height_for_len::<B>(length);
        let mut leaves = Vec::with_capacity(length.div_ceil(B));
        let mut values = values.into_iter();
        loop {
            let mut buffer = Vec::with_capacity(B);
            buffer.extend(values.by_ref().take(B));
            if buffer.is_empty() {
                break;
            }
            leaves.push(Arc::new(Node::Leaf(buffer)));
        }
        let (active_path, _) = coordinate::<B>(height, length - 1);
        TreeVector {
            height,
            root: Some(build_from_leaves(leaves, height)),
            length,
            active_path,
        }
    }

    /// Returns the number of elements in the vector.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the tree height: the number of node levels on the path from
    /// the root to an element, leaves included.
    ///
    /// An empty vector has height 0; the first append establishes height 1.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of elements the current tree can address before
    /// it has to grow: `B^height`, or 0 for an empty vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treevec::TreeVector;
    ///
    /// let vector: TreeVector<i32> = (0..33).collect();
    /// assert_eq!(vector.height(), 2);
    /// assert_eq!(vector.capacity(), 1024);
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        if self.height == 0 {
            0
        } else {
            subtree_capacity::<B>(self.height)
        }
    }

    /// Returns a reference to the element at `index`, or `None` if the
    /// index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treevec::TreeVector;
    ///
    /// let vector: TreeVector<i32> = (0..5).collect();
    /// assert_eq!(vector.get(4), Some(&4));
    /// assert_eq!(vector.get(5), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.length {
            return None;
        }
        let mut node = self.root.as_deref()?;
        let mut remaining = index;
        for level in (1..self.height).rev() {
            let span = subtree_capacity::<B>(level);
            node = node.child(remaining / span);
            remaining %= span;
        }
        node.leaf().get(remaining)
    }

    /// Returns a reference to the element at `index`, or an
    /// [`OutOfBounds`](TreeVectorError::OutOfBounds) error.
    pub fn at(&self, index: usize) -> Result<&T, TreeVectorError> {
        self.get(index).ok_or(TreeVectorError::OutOfBounds {
            index,
            length: self.length,
        })
    }

    /// Returns a reference to the first element, or `None` if empty.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a reference to the last element, or `None` if empty.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        let root = self.root.as_ref()?;
        leaf_at(root, &self.active_path).last()
    }

    /// Returns a reference to the last element, or an
    /// [`Empty`](TreeVectorError::Empty) error.
    pub fn back(&self) -> Result<&T, TreeVectorError> {
        self.last()
            .ok_or(TreeVectorError::Empty { operation: "back" })
    }

    /// Returns an iterator over references to the elements, front to back.
    ///
    /// The iterator caches the leaf it is walking, so stepping costs O(1)
    /// and only crossing into the next leaf touches the tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treevec::TreeVector;
    ///
    /// let vector: TreeVector<i32> = (1..=5).collect();
    /// let collected: Vec<&i32> = vector.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3, &4, &5]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> TreeVectorIterator<'_, T, B> {
        TreeVectorIterator::new(self)
    }

    /// The leaf buffer a path points at; empty slice on an empty vector.
    pub(crate) fn leaf_slice(&self, path: &[usize]) -> &[T] {
        match &self.root {
            Some(root) => leaf_at(root, path),
            None => &[],
        }
    }

    /// Path of the leaf holding the last element.
    pub(crate) fn active_leaf_path(&self) -> &LeafPath {
        &self.active_path
    }
}

// =============================================================================
// Update Operations
// =============================================================================

impl<T: Clone, const B: usize> TreeVector<T, B> {
    /// Appends an element to the back, returning the new vector.
    ///
    /// Duplicates only the spine of nodes from the root to the leaf the
    /// element lands in; everything else is shared with `self`. When the
    /// tree is at capacity a new root level is added first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treevec::TreeVector;
    ///
    /// let vector: TreeVector<i32> = (0..32).collect();
    /// let extended = vector.push_back(99);
    ///
    /// assert_eq!(vector.height(), 1);
    /// assert_eq!(extended.height(), 2);
    /// assert_eq!(extended[32], 99);
    /// ```
    #[must_use]
    pub fn push_back(&self, element: T) -> Self {
        self.append_with(move |buffer| buffer.push(element))
    }

    /// Appends an element constructed in place by `construct`.
    ///
    /// The closure runs exactly once, against the freshly duplicated leaf;
    /// closure capture stands in for forwarded constructor arguments.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treevec::TreeVector;
    ///
    /// let empty: TreeVector<Vec<i32>> = TreeVector::new();
    /// let vector = empty.emplace_back(|| vec![1, 2, 3]);
    /// assert_eq!(vector[0], vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn emplace_back<F>(&self, construct: F) -> Self
    where
        F: FnOnce() -> T,
    {
        self.append_with(move |buffer| buffer.push(construct()))
    }

    /// Shared body of the append operations: locates the target leaf,
    /// duplicates the spine to it and lets `write` push the new element.
    fn append_with<F>(&self, write: F) -> Self
    where
        F: FnOnce(&mut Vec<T>),
    {
        // Empty vector: the new root is a single leaf.
        let Some(root) = self.root.as_ref() else {
            let mut buffer = Vec::with_capacity(B);
            write(&mut buffer);
            return TreeVector {
                height: 1,
                root: Some(Arc::new(Node::Leaf(buffer))),
                length: 1,
                active_path: LeafPath::new(),
            };
        };

        if self.length == self.capacity() {
            // At capacity: raise a new root whose first child is the old
            // root and whose remaining children are shared empty spines,
            // then descend into child 1.
            let new_height = self.height + 1;
            let mut children = Vec::with_capacity(B);
            children.push(Arc::clone(root));
            children.resize(B, empty_spine::<T, B>(self.height));
            let mut new_root: NodeRef<T, B> = Arc::new(Node::Branch(children));

            let mut active_path = zero_path(new_height);
            active_path[0] = 1;
            write(copy_path(&mut new_root, &active_path));
            return TreeVector {
                height: new_height,
                root: Some(new_root),
                length: self.length + 1,
                active_path,
            };
        }

        // Leaves are packed, so the active leaf has room iff the length is
        // not a multiple of the buffer size.
        let active_path = if self.length % B == 0 {
            next_leaf_path::<B>(&self.active_path)
                .expect("a tree below capacity has a leaf to the right")
        } else {
            self.active_path.clone()
        };
        let mut new_root = Arc::clone(root);
        write(copy_path(&mut new_root, &active_path));
        TreeVector {
            height: self.height,
            root: Some(new_root),
            length: self.length + 1,
            active_path,
        }
    }

    /// Removes the last element, returning the new vector.
    ///
    /// # Errors
    ///
    /// Returns [`TreeVectorError::Empty`] if the vector has no elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treevec::TreeVector;
    ///
    /// let vector: TreeVector<i32> = (0..33).collect();
    /// let shrunk = vector.pop_back().unwrap();
    ///
    /// // Dropping back to 32 elements trims the extra root level.
    /// assert_eq!(vector.height(), 2);
    /// assert_eq!(shrunk.height(), 1);
    /// assert_eq!(shrunk.len(), 32);
    /// ```
    pub fn pop_back(&self) -> Result<Self, TreeVectorError> {
        let Some(root) = self.root.as_ref() else {
            return Err(TreeVectorError::Empty {
                operation: "pop_back",
            });
        };
        if self.length == 1 {
            return Ok(Self::new());
        }

        let new_length = self.length - 1;
        if self.height > 1 && new_length == subtree_capacity::<B>(self.height - 1) {
            // The shrunk contents exactly fill the first child: drop the
            // root level and share that subtree as the new root.
            let new_height = self.height - 1;
            return Ok(TreeVector {
                height: new_height,
                root: Some(Arc::clone(root.child(0))),
                length: new_length,
                active_path: last_leaf_path::<B>(new_height),
            });
        }

        let mut new_root = Arc::clone(root);
        let buffer = copy_path(&mut new_root, &self.active_path);
        buffer.pop();
        let active_path = if buffer.is_empty() {
            previous_leaf_path::<B>(&self.active_path)
                .expect("an emptied leaf is never the leftmost")
        } else {
            self.active_path.clone()
        };
        Ok(TreeVector {
            height: self.height,
            root: Some(new_root),
            length: new_length,
            active_path,
        })
    }

    /// Replaces the element at `index`, returning a vector that differs
    /// from `self` only there.
    ///
    /// # Errors
    ///
    /// Returns [`TreeVectorError::OutOfBounds`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treevec::TreeVector;
    ///
    /// let vector: TreeVector<i32> = (0..10).collect();
    /// let updated = vector.set_at(5, 100).unwrap();
    ///
    /// assert_eq!(updated[5], 100);
    /// assert_eq!(vector[5], 5);
    /// ```
    pub fn set_at(&self, index: usize, element: T) -> Result<Self, TreeVectorError> {
        if index >= self.length {
            return Err(TreeVectorError::OutOfBounds {
                index,
                length: self.length,
            });
        }
        let Some(root) = self.root.as_ref() else {
            return Err(TreeVectorError::OutOfBounds {
                index,
                length: self.length,
            });
        };
        let mut new_root = Arc::clone(root);
        let (path, slot) = coordinate::<B>(self.height, index);
        copy_path(&mut new_root, &path)[slot] = element;
        Ok(TreeVector {
            height: self.height,
            root: Some(new_root),
            length: self.length,
            active_path: self.active_path.clone(),
        })
    }

    /// Removes the element at `index` by overwriting it with the last
    /// element and popping (swap-with-last), returning the new vector.
    ///
    /// Element order is **not** preserved: after a successful mid-sequence
    /// erase, the old last element sits at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeVectorError::OutOfBounds`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treevec::TreeVector;
    ///
    /// let vector: TreeVector<i32> = (0..=100).collect();
    /// let erased = vector.erase(10).unwrap();
    ///
    /// assert_eq!(erased.len(), 100);
    /// assert_eq!(erased[10], 100);
    /// ```
    pub fn erase(&self, index: usize) -> Result<Self, TreeVectorError> {
        if index >= self.length {
            return Err(TreeVectorError::OutOfBounds {
                index,
                length: self.length,
            });
        }
        if index == self.length - 1 {
            return self.pop_back();
        }
        let Some(root) = self.root.as_ref() else {
            return Err(TreeVectorError::OutOfBounds {
                index,
                length: self.length,
            });
        };

        // Read the last element from the source tree before any copying.
        let last_value = leaf_at(root, &self.active_path)
            .last()
            .cloned()
            .expect("the active leaf of a non-empty vector is populated");
        let new_length = self.length - 1;

        if self.height > 1 && new_length == subtree_capacity::<B>(self.height - 1) {
            // The last element lives in the subtree the trim discards, so
            // trimming pops it implicitly; only the victim slot needs a
            // spine copy inside the kept subtree.
            let new_height = self.height - 1;
            let mut new_root = Arc::clone(root.child(0));
            let (victim_path, victim_slot) = coordinate::<B>(new_height, index);
            copy_path(&mut new_root, &victim_path)[victim_slot] = last_value;
            return Ok(TreeVector {
                height: new_height,
                root: Some(new_root),
                length: new_length,
                active_path: last_leaf_path::<B>(new_height),
            });
        }

        let mut new_root = Arc::clone(root);
        let (victim_path, victim_slot) = coordinate::<B>(self.height, index);
        copy_path(&mut new_root, &victim_path)[victim_slot] = last_value;
        let active_buffer = copy_path(&mut new_root, &self.active_path);
        active_buffer.pop();
        let active_path = if active_buffer.is_empty() {
            previous_leaf_path::<B>(&self.active_path)
                .expect("an emptied leaf is never the leftmost")
        } else {
            self.active_path.clone()
        };
        Ok(TreeVector {
            height: self.height,
            root: Some(new_root),
            length: new_length,
            active_path,
        })
    }

    /// Positional insertion, which always fails.
    ///
    /// [`erase`](TreeVector::erase) does not preserve element order, so the
    /// vector maintains no positional semantics an insertion could respect.
    /// The operation exists so callers get a typed
    /// [`Unsupported`](TreeVectorError::Unsupported) error instead of a
    /// missing method.
    ///
    /// # Errors
    ///
    /// Always returns [`TreeVectorError::Unsupported`].
    pub fn insert(&self, _index: usize, _element: T) -> Result<Self, TreeVectorError> {
        Err(TreeVectorError::Unsupported {
            operation: "insert",
        })
    }

    /// Applies `function` to every element of a deep clone of this vector,
    /// in order, and returns the clone.
    ///
    /// The clone duplicates every populated branch and leaf rather than
    /// sharing the root, so the walk can mutate buffers in place without
    /// the source ever observing a change.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treevec::TreeVector;
    ///
    /// let vector: TreeVector<i32> = (0..100).collect();
    /// let doubled = vector.for_each(|value| *value *= 2);
    ///
    /// assert_eq!(vector[40], 40);
    /// assert_eq!(doubled[40], 80);
    /// ```
    #[must_use]
    pub fn for_each<F>(&self, mut function: F) -> Self
    where
        F: FnMut(&mut T),
    {
        let mut result = self.clone_deep();
        result.visit_leaves_mut(|buffer| {
            for value in buffer.iter_mut() {
                function(value);
            }
        });
        result
    }

    /// Duplicates every populated leaf and the branches above them; unused
    /// sibling slots become fresh shared empty spines.
    fn clone_deep(&self) -> Self {
        let Some(root) = self.root.as_ref() else {
            return Self::new();
        };
        let mut leaves = Vec::with_capacity(self.length.div_ceil(B));
        let mut path = zero_path(self.height);
        let mut cloned = 0;
        loop {
            let source = leaf_at(root, &path);
            let mut buffer = Vec::with_capacity(B);
            buffer.extend(source.iter().cloned());
            cloned += buffer.len();
            leaves.push(Arc::new(Node::Leaf(buffer)));
            if cloned >= self.length {
                break;
            }
            path = next_leaf_path::<B>(&path).expect("populated leaves stay within the tree");
        }
        TreeVector {
            height: self.height,
            root: Some(build_from_leaves(leaves, self.height)),
            length: self.length,
            active_path: self.active_path.clone(),
        }
    }

    /// Walks the populated leaf buffers left to right, handing each to
    /// `visit` for in-place mutation. Only called on freshly cloned trees,
    /// whose populated spine is uniquely owned.
    fn visit_leaves_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Vec<T>),
    {
        if self.length == 0 {
            return;
        }
        let height = self.height;
        let length = self.length;
        let root = self
            .root
            .as_mut()
            .expect("a non-empty vector has a root");
        let mut path = zero_path(height);
        let mut visited = 0;
        loop {
            let buffer = copy_path(root, &path);
            visited += buffer.len();
            visit(buffer);
            if visited >= length {
                break;
            }
            path = next_leaf_path::<B>(&path).expect("populated leaves stay within the tree");
        }
    }

    /// Returns a vector holding the elements of `self` followed by the
    /// elements of `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treevec::TreeVector;
    ///
    /// let left: TreeVector<i32> = (1..=3).collect();
    /// let right: TreeVector<i32> = (4..=6).collect();
    /// let combined = left.append(&right);
    ///
    /// assert_eq!(combined.len(), 6);
    /// assert_eq!(combined[5], 6);
    /// ```
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let mut result = self.clone();
        for element in other.iter() {
            result = result.push_back(element.clone());
        }
        result
    }

    /// Creates a vector from a slice of elements.
    #[must_use]
    pub fn from_slice(values: &[T]) -> Self {
        Self::from_vec(values.to_vec())
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, const B: usize> Clone for TreeVector<T, B> {
    /// O(1): the clone shares the whole tree with `self`.
    #[inline]
    fn clone(&self) -> Self {
        TreeVector {
            height: self.height,
            root: self.root.clone(),
            length: self.length,
            active_path: self.active_path.clone(),
        }
    }
}

impl<T, const B: usize> Default for TreeVector<T, B> {
    #[inline]
    fn default() -> Self {
        TreeVector::new()
    }
}

impl<T, const B: usize> From<Vec<T>> for TreeVector<T, B> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T, const B: usize> FromIterator<T> for TreeVector<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T, const B: usize> Index<usize> for TreeVector<T, B> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).unwrap_or_else(|| {
            panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.length, index
            )
        })
    }
}

impl<T: PartialEq, const B: usize> PartialEq for TreeVector<T, B> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        // Structural fast path: the same shared root holds the same elements.
        if let (Some(left), Some(right)) = (&self.root, &other.root) {
            if Arc::ptr_eq(left, right) {
                return true;
            }
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, const B: usize> Eq for TreeVector<T, B> {}

impl<T: fmt::Debug, const B: usize> fmt::Debug for TreeVector<T, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, const B: usize> IntoIterator for &'a TreeVector<T, B> {
    type Item = &'a T;
    type IntoIter = TreeVectorIterator<'a, T, B>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone, const B: usize> IntoIterator for TreeVector<T, B> {
    type Item = T;
    type IntoIter = TreeVectorIntoIterator<T, B>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        TreeVectorIntoIterator::new(self)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T, const B: usize> serde::Serialize for TreeVector<T, B>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;

        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for element in self.iter() {
            sequence.serialize_element(element)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T, const B: usize> serde::Deserialize<'de> for TreeVector<T, B>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = Vec::<T>::deserialize(deserializer)?;
        Ok(TreeVector::from(values))
    }
}

// =============================================================================
// Tests
// =============================================================================
