//! Path arithmetic: the bidirectional map between linear element indices and
//! tree coordinates.
//!
//! A coordinate addresses a leaf through `height - 1` level indices, each in
//! `[0, B)`, plus a slot in `[0, B)` inside the leaf buffer. The level
//! indices read as a base-`B` number that counts leaves from the left, so
//! stepping to the neighbouring leaf is a base-`B` increment or decrement.

use smallvec::{SmallVec, smallvec};

/// Practical bound on the tree height.
///
/// Paths of up to `MAX_HEIGHT` digits are stored inline; a tree of height 8
/// with the default branching factor already addresses `32^8` elements.
/// Taller trees keep working; their paths spill to the heap.
pub const MAX_HEIGHT: usize = 8;

/// A root-to-leaf path: one child index per branch level.
pub(crate) type LeafPath = SmallVec<[usize; MAX_HEIGHT]>;

/// Number of elements a subtree spanning `levels` node levels can hold.
///
/// Saturates instead of overflowing so that capacity comparisons stay safe
/// near `usize::MAX`.
pub(crate) fn subtree_capacity<const B: usize>(levels: usize) -> usize {
    u32::try_from(levels)
        .ok()
        .and_then(|exponent| B.checked_pow(exponent))
        .unwrap_or(usize::MAX)
}

/// Smallest height whose capacity reaches `length`. Minimum 1.
pub(crate) fn height_for_len<const B: usize>(length: usize) -> usize {
    let mut height = 1;
    while subtree_capacity::<B>(height) < length {
        height += 1;
    }
    height
}

/// Maps a linear index to the coordinate of its element: the path to the
/// containing leaf and the slot within that leaf.
///
/// `index` must be below the capacity of a tree of the given height.
pub(crate) fn coordinate<const B: usize>(height: usize, index: usize) -> (LeafPath, usize) {
    let mut path = LeafPath::new();
    let mut remaining = index;
    for level in (1..height).rev() {
        let span = subtree_capacity::<B>(level);
        path.push(remaining / span);
        remaining %= span;
    }
    (path, remaining)
}

/// Inverse of [`coordinate`]: folds a leaf path and slot back into the
/// linear element index.
pub(crate) fn index_of<const B: usize>(path: &[usize], slot: usize) -> usize {
    let height = path.len() + 1;
    path.iter()
        .enumerate()
        .map(|(position, &digit)| digit * subtree_capacity::<B>(height - 1 - position))
        .sum::<usize>()
        + slot
}

/// Path of the leaf immediately to the right, or `None` when the current
/// leaf is the rightmost one the tree can address.
pub(crate) fn next_leaf_path<const B: usize>(path: &[usize]) -> Option<LeafPath> {
    let mut next: LeafPath = SmallVec::from_slice(path);
    for position in (0..next.len()).rev() {
        if next[position] < B - 1 {
            next[position] += 1;
            for digit in next.iter_mut().skip(position + 1) {
                *digit = 0;
            }
            return Some(next);
        }
    }
    None
}

/// Path of the leaf immediately to the left, or `None` when the current
/// leaf is the leftmost one.
pub(crate) fn previous_leaf_path<const B: usize>(path: &[usize]) -> Option<LeafPath> {
    let mut previous: LeafPath = SmallVec::from_slice(path);
    for position in (0..previous.len()).rev() {
        if previous[position] > 0 {
            previous[position] -= 1;
            for digit in previous.iter_mut().skip(position + 1) {
                *digit = B - 1;
            }
            return Some(previous);
        }
    }
    None
}

/// Path of the leftmost leaf of a tree with the given height.
pub(crate) fn zero_path(height: usize) -> LeafPath {
    smallvec![0; height.saturating_sub(1)]
}

/// Path of the rightmost leaf of a fully populated tree with the given
/// height: every digit at `B - 1`.
pub(crate) fn last_leaf_path<const B: usize>(height: usize) -> LeafPath {
    smallvec![B - 1; height.saturating_sub(1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_subtree_capacity() {
        assert_eq!(subtree_capacity::<32>(0), 1);
        assert_eq!(subtree_capacity::<32>(1), 32);
        assert_eq!(subtree_capacity::<32>(2), 1024);
        assert_eq!(subtree_capacity::<4>(3), 64);
    }

    #[rstest]
    fn test_subtree_capacity_saturates() {
        assert_eq!(subtree_capacity::<32>(64), usize::MAX);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(32, 1)]
    #[case(33, 2)]
    #[case(1024, 2)]
    #[case(1025, 3)]
    fn test_height_for_len(#[case] length: usize, #[case] expected: usize) {
        assert_eq!(height_for_len::<32>(length), expected);
    }

    #[rstest]
    fn test_coordinate_single_leaf() {
        let (path, slot) = coordinate::<32>(1, 17);
        assert!(path.is_empty());
        assert_eq!(slot, 17);
    }

    #[rstest]
    fn test_coordinate_two_levels() {
        // Height 2, B = 4: leaves hold 4 elements, the path has one digit.
        let (path, slot) = coordinate::<4>(2, 9);
        assert_eq!(path.as_slice(), &[2]);
        assert_eq!(slot, 1);
    }

    #[rstest]
    fn test_coordinate_three_levels() {
        let (path, slot) = coordinate::<4>(3, 37);
        assert_eq!(path.as_slice(), &[2, 1]);
        assert_eq!(slot, 1);
    }

    #[rstest]
    fn test_coordinate_roundtrip() {
        for index in 0..4096 {
            let (path, slot) = coordinate::<4>(6, index);
            assert_eq!(index_of::<4>(&path, slot), index);
        }
    }

    #[rstest]
    fn test_next_leaf_path_increments() {
        let path = [0, 3];
        let next = next_leaf_path::<4>(&path).unwrap();
        assert_eq!(next.as_slice(), &[1, 0]);
    }

    #[rstest]
    fn test_next_leaf_path_wraps_to_none() {
        assert!(next_leaf_path::<4>(&[3, 3]).is_none());
        assert!(next_leaf_path::<4>(&[]).is_none());
    }

    #[rstest]
    fn test_previous_leaf_path_decrements() {
        let path = [1, 0];
        let previous = previous_leaf_path::<4>(&path).unwrap();
        assert_eq!(previous.as_slice(), &[0, 3]);
    }

    #[rstest]
    fn test_previous_leaf_path_wraps_to_none() {
        assert!(previous_leaf_path::<4>(&[0, 0]).is_none());
        assert!(previous_leaf_path::<4>(&[]).is_none());
    }

    #[rstest]
    fn test_next_and_previous_are_inverse() {
        let mut path: LeafPath = zero_path(4);
        for _ in 0..20 {
            let next = next_leaf_path::<4>(&path).unwrap();
            assert_eq!(previous_leaf_path::<4>(&next).unwrap(), path);
            path = next;
        }
    }
}
