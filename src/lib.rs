//! # treevec
//!
//! A persistent (immutable) indexed sequence backed by a B-ary tree with
//! contiguous leaf buffers.
//!
//! ## Overview
//!
//! [`TreeVector`] combines the cache-friendly contiguous buffers of a plain
//! vector with the structural sharing of functional data structures. Every
//! update returns a new vector value; the source is never touched, so any
//! number of historical versions stay alive for the cost of the `O(height)`
//! nodes each update actually copied.
//!
//! - Random access, append, pop, in-place replace and swap-with-last erase
//!   in `O(log_B N)` node work
//! - `O(1)` length, emptiness and `clone`
//! - A leaf-caching double-ended iterator with `O(height)` random seeks
//! - Published values are immutable and can be shared across threads
//!   without synchronization (`Send + Sync` when `T` is)
//!
//! Mid-sequence `erase` swaps the victim with the last element before
//! popping, trading element order for `O(log_B N)` cost; positional
//! `insert` is deliberately not provided.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`TreeVector`], encoded as a
//!   plain sequence
//!
//! ## Example
//!
//! ```rust
//! use treevec::TreeVector;
//!
//! let vector: TreeVector<i32> = (0..1000).collect();
//! let updated = vector.set_at(500, -1).unwrap();
//!
//! assert_eq!(vector[500], 500);   // the original version is untouched
//! assert_eq!(updated[500], -1);
//! assert_eq!(updated[499], 499);  // everything else is shared
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod iter;
mod node;
mod path;
mod vector;

pub use error::TreeVectorError;
pub use iter::TreeVectorIntoIterator;
pub use iter::TreeVectorIterator;
pub use path::MAX_HEIGHT;
pub use vector::TreeVector;
