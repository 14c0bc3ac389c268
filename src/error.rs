//! Error type reported by fallible [`TreeVector`](crate::TreeVector) operations.

use thiserror::Error;

/// The error returned by fallible [`TreeVector`](crate::TreeVector) operations.
///
/// Every operation either returns a well-formed new vector or reports one of
/// these errors and leaves the source untouched. Allocation failure is not
/// modeled here: Rust's global allocator aborts the process, so no partially
/// built tree can ever be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeVectorError {
    /// An index was at or past the end of the vector.
    #[error("index {index} is out of bounds for a vector of length {length}")]
    OutOfBounds {
        /// The offending index.
        index: usize,
        /// The vector length at the time of the call.
        length: usize,
    },

    /// An operation that requires at least one element was called on an
    /// empty vector.
    #[error("`{operation}` called on an empty vector")]
    Empty {
        /// Name of the operation that failed.
        operation: &'static str,
    },

    /// The requested operation is not provided by this container.
    ///
    /// Positional `insert` is the only member of this class: `erase` uses
    /// swap-with-last and does not preserve order, so there is no positional
    /// semantics for an insertion to respect.
    #[error("`{operation}` is not supported: the vector does not preserve positional order")]
    Unsupported {
        /// Name of the unsupported operation.
        operation: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::TreeVectorError;
    use rstest::rstest;

    #[rstest]
    fn test_out_of_bounds_message() {
        let error = TreeVectorError::OutOfBounds {
            index: 9,
            length: 3,
        };
        assert_eq!(
            error.to_string(),
            "index 9 is out of bounds for a vector of length 3"
        );
    }

    #[rstest]
    fn test_empty_message() {
        let error = TreeVectorError::Empty { operation: "back" };
        assert_eq!(error.to_string(), "`back` called on an empty vector");
    }

    #[rstest]
    fn test_unsupported_message() {
        let error = TreeVectorError::Unsupported {
            operation: "insert",
        };
        assert!(error.to_string().contains("not supported"));
    }
}
