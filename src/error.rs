//! Construction-time validation errors for a [`crate::pattern::PatternReducibility`].

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("symmetries[0] must be the identity permutation, got {0:?}")]
    FirstSymmetryNotIdentity(Vec<usize>),

    #[error("symmetry at index {index} is not a permutation of 0..{k}: {permutation:?}")]
    NotAPermutation {
        index: usize,
        k: usize,
        permutation: Vec<usize>,
    },

    #[error("outgoing list must contain distinct vertex indices, found a duplicate: {0}")]
    DuplicateOutgoingVertex(usize),

    #[error("outgoing vertex {vertex} is out of range for a line graph of {n} vertices")]
    OutgoingVertexOutOfRange { vertex: usize, n: usize },

    #[error("symmetries list must not be empty")]
    NoSymmetries,
}
