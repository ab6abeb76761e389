//! Error types surfaced by tree preparation and index computation.
//!
//! Every variant here is fatal: a malformed tree, a mismatched taxon set, or a broken internal
//! invariant is treated as an unrecoverable abort. There is no retry path; callers must fix the
//! input or file a bug.

use thiserror::Error;

use crate::tree::NodeIdx;

/// Unrecoverable error produced while preparing or querying trees.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TixError {
	/// A node has more neighbours than the rooted-binary-except-at-root shape allows,
	/// or a non-root node's recorded parent does not match its actual parent.
	#[error("shape violation at node {node:?}: {message}")]
	ShapeViolation {
		/// The offending node.
		node : NodeIdx,
		/// Human-readable description of the violated shape invariant.
		message : String,
	},

	/// After sorting both trees' leaves by taxon name, the two sequences were not
	/// element-wise equal (different taxon sets, or different leaf counts).
	#[error("taxon mismatch between reference and alternative tree: {message}")]
	TaxonMismatch {
		/// Human-readable description of the mismatch.
		message : String,
	},

	/// An internal assertion failed, e.g. a reconstructed transfer set's size did not
	/// match the reported transfer index. Indicates a bug in this crate, not bad input.
	#[error("internal invariant violated: {message}")]
	InvariantFailure {
		/// Human-readable description of the violated invariant.
		message : String,
	},
}

/// Convenience alias used throughout this crate.
pub type TixResult<T> = Result<T, TixError>;
