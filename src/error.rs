use std::fmt;

/// Error raised by the strict collection operations.
///
/// Permissive operations (`add`, `discard`, `delete`) never fail on the
/// condition their strict counterpart reports; they are silent no-ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
	/// Malformed range bounds: `stop <= start` for two bounded edges.
	KeyOrder,
	/// A single-span range query crossed a boundary between differently
	/// mapped subranges.
	AmbiguousRange,
	/// A key could not be compared against an existing boundary key.
	UnorderableKey,
	/// Uniqueness violation on a strict operation, including overlapping
	/// triples during `RangeMap` construction.
	Duplicate,
	/// Strict removal or lookup of an absent element or unmapped range.
	NotFound,
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::KeyOrder => write!(f, "stop must be > start"),
			Error::AmbiguousRange => {
				write!(f, "range spans differently mapped subranges")
			}
			Error::UnorderableKey => {
				write!(f, "key cannot be ordered against existing boundary keys")
			}
			Error::Duplicate => write!(f, "value already present"),
			Error::NotFound => write!(f, "value not present"),
		}
	}
}

impl std::error::Error for Error {}

pub type Result<T, E = Error> = std::result::Result<T, E>;
