use thiserror::Error;

use crate::bridge::{HostKind, Kind};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CTypeError>;

/// Errors produced while resolving layouts and moving values across the boundary.
#[derive(Debug, Error)]
pub enum CTypeError {
	/// Host type has a kind with no foreign representation.
	#[error("unhandled kind {kind:?} for type {type_name}")]
	UnsupportedKind {
		/// Offending host kind.
		kind: HostKind,
		/// Rust type name of the offending type.
		type_name: &'static str,
	},
	/// Resolver recursion exceeded configured limit.
	#[error("resolve depth exceeded (max={max_depth})")]
	ResolveDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Encoder or decoder bound to a value of a different host type.
	#[error("cannot bind type {got} to a value of type {expected}")]
	TypeMismatch {
		/// Host type the value was resolved from.
		expected: &'static str,
		/// Host type requested by the caller.
		got: &'static str,
	},
	/// Descriptor accessor used on a kind it does not apply to.
	#[error("{op} called on {kind:?} descriptor")]
	InvalidAccessor {
		/// Accessor name.
		op: &'static str,
		/// Kind of the descriptor.
		kind: Kind,
	},
	/// Struct field index outside `[0, count)`.
	#[error("field index out of range: idx={idx}, count={count}")]
	FieldIndexOutOfRange {
		/// Requested index.
		idx: usize,
		/// Number of fields.
		count: usize,
	},
	/// Live operand shape disagrees with its resolved descriptor.
	#[error("operand mismatch: descriptor is {expected:?}, operand is {got}")]
	OperandMismatch {
		/// Descriptor kind at the current position.
		expected: Kind,
		/// Operand shape that was reflected.
		got: &'static str,
	},
	/// Cursor moved past the end of the value buffer.
	#[error("buffer overrun at offset {at}, need {need} bytes, remaining {rem}")]
	BufferOverrun {
		/// Byte offset where the access was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Foreign heap refused an allocation.
	#[error("foreign allocation of {size} bytes failed")]
	ForeignAllocFailed {
		/// Requested allocation size including terminator.
		size: usize,
	},
	/// Text pointer in the buffer is not owned by the value.
	#[error("text pointer at offset {offset} is not owned by this value")]
	UnownedText {
		/// Buffer offset of the pointer slot.
		offset: usize,
	},
}
