use std::fmt;
use std::mem::{align_of, size_of};

/// Width of a foreign pointer slot.
pub const POINTER_SIZE: usize = size_of::<usize>();

/// Alignment of a foreign pointer slot.
pub const POINTER_ALIGN: usize = align_of::<usize>();

/// Width of the native signed integer used for sequence lengths.
pub const INT_SIZE: usize = size_of::<isize>();

/// Representational kind of a foreign-layout type.
///
/// The zero kind is `Invalid` and never resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// Placeholder for a type the reflector could not classify.
	Invalid,
	/// One-byte boolean.
	Bool,
	/// Native signed integer (`isize`).
	Int,
	/// 8-bit signed integer.
	Int8,
	/// 16-bit signed integer.
	Int16,
	/// 32-bit signed integer.
	Int32,
	/// 64-bit signed integer.
	Int64,
	/// Native unsigned integer (`usize`).
	Uint,
	/// 8-bit unsigned integer.
	Uint8,
	/// 16-bit unsigned integer.
	Uint16,
	/// 32-bit unsigned integer.
	Uint32,
	/// 64-bit unsigned integer.
	Uint64,
	/// Pointer-sized unsigned integer holding an address.
	UintPtr,
	/// IEEE-754 single precision float.
	Float32,
	/// IEEE-754 double precision float.
	Float64,
	/// Pair of `Float32` (real, imag).
	Complex64,
	/// Pair of `Float64` (real, imag).
	Complex128,
	/// Fixed-length inline array.
	Array,
	/// Variable-length sequence encoded as a `{len, data}` header.
	Slice,
	/// Typed address.
	Pointer,
	/// Text encoded as a pointer to a foreign NUL-terminated copy.
	String,
	/// Aggregate of named fields.
	Struct,
	/// Untyped address.
	UnsafePointer,
}

impl Kind {
	/// Byte width for kinds encoded as one native scalar, `None` for composite kinds.
	pub fn scalar_width(self) -> Option<usize> {
		let width = match self {
			Self::Bool | Self::Int8 | Self::Uint8 => 1,
			Self::Int16 | Self::Uint16 => 2,
			Self::Int32 | Self::Uint32 | Self::Float32 => 4,
			Self::Int64 | Self::Uint64 | Self::Float64 => 8,
			Self::Int => INT_SIZE,
			Self::Uint | Self::UintPtr | Self::Pointer | Self::UnsafePointer => POINTER_SIZE,
			Self::Invalid | Self::Complex64 | Self::Complex128 | Self::Array | Self::Slice | Self::String | Self::Struct => return None,
		};
		Some(width)
	}

	/// Short lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Invalid => "invalid",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Int8 => "int8",
			Self::Int16 => "int16",
			Self::Int32 => "int32",
			Self::Int64 => "int64",
			Self::Uint => "uint",
			Self::Uint8 => "uint8",
			Self::Uint16 => "uint16",
			Self::Uint32 => "uint32",
			Self::Uint64 => "uint64",
			Self::UintPtr => "uintptr",
			Self::Float32 => "float32",
			Self::Float64 => "float64",
			Self::Complex64 => "complex64",
			Self::Complex128 => "complex128",
			Self::Array => "array",
			Self::Slice => "slice",
			Self::Pointer => "ptr",
			Self::String => "string",
			Self::Struct => "struct",
			Self::UnsafePointer => "unsafe.Pointer",
		}
	}

	/// C spelling for scalar kinds.
	pub fn c_name(self) -> Option<&'static str> {
		let name = match self {
			Self::Bool => "_Bool",
			Self::Int => "intptr_t",
			Self::Int8 => "int8_t",
			Self::Int16 => "int16_t",
			Self::Int32 => "int32_t",
			Self::Int64 => "int64_t",
			Self::Uint => "size_t",
			Self::Uint8 => "uint8_t",
			Self::Uint16 => "uint16_t",
			Self::Uint32 => "uint32_t",
			Self::Uint64 => "uint64_t",
			Self::UintPtr => "uintptr_t",
			Self::Float32 => "float",
			Self::Float64 => "double",
			Self::Complex64 => "float _Complex",
			Self::Complex128 => "double _Complex",
			Self::String => "char*",
			Self::UnsafePointer => "void*",
			Self::Invalid | Self::Array | Self::Slice | Self::Pointer | Self::Struct => return None,
		};
		Some(name)
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Kind reported by the host reflector.
///
/// Host kinds outside [`Kind`] have no foreign representation and are rejected by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
	/// Kind with a foreign representation.
	Native(Kind),
	/// Channel.
	Chan,
	/// Function or closure.
	Func,
	/// Trait object.
	Interface,
	/// Hash or ordered map.
	Map,
}

impl From<Kind> for HostKind {
	fn from(kind: Kind) -> Self {
		Self::Native(kind)
	}
}
