use std::any::{TypeId, type_name};
use std::mem::{align_of, size_of};

use crate::bridge::{HostKind, Kind};

/// Host reflector report for one Rust type.
///
/// Produced by [`CType::host_type`], either from a built-in impl or from `#[derive(CType)]`.
/// Element types are stored as constructors so self-referential pointer types stay finite.
#[derive(Debug, Clone)]
pub struct HostType {
	/// Full Rust type name, for diagnostics.
	pub type_name: &'static str,
	/// Short type name; empty for unnamed types (arrays, pointers, slices).
	pub name: &'static str,
	/// Module that declares the type; empty for built-in types.
	pub module_path: &'static str,
	/// Reflected kind.
	pub kind: HostKind,
	/// Host size in bytes.
	pub size: usize,
	/// Host alignment in bytes.
	pub align: usize,
	/// Identity of the Rust type.
	pub type_id: TypeId,
	/// Element type constructor for arrays, pointers, and slices.
	pub elem: Option<fn() -> HostType>,
	/// Array length; zero for other kinds.
	pub len: usize,
	/// Aggregate fields in declaration order.
	pub fields: Vec<HostField>,
}

/// One aggregate field as reported by the host reflector.
#[derive(Debug, Clone)]
pub struct HostField {
	/// Field name (or tuple index rendered as text).
	pub name: &'static str,
	/// Declaring module for non-`pub` fields, empty otherwise.
	pub pkg_path: &'static str,
	/// Field host type.
	pub ty: HostType,
	/// Free-form tag from `#[ctype(tag = "...")]`.
	pub tag: &'static str,
	/// Host byte offset of the field.
	pub offset: usize,
	/// Declaration index.
	pub index: usize,
	/// Whether the field is an embedded (anonymous) member.
	pub anonymous: bool,
}

impl HostType {
	fn base<T: 'static>(kind: HostKind, name: &'static str, module_path: &'static str) -> Self {
		Self {
			type_name: type_name::<T>(),
			name,
			module_path,
			kind,
			size: size_of::<T>(),
			align: align_of::<T>(),
			type_id: TypeId::of::<T>(),
			elem: None,
			len: 0,
			fields: Vec::new(),
		}
	}

	/// Describe a built-in scalar type.
	pub fn scalar<T: 'static>(kind: Kind, name: &'static str) -> Self {
		Self::base::<T>(HostKind::Native(kind), name, "")
	}

	/// Describe an unnamed indirection (pointer or slice) with an optional element type.
	pub fn indirect<T: 'static>(kind: Kind, elem: Option<fn() -> HostType>) -> Self {
		let mut out = Self::base::<T>(HostKind::Native(kind), "", "");
		out.elem = elem;
		out
	}

	/// Describe a fixed-length array.
	pub fn array<T: 'static>(elem: fn() -> HostType, len: usize) -> Self {
		let mut out = Self::base::<T>(HostKind::Native(Kind::Array), "", "");
		out.elem = Some(elem);
		out.len = len;
		out
	}

	/// Describe a named aggregate.
	pub fn aggregate<T: 'static>(name: &'static str, module_path: &'static str, fields: Vec<HostField>) -> Self {
		Self::composite::<T>(Kind::Struct, name, module_path, fields)
	}

	/// Describe a type laid out as fields but reported under another kind (complex numbers).
	pub fn composite<T: 'static>(kind: Kind, name: &'static str, module_path: &'static str, fields: Vec<HostField>) -> Self {
		let mut out = Self::base::<T>(HostKind::Native(kind), name, module_path);
		out.fields = fields;
		out
	}

	/// Register a type whose host kind has no foreign representation.
	///
	/// The resolver rejects such types; this exists so hand-written reflection can say so explicitly.
	pub fn unsupported<T: 'static>(kind: HostKind, name: &'static str, module_path: &'static str) -> Self {
		Self::base::<T>(kind, name, module_path)
	}

	/// Return whether this report describes `T`.
	pub fn is<T: 'static>(&self) -> bool {
		self.type_id == TypeId::of::<T>()
	}

	/// Element type for arrays, pointers, and slices.
	pub fn elem_type(&self) -> Option<HostType> {
		self.elem.map(|elem| elem())
	}

	/// Follow typed pointers until a non-pointer type is reached.
	pub fn underlying(&self) -> HostType {
		let mut current = self.clone();
		while current.kind == HostKind::Native(Kind::Pointer) {
			let Some(elem) = current.elem else {
				break;
			};
			current = elem();
		}
		current
	}
}

/// Host reflection for a Rust type that can cross the foreign boundary.
///
/// Implemented for the supported built-in types and derived for structs with `#[derive(CType)]`.
pub trait CType: 'static {
	/// Static type structure.
	fn host_type() -> HostType;

	/// Live view of this value for the encode engine.
	fn reflect(&self) -> Reflected<'_>;

	/// Writable view of this value for the decode engine.
	fn reflect_mut(&mut self) -> ReflectedMut<'_>;
}

/// Read-only view of a live value, one variant per foreign kind.
#[derive(Debug)]
pub enum Reflected<'a> {
	/// `bool`.
	Bool(bool),
	/// `isize`.
	Int(isize),
	/// `i8`.
	Int8(i8),
	/// `i16`.
	Int16(i16),
	/// `i32`.
	Int32(i32),
	/// `i64`.
	Int64(i64),
	/// `usize`.
	Uint(usize),
	/// `u8`.
	Uint8(u8),
	/// `u16`.
	Uint16(u16),
	/// `u32`.
	Uint32(u32),
	/// `u64`.
	Uint64(u64),
	/// Pointer-sized address integer.
	UintPtr(usize),
	/// `f32`.
	Float32(f32),
	/// `f64`.
	Float64(f64),
	/// Elements in index order.
	Array(Vec<Reflected<'a>>),
	/// Sequence header.
	Slice {
		/// Element count.
		len: usize,
		/// Address of the first element.
		data: usize,
	},
	/// Typed address.
	Pointer(usize),
	/// Untyped address.
	UnsafePointer(usize),
	/// Borrowed text.
	String(&'a str),
	/// Fields in declaration order.
	Struct(Vec<Reflected<'a>>),
}

/// Writable view of a live destination, one variant per foreign kind.
pub enum ReflectedMut<'a> {
	/// `bool`.
	Bool(&'a mut bool),
	/// `isize`.
	Int(&'a mut isize),
	/// `i8`.
	Int8(&'a mut i8),
	/// `i16`.
	Int16(&'a mut i16),
	/// `i32`.
	Int32(&'a mut i32),
	/// `i64`.
	Int64(&'a mut i64),
	/// `usize`.
	Uint(&'a mut usize),
	/// `u8`.
	Uint8(&'a mut u8),
	/// `u16`.
	Uint16(&'a mut u16),
	/// `u32`.
	Uint32(&'a mut u32),
	/// `u64`.
	Uint64(&'a mut u64),
	/// Pointer-sized address integer.
	UintPtr(&'a mut usize),
	/// `f32`.
	Float32(&'a mut f32),
	/// `f64`.
	Float64(&'a mut f64),
	/// Elements in index order.
	Array(Vec<ReflectedMut<'a>>),
	/// Sequence header slot.
	Slice(&'a mut dyn SequenceSlot),
	/// Typed address slot.
	Pointer(&'a mut dyn AddressSlot),
	/// Untyped address slot.
	UnsafePointer(&'a mut dyn AddressSlot),
	/// Owned text.
	String(&'a mut String),
	/// Fields in declaration order.
	Struct(Vec<ReflectedMut<'a>>),
}

/// Destination that can be rebuilt from a raw address.
pub trait AddressSlot {
	/// Store `addr` as this slot's address.
	fn set_addr(&mut self, addr: usize);
}

/// Destination that can be rebuilt from a `{len, data}` sequence header.
pub trait SequenceSlot {
	/// Store the header without touching element memory.
	fn set_header(&mut self, len: usize, data: usize);
}

impl Reflected<'_> {
	/// Short label of the operand shape.
	pub fn shape(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Int8(_) => "int8",
			Self::Int16(_) => "int16",
			Self::Int32(_) => "int32",
			Self::Int64(_) => "int64",
			Self::Uint(_) => "uint",
			Self::Uint8(_) => "uint8",
			Self::Uint16(_) => "uint16",
			Self::Uint32(_) => "uint32",
			Self::Uint64(_) => "uint64",
			Self::UintPtr(_) => "uintptr",
			Self::Float32(_) => "float32",
			Self::Float64(_) => "float64",
			Self::Array(_) => "array",
			Self::Slice { .. } => "slice",
			Self::Pointer(_) => "ptr",
			Self::UnsafePointer(_) => "unsafe.Pointer",
			Self::String(_) => "string",
			Self::Struct(_) => "struct",
		}
	}
}

impl ReflectedMut<'_> {
	/// Short label of the destination shape.
	pub fn shape(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Int8(_) => "int8",
			Self::Int16(_) => "int16",
			Self::Int32(_) => "int32",
			Self::Int64(_) => "int64",
			Self::Uint(_) => "uint",
			Self::Uint8(_) => "uint8",
			Self::Uint16(_) => "uint16",
			Self::Uint32(_) => "uint32",
			Self::Uint64(_) => "uint64",
			Self::UintPtr(_) => "uintptr",
			Self::Float32(_) => "float32",
			Self::Float64(_) => "float64",
			Self::Array(_) => "array",
			Self::Slice(_) => "slice",
			Self::Pointer(_) => "ptr",
			Self::UnsafePointer(_) => "unsafe.Pointer",
			Self::String(_) => "string",
			Self::Struct(_) => "struct",
		}
	}
}
