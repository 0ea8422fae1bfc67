use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::bridge::{CType, CTypeError, HostKind, HostType, Kind, Layout, ResolveOptions, Result, resolve_with};

/// Foreign-layout description of a host type.
///
/// Immutable and cheap to clone. [`TypeDescriptor::size`] is exactly the number of bytes the
/// encode engine writes for one value of the type.
#[derive(Clone)]
pub struct TypeDescriptor {
	inner: Arc<Inner>,
}

struct Inner {
	host: HostType,
	kind: Kind,
	size: usize,
	align: usize,
	options: ResolveOptions,
	shape: Shape,
}

pub(crate) enum Shape {
	Scalar,
	/// Pointer or slice; the pointee is resolved on demand.
	Indirect,
	Array {
		elem: TypeDescriptor,
		len: usize,
	},
	Struct {
		/// Declaration order, authoritative for byte layout.
		fields: Vec<StructField>,
		/// Lookup only.
		by_name: HashMap<&'static str, usize>,
	},
}

/// One resolved aggregate field.
#[derive(Debug, Clone)]
pub struct StructField {
	/// Field name.
	pub name: &'static str,
	/// Declaring module for non-`pub` fields, empty otherwise.
	pub pkg_path: &'static str,
	/// Resolved field type.
	pub ty: TypeDescriptor,
	/// Free-form tag.
	pub tag: &'static str,
	/// Host byte offset, as reported by the reflector.
	pub offset: usize,
	/// Byte offset inside the foreign image.
	pub foreign_offset: usize,
	/// Index path from the outermost aggregate.
	pub index: Vec<usize>,
	/// Whether the field is an embedded member.
	pub anonymous: bool,
}

impl TypeDescriptor {
	pub(crate) fn from_parts(host: &HostType, kind: Kind, size: usize, align: usize, options: ResolveOptions, shape: Shape) -> Self {
		Self {
			inner: Arc::new(Inner {
				host: host.clone(),
				kind,
				size,
				align,
				options,
				shape,
			}),
		}
	}

	/// Resolve `T` with default options.
	pub fn of<T: CType>() -> Result<Self> {
		Self::of_with::<T>(&ResolveOptions::default())
	}

	/// Resolve `T` with explicit options.
	pub fn of_with<T: CType>(options: &ResolveOptions) -> Result<Self> {
		resolve_with(&T::host_type(), options)
	}

	/// Resolve the type of `value` with default options.
	pub fn of_val<T: CType>(_value: &T) -> Result<Self> {
		Self::of::<T>()
	}

	/// Type name within its module; empty for unnamed types.
	pub fn name(&self) -> &'static str {
		self.inner.host.name
	}

	/// Module path of the host type; empty for built-in and unnamed types.
	pub fn pkg_path(&self) -> &'static str {
		self.inner.host.module_path
	}

	/// Foreign size in bytes.
	pub fn size(&self) -> usize {
		self.inner.size
	}

	/// Foreign alignment in bytes.
	pub fn align(&self) -> usize {
		self.inner.align
	}

	/// Foreign kind.
	pub fn kind(&self) -> Kind {
		self.inner.kind
	}

	/// Placement rule the descriptor was resolved with.
	pub fn layout(&self) -> Layout {
		self.inner.options.layout
	}

	/// Host type this descriptor was derived from.
	pub fn origin(&self) -> &HostType {
		&self.inner.host
	}

	/// Return whether this descriptor was derived from `T`.
	pub fn is_origin<T: 'static>(&self) -> bool {
		self.inner.host.is::<T>()
	}

	/// Element type of an array, pointer, or slice.
	pub fn elem(&self) -> Result<TypeDescriptor> {
		match &self.inner.shape {
			Shape::Array { elem, .. } => Ok(elem.clone()),
			Shape::Indirect => {
				let elem = self.inner.host.elem_type().ok_or(self.invalid("elem"))?;
				resolve_with(&elem, &self.inner.options)
			}
			Shape::Scalar | Shape::Struct { .. } => Err(self.invalid("elem")),
		}
	}

	/// Array length.
	pub fn len(&self) -> Result<usize> {
		match &self.inner.shape {
			Shape::Array { len, .. } => Ok(*len),
			_ => Err(self.invalid("len")),
		}
	}

	/// Number of aggregate fields.
	pub fn num_field(&self) -> Result<usize> {
		Ok(self.fields()?.len())
	}

	/// Aggregate field `i` in declaration order.
	pub fn field(&self, i: usize) -> Result<&StructField> {
		let fields = self.fields()?;
		fields.get(i).ok_or(CTypeError::FieldIndexOutOfRange { idx: i, count: fields.len() })
	}

	/// All aggregate fields in declaration order.
	pub fn fields(&self) -> Result<&[StructField]> {
		self.struct_fields().ok_or(self.invalid("field"))
	}

	/// Look up an aggregate field by name.
	pub fn field_by_name(&self, name: &str) -> Option<&StructField> {
		match &self.inner.shape {
			Shape::Struct { fields, by_name } => by_name.get(name).and_then(|idx| fields.get(*idx)),
			_ => None,
		}
	}

	pub(crate) fn array_parts(&self) -> Option<(&TypeDescriptor, usize)> {
		match &self.inner.shape {
			Shape::Array { elem, len } => Some((elem, *len)),
			_ => None,
		}
	}

	pub(crate) fn struct_fields(&self) -> Option<&[StructField]> {
		match &self.inner.shape {
			Shape::Struct { fields, .. } => Some(fields),
			_ => None,
		}
	}

	fn invalid(&self, op: &'static str) -> CTypeError {
		CTypeError::InvalidAccessor { op, kind: self.inner.kind }
	}
}

impl fmt::Display for TypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&c_spelling(&self.inner.host))
	}
}

impl fmt::Debug for TypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeDescriptor")
			.field("type", &self.inner.host.type_name)
			.field("kind", &self.inner.kind)
			.field("size", &self.inner.size)
			.field("align", &self.inner.align)
			.field("layout", &self.inner.options.layout)
			.finish()
	}
}

/// C spelling of a host type; aggregates are named rather than expanded.
pub(crate) fn c_spelling(host: &HostType) -> String {
	let mut dims = Vec::new();
	let mut current = host.clone();
	while current.kind == HostKind::Native(Kind::Array) {
		dims.push(current.len);
		let Some(elem) = current.elem_type() else {
			break;
		};
		current = elem;
	}

	let mut out = match current.kind {
		HostKind::Native(Kind::Struct) if current.name.is_empty() => "struct <anonymous>".to_owned(),
		HostKind::Native(Kind::Struct) => format!("struct {}", current.name),
		HostKind::Native(Kind::Pointer) => match current.elem_type() {
			Some(elem) => format!("{}*", c_spelling(&elem)),
			None => "void*".to_owned(),
		},
		HostKind::Native(Kind::Slice) => match current.elem_type() {
			Some(elem) => format!("struct {{ intptr_t len; {}* data; }}", c_spelling(&elem)),
			None => "struct { intptr_t len; void* data; }".to_owned(),
		},
		HostKind::Native(kind) => kind.c_name().unwrap_or(kind.as_str()).to_owned(),
		other => format!("{other:?}"),
	};
	for dim in dims {
		out.push_str(&format!("[{dim}]"));
	}
	out
}
