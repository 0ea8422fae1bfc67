use std::collections::HashMap;
use std::mem::offset_of;

use crate::bridge::{
	CSlice, CType, CTypeError, Complex128, HostKind, HostType, INT_SIZE, Kind, Layout, POINTER_SIZE, ResolveOptions, TypeDescriptor, resolve,
	resolve_with,
};

#[derive(crate::CType)]
#[repr(C)]
struct Mixed {
	a: u8,
	b: i32,
	c: f64,
	d: u16,
}

#[derive(crate::CType)]
#[repr(C)]
struct Node {
	value: i32,
	next: *const Node,
}

#[derive(crate::CType)]
struct Labelled {
	#[ctype(tag = "json:\"id\"")]
	pub id: i64,
	name: String,
	items: CSlice<f64>,
}

#[derive(crate::CType)]
struct Grid {
	cells: [[u8; 3]; 2],
	names: [String; 2],
}

#[test]
fn natural_offsets_match_repr_c() {
	let ty = TypeDescriptor::of::<Mixed>().expect("Mixed resolves");
	assert_eq!(ty.layout(), Layout::Natural);
	assert_eq!(ty.size(), size_of::<Mixed>());
	assert_eq!(ty.align(), align_of::<Mixed>());

	let expected = [
		("a", offset_of!(Mixed, a)),
		("b", offset_of!(Mixed, b)),
		("c", offset_of!(Mixed, c)),
		("d", offset_of!(Mixed, d)),
	];
	for (idx, (name, offset)) in expected.into_iter().enumerate() {
		let field = ty.field(idx).expect("field exists");
		assert_eq!(field.name, name);
		assert_eq!(field.foreign_offset, offset, "field {name}");
		assert_eq!(field.offset, offset, "host offset for {name}");
		assert_eq!(field.index, vec![idx]);
	}
}

#[test]
fn packed_layout_sums_field_sizes() {
	let ty = TypeDescriptor::of_with::<Mixed>(&ResolveOptions::packed()).expect("Mixed resolves packed");
	assert_eq!(ty.layout(), Layout::Packed);
	assert_eq!(ty.size(), 1 + 4 + 8 + 2);
	assert_eq!(ty.align(), 1);

	let offsets: Vec<usize> = ty.fields().expect("struct fields").iter().map(|field| field.foreign_offset).collect();
	assert_eq!(offsets, vec![0, 1, 5, 13]);
	assert_eq!(ty.field(1).expect("field b").offset, offset_of!(Mixed, b));
}

#[test]
fn text_and_slice_fields_use_foreign_widths() {
	let ty = TypeDescriptor::of_with::<Labelled>(&ResolveOptions::packed()).expect("Labelled resolves");
	assert_eq!(ty.size(), 8 + POINTER_SIZE + INT_SIZE + POINTER_SIZE);

	let name = ty.field_by_name("name").expect("name field");
	assert_eq!(name.ty.kind(), Kind::String);
	assert_eq!(name.ty.size(), POINTER_SIZE);
	assert_eq!(name.foreign_offset, 8);

	let items = ty.field_by_name("items").expect("items field");
	assert_eq!(items.ty.kind(), Kind::Slice);
	assert_eq!(items.ty.size(), INT_SIZE + POINTER_SIZE);
	assert_eq!(items.ty.elem().expect("slice elem").kind(), Kind::Float64);
	assert!(ty.field_by_name("missing").is_none());
}

#[test]
fn field_metadata_carries_tag_and_visibility() {
	let ty = TypeDescriptor::of::<Labelled>().expect("Labelled resolves");
	let id = ty.field(0).expect("id field");
	assert_eq!(id.tag, "json:\"id\"");
	assert_eq!(id.pkg_path, "");
	assert!(!id.anonymous);

	let name = ty.field(1).expect("name field");
	assert_eq!(name.tag, "");
	assert_eq!(name.pkg_path, module_path!());
	assert_eq!(ty.name(), "Labelled");
	assert_eq!(ty.pkg_path(), module_path!());
}

#[test]
fn array_size_follows_foreign_element_size() {
	let ty = TypeDescriptor::of_with::<Grid>(&ResolveOptions::packed()).expect("Grid resolves");
	let cells = ty.field(0).expect("cells field");
	assert_eq!(cells.ty.kind(), Kind::Array);
	assert_eq!(cells.ty.len().expect("outer len"), 2);
	assert_eq!(cells.ty.size(), 6);
	let row = cells.ty.elem().expect("row type");
	assert_eq!(row.len().expect("inner len"), 3);
	assert_eq!(row.elem().expect("cell type").kind(), Kind::Uint8);

	let names = ty.field(1).expect("names field");
	assert_eq!(names.ty.size(), 2 * POINTER_SIZE);
	assert_eq!(names.foreign_offset, 6);
}

#[test]
fn self_referential_pointer_resolves_lazily() {
	let ty = TypeDescriptor::of::<Node>().expect("Node resolves");
	assert_eq!(ty.size(), size_of::<Node>());

	let next = ty.field_by_name("next").expect("next field");
	assert_eq!(next.ty.kind(), Kind::Pointer);
	assert_eq!(next.ty.size(), POINTER_SIZE);

	let pointee = next.ty.elem().expect("pointee resolves");
	assert!(pointee.is_origin::<Node>());
	assert_eq!(pointee.num_field().expect("struct"), 2);
}

#[test]
fn complex_resolves_to_two_field_aggregate() {
	let ty = TypeDescriptor::of::<Complex128>().expect("complex resolves");
	assert_eq!(ty.kind(), Kind::Struct);
	assert_eq!(ty.size(), 16);
	let parts: Vec<(&str, Kind)> = ty.fields().expect("fields").iter().map(|field| (field.name, field.ty.kind())).collect();
	assert_eq!(parts, vec![("real", Kind::Float64), ("imag", Kind::Float64)]);
}

#[test]
fn scalars_use_native_widths() {
	let cases = [
		(resolve(&bool::host_type()), Kind::Bool, 1),
		(resolve(&isize::host_type()), Kind::Int, INT_SIZE),
		(resolve(&u16::host_type()), Kind::Uint16, 2),
		(resolve(&f32::host_type()), Kind::Float32, 4),
		(resolve(&crate::bridge::UintPtr::host_type()), Kind::UintPtr, POINTER_SIZE),
		(resolve(&<*mut std::ffi::c_void>::host_type()), Kind::UnsafePointer, POINTER_SIZE),
	];
	for (ty, kind, size) in cases {
		let ty = ty.expect("scalar resolves");
		assert_eq!(ty.kind(), kind);
		assert_eq!(ty.size(), size, "{kind}");
	}
}

#[test]
fn unsupported_host_kinds_are_rejected() {
	for kind in [HostKind::Chan, HostKind::Func, HostKind::Interface, HostKind::Map, HostKind::Native(Kind::Invalid)] {
		let host = HostType::unsupported::<HashMap<u8, u8>>(kind, "Lookup", module_path!());
		match resolve(&host) {
			Err(CTypeError::UnsupportedKind { kind: got, .. }) => assert_eq!(got, kind),
			other => panic!("expected UnsupportedKind for {kind:?}, got {other:?}"),
		}
	}
}

#[test]
fn unsupported_field_fails_whole_aggregate() {
	let mut host = Mixed::host_type();
	host.fields[2].ty = HostType::unsupported::<fn()>(HostKind::Func, "", "");
	assert!(matches!(resolve(&host), Err(CTypeError::UnsupportedKind { kind: HostKind::Func, .. })));
}

#[test]
fn depth_ceiling_is_enforced() {
	let options = ResolveOptions {
		max_depth: 3,
		..ResolveOptions::default()
	};
	assert!(resolve_with(&<[[u8; 2]; 2]>::host_type(), &options).is_ok());
	assert!(matches!(
		resolve_with(&<[[[u8; 2]; 2]; 2]>::host_type(), &options),
		Err(CTypeError::ResolveDepthExceeded { max_depth: 3 })
	));
}

#[test]
fn accessors_reject_wrong_kinds() {
	let scalar = TypeDescriptor::of::<i32>().expect("i32 resolves");
	assert!(matches!(scalar.elem(), Err(CTypeError::InvalidAccessor { op: "elem", kind: Kind::Int32 })));
	assert!(matches!(scalar.len(), Err(CTypeError::InvalidAccessor { op: "len", .. })));
	assert!(matches!(scalar.num_field(), Err(CTypeError::InvalidAccessor { op: "field", .. })));

	let ty = TypeDescriptor::of::<Mixed>().expect("Mixed resolves");
	assert!(matches!(ty.field(4), Err(CTypeError::FieldIndexOutOfRange { idx: 4, count: 4 })));
	assert!(matches!(ty.len(), Err(CTypeError::InvalidAccessor { op: "len", kind: Kind::Struct })));
}

#[test]
fn display_spells_c_types() {
	assert_eq!(TypeDescriptor::of::<i32>().expect("i32").to_string(), "int32_t");
	assert_eq!(TypeDescriptor::of::<Mixed>().expect("Mixed").to_string(), "struct Mixed");
	assert_eq!(TypeDescriptor::of::<[[u8; 3]; 2]>().expect("array").to_string(), "uint8_t[2][3]");
	assert_eq!(TypeDescriptor::of::<*const Node>().expect("pointer").to_string(), "struct Node*");
}

#[test]
fn descriptors_are_rebuilt_per_call() {
	let first = TypeDescriptor::of::<Mixed>().expect("first");
	let second = TypeDescriptor::of::<Mixed>().expect("second");
	assert_eq!(first.size(), second.size());
	assert!(first.origin().is::<Mixed>());
}

#[test]
fn of_val_resolves_operand_type() {
	let node = Node {
		value: 3,
		next: std::ptr::null(),
	};
	let ty = TypeDescriptor::of_val(&node).expect("Node resolves from a value");
	assert!(ty.is_origin::<Node>());
	assert_eq!(ty.size(), TypeDescriptor::of::<Node>().expect("Node resolves").size());
}
