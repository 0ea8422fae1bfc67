use std::collections::HashMap;

use crate::bridge::descriptor::Shape;
use crate::bridge::kind::{INT_SIZE, POINTER_ALIGN, POINTER_SIZE};
use crate::bridge::layout::FieldPlacer;
use crate::bridge::{CTypeError, HostKind, HostType, Kind, ResolveOptions, Result, StructField, TypeDescriptor};

/// Resolve a host type into a foreign-layout descriptor with default options.
pub fn resolve(host: &HostType) -> Result<TypeDescriptor> {
	resolve_with(host, &ResolveOptions::default())
}

/// Resolve a host type into a foreign-layout descriptor.
///
/// Every call derives a fresh descriptor; nothing is cached. Pointer and slice element types
/// are left unresolved until [`TypeDescriptor::elem`] asks for them.
pub fn resolve_with(host: &HostType, options: &ResolveOptions) -> Result<TypeDescriptor> {
	let ty = resolve_impl(host, options, 0)?;
	log::debug!(
		"resolved {} as {} (size={}, align={}, layout={})",
		host.type_name,
		ty.kind(),
		ty.size(),
		ty.align(),
		options.layout.as_str()
	);
	Ok(ty)
}

fn resolve_impl(host: &HostType, options: &ResolveOptions, depth: u32) -> Result<TypeDescriptor> {
	if depth >= options.max_depth {
		return Err(CTypeError::ResolveDepthExceeded { max_depth: options.max_depth });
	}

	let HostKind::Native(kind) = host.kind else {
		return Err(unsupported(host));
	};

	match kind {
		Kind::Invalid => Err(unsupported(host)),
		Kind::Struct | Kind::Complex64 | Kind::Complex128 => resolve_struct(host, options, depth),
		Kind::Array => resolve_array(host, options, depth),
		Kind::Pointer | Kind::UnsafePointer => Ok(TypeDescriptor::from_parts(host, kind, POINTER_SIZE, POINTER_ALIGN, *options, Shape::Indirect)),
		Kind::Slice => Ok(TypeDescriptor::from_parts(
			host,
			kind,
			INT_SIZE + POINTER_SIZE,
			POINTER_ALIGN,
			*options,
			Shape::Indirect,
		)),
		Kind::String => Ok(TypeDescriptor::from_parts(host, kind, POINTER_SIZE, POINTER_ALIGN, *options, Shape::Scalar)),
		Kind::Bool
		| Kind::Int
		| Kind::Int8
		| Kind::Int16
		| Kind::Int32
		| Kind::Int64
		| Kind::Uint
		| Kind::Uint8
		| Kind::Uint16
		| Kind::Uint32
		| Kind::Uint64
		| Kind::UintPtr
		| Kind::Float32
		| Kind::Float64 => {
			let size = kind.scalar_width().unwrap_or(host.size);
			Ok(TypeDescriptor::from_parts(host, kind, size, host.align.max(1), *options, Shape::Scalar))
		}
	}
}

fn resolve_array(host: &HostType, options: &ResolveOptions, depth: u32) -> Result<TypeDescriptor> {
	let elem_host = host.elem_type().ok_or(CTypeError::InvalidAccessor { op: "elem", kind: Kind::Array })?;
	let elem = resolve_impl(&elem_host, options, depth + 1)?;
	let size = elem.size() * host.len;
	let align = elem.align();
	Ok(TypeDescriptor::from_parts(
		host,
		Kind::Array,
		size,
		align,
		*options,
		Shape::Array { elem, len: host.len },
	))
}

fn resolve_struct(host: &HostType, options: &ResolveOptions, depth: u32) -> Result<TypeDescriptor> {
	let mut placer = FieldPlacer::new(options.layout);
	let mut fields = Vec::with_capacity(host.fields.len());
	let mut by_name = HashMap::with_capacity(host.fields.len());

	for (idx, field) in host.fields.iter().enumerate() {
		let ty = resolve_impl(&field.ty, options, depth + 1)?;
		let foreign_offset = placer.place(ty.size(), ty.align());
		by_name.insert(field.name, idx);
		fields.push(StructField {
			name: field.name,
			pkg_path: field.pkg_path,
			ty,
			tag: field.tag,
			offset: field.offset,
			foreign_offset,
			index: vec![field.index],
			anonymous: field.anonymous,
		});
	}

	let (size, align) = placer.finish();
	Ok(TypeDescriptor::from_parts(host, Kind::Struct, size, align, *options, Shape::Struct { fields, by_name }))
}

fn unsupported(host: &HostType) -> CTypeError {
	CTypeError::UnsupportedKind {
		kind: host.kind,
		type_name: host.type_name,
	}
}

#[cfg(test)]
mod tests;
