use crate::bridge::{CType, CTypeError, Kind, Reflected, Result, TypeDescriptor, Value};

/// Reset `value` and write `operand` as its foreign image.
///
/// On failure the value is reset again, so no partial image or text allocation survives.
pub(crate) fn encode_root<T: CType>(value: &mut Value, operand: &T) -> Result<()> {
	let ty = value.descriptor().clone();
	value.reset();
	if let Err(err) = encode_value(value, &ty, &operand.reflect()) {
		value.reset();
		return Err(err);
	}
	debug_assert_eq!(value.pos(), ty.size(), "encode must fill the image exactly");
	log::debug!("encoded {} into {} bytes ({} owned text)", ty, value.pos(), value.owned_text_count());
	Ok(())
}

/// Write one operand at the cursor according to `ty`.
pub(crate) fn encode_value(value: &mut Value, ty: &TypeDescriptor, operand: &Reflected<'_>) -> Result<()> {
	match operand {
		Reflected::Bool(v) => put(value, ty, Kind::Bool, operand, &[u8::from(*v)]),
		Reflected::Int(v) => put(value, ty, Kind::Int, operand, &v.to_ne_bytes()),
		Reflected::Int8(v) => put(value, ty, Kind::Int8, operand, &v.to_ne_bytes()),
		Reflected::Int16(v) => put(value, ty, Kind::Int16, operand, &v.to_ne_bytes()),
		Reflected::Int32(v) => put(value, ty, Kind::Int32, operand, &v.to_ne_bytes()),
		Reflected::Int64(v) => put(value, ty, Kind::Int64, operand, &v.to_ne_bytes()),
		Reflected::Uint(v) => put(value, ty, Kind::Uint, operand, &v.to_ne_bytes()),
		Reflected::Uint8(v) => put(value, ty, Kind::Uint8, operand, &v.to_ne_bytes()),
		Reflected::Uint16(v) => put(value, ty, Kind::Uint16, operand, &v.to_ne_bytes()),
		Reflected::Uint32(v) => put(value, ty, Kind::Uint32, operand, &v.to_ne_bytes()),
		Reflected::Uint64(v) => put(value, ty, Kind::Uint64, operand, &v.to_ne_bytes()),
		Reflected::UintPtr(v) => put(value, ty, Kind::UintPtr, operand, &v.to_ne_bytes()),
		Reflected::Float32(v) => put(value, ty, Kind::Float32, operand, &v.to_ne_bytes()),
		Reflected::Float64(v) => put(value, ty, Kind::Float64, operand, &v.to_ne_bytes()),
		Reflected::Pointer(addr) => put(value, ty, Kind::Pointer, operand, &addr.to_ne_bytes()),
		Reflected::UnsafePointer(addr) => put(value, ty, Kind::UnsafePointer, operand, &addr.to_ne_bytes()),
		Reflected::Slice { len, data } => {
			expect_kind(ty, Kind::Slice, operand.shape())?;
			value.write(&len.to_ne_bytes())?;
			value.write(&data.to_ne_bytes())
		}
		Reflected::String(text) => {
			expect_kind(ty, Kind::String, operand.shape())?;
			value.write_text(text)
		}
		Reflected::Array(items) => {
			expect_kind(ty, Kind::Array, operand.shape())?;
			let Some((elem, len)) = ty.array_parts() else {
				return Err(mismatch(ty, operand.shape()));
			};
			if items.len() != len {
				return Err(mismatch(ty, operand.shape()));
			}
			let start = value.pos();
			for (idx, item) in items.iter().enumerate() {
				value.seek(start + idx * elem.size())?;
				encode_value(value, elem, item)?;
			}
			value.seek(start + ty.size())
		}
		Reflected::Struct(items) => {
			expect_kind(ty, Kind::Struct, operand.shape())?;
			let Some(fields) = ty.struct_fields() else {
				return Err(mismatch(ty, operand.shape()));
			};
			if items.len() != fields.len() {
				return Err(mismatch(ty, operand.shape()));
			}
			let start = value.pos();
			for (field, item) in fields.iter().zip(items) {
				value.seek(start + field.foreign_offset)?;
				encode_value(value, &field.ty, item)?;
			}
			value.seek(start + ty.size())
		}
	}
}

fn put(value: &mut Value, ty: &TypeDescriptor, want: Kind, operand: &Reflected<'_>, bytes: &[u8]) -> Result<()> {
	expect_kind(ty, want, operand.shape())?;
	value.write(bytes)
}

/// Check that the descriptor at the cursor has the kind the operand reflected.
pub(crate) fn expect_kind(ty: &TypeDescriptor, want: Kind, shape: &'static str) -> Result<()> {
	if ty.kind() == want { Ok(()) } else { Err(mismatch(ty, shape)) }
}

pub(crate) fn mismatch(ty: &TypeDescriptor, shape: &'static str) -> CTypeError {
	CTypeError::OperandMismatch {
		expected: ty.kind(),
		got: shape,
	}
}
