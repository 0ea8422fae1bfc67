use crate::bridge::encode::{expect_kind, mismatch};
use crate::bridge::{CType, Kind, ReflectedMut, Result, TypeDescriptor, Value};

/// Rewind `value` and rebuild `target` from its foreign image.
///
/// The image and its owned text stay untouched.
pub(crate) fn decode_root<T: CType>(value: &mut Value, target: &mut T) -> Result<()> {
	let ty = value.descriptor().clone();
	value.rewind();
	decode_value(value, &ty, target.reflect_mut())?;
	log::debug!("decoded {} from {} bytes", ty, value.pos());
	Ok(())
}

macro_rules! read_scalar {
	($value:expr, $ty:expr, $kind:ident, $prim:ty, $slot:expr, $shape:expr) => {{
		expect_kind($ty, Kind::$kind, $shape)?;
		*$slot = <$prim>::from_ne_bytes($value.read_array()?);
		Ok(())
	}};
}

/// Read one destination at the cursor according to `ty`.
pub(crate) fn decode_value(value: &mut Value, ty: &TypeDescriptor, target: ReflectedMut<'_>) -> Result<()> {
	let shape = target.shape();
	match target {
		ReflectedMut::Bool(slot) => {
			expect_kind(ty, Kind::Bool, shape)?;
			let [byte] = value.read_array::<1>()?;
			*slot = byte != 0;
			Ok(())
		}
		ReflectedMut::Int(slot) => read_scalar!(value, ty, Int, isize, slot, shape),
		ReflectedMut::Int8(slot) => read_scalar!(value, ty, Int8, i8, slot, shape),
		ReflectedMut::Int16(slot) => read_scalar!(value, ty, Int16, i16, slot, shape),
		ReflectedMut::Int32(slot) => read_scalar!(value, ty, Int32, i32, slot, shape),
		ReflectedMut::Int64(slot) => read_scalar!(value, ty, Int64, i64, slot, shape),
		ReflectedMut::Uint(slot) => read_scalar!(value, ty, Uint, usize, slot, shape),
		ReflectedMut::Uint8(slot) => read_scalar!(value, ty, Uint8, u8, slot, shape),
		ReflectedMut::Uint16(slot) => read_scalar!(value, ty, Uint16, u16, slot, shape),
		ReflectedMut::Uint32(slot) => read_scalar!(value, ty, Uint32, u32, slot, shape),
		ReflectedMut::Uint64(slot) => read_scalar!(value, ty, Uint64, u64, slot, shape),
		ReflectedMut::UintPtr(slot) => read_scalar!(value, ty, UintPtr, usize, slot, shape),
		ReflectedMut::Float32(slot) => read_scalar!(value, ty, Float32, f32, slot, shape),
		ReflectedMut::Float64(slot) => read_scalar!(value, ty, Float64, f64, slot, shape),
		ReflectedMut::Pointer(slot) => {
			expect_kind(ty, Kind::Pointer, shape)?;
			slot.set_addr(usize::from_ne_bytes(value.read_array()?));
			Ok(())
		}
		ReflectedMut::UnsafePointer(slot) => {
			expect_kind(ty, Kind::UnsafePointer, shape)?;
			slot.set_addr(usize::from_ne_bytes(value.read_array()?));
			Ok(())
		}
		ReflectedMut::Slice(slot) => {
			expect_kind(ty, Kind::Slice, shape)?;
			let len = usize::from_ne_bytes(value.read_array()?);
			let data = usize::from_ne_bytes(value.read_array()?);
			slot.set_header(len, data);
			Ok(())
		}
		ReflectedMut::String(slot) => {
			expect_kind(ty, Kind::String, shape)?;
			*slot = value.read_text()?;
			Ok(())
		}
		ReflectedMut::Array(items) => {
			expect_kind(ty, Kind::Array, shape)?;
			let Some((elem, len)) = ty.array_parts() else {
				return Err(mismatch(ty, shape));
			};
			if items.len() != len {
				return Err(mismatch(ty, shape));
			}
			let start = value.pos();
			for (idx, item) in items.into_iter().enumerate() {
				value.seek(start + idx * elem.size())?;
				decode_value(value, elem, item)?;
			}
			value.seek(start + ty.size())
		}
		ReflectedMut::Struct(items) => {
			expect_kind(ty, Kind::Struct, shape)?;
			let Some(fields) = ty.struct_fields() else {
				return Err(mismatch(ty, shape));
			};
			if items.len() != fields.len() {
				return Err(mismatch(ty, shape));
			}
			let start = value.pos();
			for (field, item) in fields.iter().zip(items) {
				value.seek(start + field.foreign_offset)?;
				decode_value(value, &field.ty, item)?;
			}
			value.seek(start + ty.size())
		}
	}
}
