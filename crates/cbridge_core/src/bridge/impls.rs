use std::ffi::c_void;
use std::ptr;

use crate::bridge::{AddressSlot, CType, HostType, Kind, Reflected, ReflectedMut};

/// Pointer-sized unsigned integer that carries an address rather than a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct UintPtr(pub usize);

macro_rules! scalar_ctype {
	($ty:ty, $kind:ident, $name:literal) => {
		impl CType for $ty {
			fn host_type() -> HostType {
				HostType::scalar::<Self>(Kind::$kind, $name)
			}

			fn reflect(&self) -> Reflected<'_> {
				Reflected::$kind(*self)
			}

			fn reflect_mut(&mut self) -> ReflectedMut<'_> {
				ReflectedMut::$kind(self)
			}
		}
	};
}

scalar_ctype!(bool, Bool, "bool");
scalar_ctype!(isize, Int, "isize");
scalar_ctype!(i8, Int8, "i8");
scalar_ctype!(i16, Int16, "i16");
scalar_ctype!(i32, Int32, "i32");
scalar_ctype!(i64, Int64, "i64");
scalar_ctype!(usize, Uint, "usize");
scalar_ctype!(u8, Uint8, "u8");
scalar_ctype!(u16, Uint16, "u16");
scalar_ctype!(u32, Uint32, "u32");
scalar_ctype!(u64, Uint64, "u64");
scalar_ctype!(f32, Float32, "f32");
scalar_ctype!(f64, Float64, "f64");

impl CType for UintPtr {
	fn host_type() -> HostType {
		HostType::scalar::<Self>(Kind::UintPtr, "UintPtr")
	}

	fn reflect(&self) -> Reflected<'_> {
		Reflected::UintPtr(self.0)
	}

	fn reflect_mut(&mut self) -> ReflectedMut<'_> {
		ReflectedMut::UintPtr(&mut self.0)
	}
}

impl CType for String {
	fn host_type() -> HostType {
		HostType::scalar::<Self>(Kind::String, "String")
	}

	fn reflect(&self) -> Reflected<'_> {
		Reflected::String(self.as_str())
	}

	fn reflect_mut(&mut self) -> ReflectedMut<'_> {
		ReflectedMut::String(self)
	}
}

impl<T: CType, const N: usize> CType for [T; N] {
	fn host_type() -> HostType {
		HostType::array::<Self>(T::host_type, N)
	}

	fn reflect(&self) -> Reflected<'_> {
		Reflected::Array(self.iter().map(CType::reflect).collect())
	}

	fn reflect_mut(&mut self) -> ReflectedMut<'_> {
		ReflectedMut::Array(self.iter_mut().map(CType::reflect_mut).collect())
	}
}

impl<T: CType> CType for *const T {
	fn host_type() -> HostType {
		HostType::indirect::<Self>(Kind::Pointer, Some(T::host_type))
	}

	fn reflect(&self) -> Reflected<'_> {
		Reflected::Pointer(self.expose_provenance())
	}

	fn reflect_mut(&mut self) -> ReflectedMut<'_> {
		ReflectedMut::Pointer(self)
	}
}

impl<T: CType> CType for *mut T {
	fn host_type() -> HostType {
		HostType::indirect::<Self>(Kind::Pointer, Some(T::host_type))
	}

	fn reflect(&self) -> Reflected<'_> {
		Reflected::Pointer(self.expose_provenance())
	}

	fn reflect_mut(&mut self) -> ReflectedMut<'_> {
		ReflectedMut::Pointer(self)
	}
}

impl CType for *const c_void {
	fn host_type() -> HostType {
		HostType::indirect::<Self>(Kind::UnsafePointer, None)
	}

	fn reflect(&self) -> Reflected<'_> {
		Reflected::UnsafePointer(self.expose_provenance())
	}

	fn reflect_mut(&mut self) -> ReflectedMut<'_> {
		ReflectedMut::UnsafePointer(self)
	}
}

impl CType for *mut c_void {
	fn host_type() -> HostType {
		HostType::indirect::<Self>(Kind::UnsafePointer, None)
	}

	fn reflect(&self) -> Reflected<'_> {
		Reflected::UnsafePointer(self.expose_provenance())
	}

	fn reflect_mut(&mut self) -> ReflectedMut<'_> {
		ReflectedMut::UnsafePointer(self)
	}
}

impl<T> AddressSlot for *const T {
	fn set_addr(&mut self, addr: usize) {
		*self = ptr::with_exposed_provenance(addr);
	}
}

impl<T> AddressSlot for *mut T {
	fn set_addr(&mut self, addr: usize) {
		*self = ptr::with_exposed_provenance_mut(addr);
	}
}
