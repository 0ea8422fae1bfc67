use std::mem::offset_of;

use crate::bridge::{CType, HostField, HostType, Kind, Reflected, ReflectedMut};

/// Single-precision complex number, laid out as C `float _Complex`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Complex64 {
	/// Real part.
	pub real: f32,
	/// Imaginary part.
	pub imag: f32,
}

/// Double-precision complex number, laid out as C `double _Complex`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Complex128 {
	/// Real part.
	pub real: f64,
	/// Imaginary part.
	pub imag: f64,
}

macro_rules! complex_ctype {
	($ty:ident, $part:ty, $kind:ident, $name:literal) => {
		impl $ty {
			/// Build from real and imaginary parts.
			pub const fn new(real: $part, imag: $part) -> Self {
				Self { real, imag }
			}
		}

		impl CType for $ty {
			fn host_type() -> HostType {
				HostType::composite::<Self>(
					Kind::$kind,
					$name,
					"",
					vec![
						part_field::<$part>("real", offset_of!(Self, real), 0),
						part_field::<$part>("imag", offset_of!(Self, imag), 1),
					],
				)
			}

			fn reflect(&self) -> Reflected<'_> {
				Reflected::Struct(vec![self.real.reflect(), self.imag.reflect()])
			}

			fn reflect_mut(&mut self) -> ReflectedMut<'_> {
				ReflectedMut::Struct(vec![self.real.reflect_mut(), self.imag.reflect_mut()])
			}
		}
	};
}

complex_ctype!(Complex64, f32, Complex64, "complex64");
complex_ctype!(Complex128, f64, Complex128, "complex128");

fn part_field<T: CType>(name: &'static str, offset: usize, index: usize) -> HostField {
	HostField {
		name,
		pkg_path: "",
		ty: T::host_type(),
		tag: "",
		offset,
		index,
		anonymous: false,
	}
}
