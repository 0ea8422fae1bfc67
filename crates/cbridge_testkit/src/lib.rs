//! Shared fixture types and buffer readers for workspace tests.

use cbridge::CType;
use cbridge::bridge::{CSlice, Complex64, Complex128, UintPtr};

/// Three-field record used by the fixed-layout scenario.
#[derive(CType, Debug, Clone, PartialEq, Default)]
pub struct Sample {
	/// Integer field.
	pub i: i32,
	/// Text field.
	pub s: String,
	/// Inline doubles.
	pub a: [f64; 3],
}

impl Sample {
	/// The canonical `{257012, "32-42", [1.0, 2.0, 3.0]}` record.
	pub fn canonical() -> Self {
		Self {
			i: 257012,
			s: "32-42".to_owned(),
			a: [1.0, 2.0, 3.0],
		}
	}
}

/// Inner record reached through [`Event::t`].
#[derive(CType, Debug, Clone, PartialEq, Default)]
pub struct T1 {
	/// Leading integer.
	pub i0: isize,
	/// Text between integers.
	pub s0: String,
	/// Trailing integer.
	pub i1: isize,
	/// Double-precision value.
	pub f0: f64,
	/// First single-precision value.
	pub f1: f32,
	/// Second single-precision value.
	pub f2: f32,
}

/// Record mixing every composite kind.
#[derive(CType, Debug, Clone, PartialEq)]
pub struct Event {
	/// Native integer.
	pub i: isize,
	/// Double.
	pub f: f64,
	/// Borrowed sequence header.
	pub a: CSlice<f64>,
	/// Text.
	pub s: String,
	/// Inline doubles.
	pub b: [f64; 10],
	/// Address of an inner record.
	pub t: *const T1,
}

impl Default for Event {
	fn default() -> Self {
		Self {
			i: 0,
			f: 0.0,
			a: CSlice::empty(),
			s: String::new(),
			b: [0.0; 10],
			t: std::ptr::null(),
		}
	}
}

/// One field of every scalar kind.
#[derive(CType, Debug, Clone, Copy, PartialEq, Default)]
pub struct Scalars {
	/// `bool`.
	pub flag: bool,
	/// `isize`.
	pub int: isize,
	/// `i8`.
	pub int8: i8,
	/// `i16`.
	pub int16: i16,
	/// `i32`.
	pub int32: i32,
	/// `i64`.
	pub int64: i64,
	/// `usize`.
	pub uint: usize,
	/// `u8`.
	pub uint8: u8,
	/// `u16`.
	pub uint16: u16,
	/// `u32`.
	pub uint32: u32,
	/// `u64`.
	pub uint64: u64,
	/// Address integer.
	pub uintptr: UintPtr,
	/// `f32`.
	pub float32: f32,
	/// `f64`.
	pub float64: f64,
	/// Single-precision complex.
	pub complex64: Complex64,
	/// Double-precision complex.
	pub complex128: Complex128,
}

impl Scalars {
	/// Values with distinct non-zero bit patterns in every field.
	pub fn distinct() -> Self {
		Self {
			flag: true,
			int: -7,
			int8: -8,
			int16: -16_000,
			int32: -32_000_000,
			int64: -64_000_000_000,
			uint: 7,
			uint8: 200,
			uint16: 60_000,
			uint32: 4_000_000_000,
			uint64: u64::MAX - 1,
			uintptr: UintPtr(0xdead_beef),
			float32: 1.5,
			float64: -2.25,
			complex64: Complex64::new(0.5, -0.5),
			complex128: Complex128::new(3.0, 4.0),
		}
	}
}

/// Read a native-endian `i32` at `at`.
pub fn read_ne_i32(bytes: &[u8], at: usize) -> i32 {
	i32::from_ne_bytes(take(bytes, at))
}

/// Read a native-endian `usize` at `at`.
pub fn read_ne_usize(bytes: &[u8], at: usize) -> usize {
	usize::from_ne_bytes(take(bytes, at))
}

/// Read a native-endian `f64` at `at`.
pub fn read_ne_f64(bytes: &[u8], at: usize) -> f64 {
	f64::from_ne_bytes(take(bytes, at))
}

fn take<const N: usize>(bytes: &[u8], at: usize) -> [u8; N] {
	let mut out = [0_u8; N];
	out.copy_from_slice(&bytes[at..at + N]);
	out
}
