use std::ffi::{CStr, c_char};
use std::fmt;
use std::ptr::{self, NonNull};

use crate::bridge::{CTypeError, Result};

/// NUL-terminated copy of host text allocated on the C heap.
///
/// The allocation is released with `free` when the value is dropped.
pub struct ForeignCString {
	ptr: NonNull<c_char>,
	len: usize,
}

impl ForeignCString {
	/// Copy `text` plus a terminating NUL into a fresh `malloc` allocation.
	pub fn copy_from(text: &str) -> Result<Self> {
		let size = text.len() + 1;
		// SAFETY: `malloc` has no preconditions; a null result is handled below.
		let raw = unsafe { libc::malloc(size) }.cast::<c_char>();
		let ptr = NonNull::new(raw).ok_or(CTypeError::ForeignAllocFailed { size })?;

		// SAFETY: the allocation holds `size` bytes and cannot overlap `text`.
		unsafe {
			ptr::copy_nonoverlapping(text.as_ptr(), ptr.as_ptr().cast::<u8>(), text.len());
			ptr.as_ptr().add(text.len()).write(0);
		}

		log::trace!("allocated foreign string at {:p} ({size} bytes)", ptr);
		Ok(Self { ptr, len: text.len() })
	}

	/// Pointer handed to foreign code.
	pub fn as_ptr(&self) -> *const c_char {
		self.ptr.as_ptr()
	}

	/// Address of the allocation as an integer.
	pub fn addr(&self) -> usize {
		self.ptr.as_ptr().expose_provenance()
	}

	/// Byte length without the terminator.
	pub fn len(&self) -> usize {
		self.len
	}

	/// Return whether the copied text was empty.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Copied bytes without the terminator, including any interior NUL.
	pub fn as_bytes(&self) -> &[u8] {
		// SAFETY: the allocation holds `len` initialized bytes for as long as `self` lives.
		unsafe { std::slice::from_raw_parts(self.ptr.as_ptr().cast::<u8>(), self.len) }
	}

	/// View as a C string, ending at the first NUL.
	pub fn as_c_str(&self) -> &CStr {
		// SAFETY: the allocation is NUL-terminated and lives as long as `self`.
		unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
	}

	/// Copy the text back into host memory.
	pub fn to_string_lossy(&self) -> String {
		String::from_utf8_lossy(self.as_bytes()).into_owned()
	}
}

impl Drop for ForeignCString {
	fn drop(&mut self) {
		log::trace!("freeing foreign string at {:p}", self.ptr);
		// SAFETY: the pointer came from `malloc` and is freed exactly once here.
		unsafe { libc::free(self.ptr.as_ptr().cast()) };
	}
}

impl fmt::Debug for ForeignCString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ForeignCString")
			.field("ptr", &self.ptr)
			.field("text", &String::from_utf8_lossy(self.as_bytes()))
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::ForeignCString;

	#[test]
	fn copy_is_nul_terminated() {
		let text = ForeignCString::copy_from("32-42").expect("allocation succeeds");
		assert_eq!(text.len(), 5);
		assert_eq!(text.as_c_str().to_bytes(), b"32-42");
		assert_eq!(text.as_c_str().to_bytes_with_nul().last(), Some(&0));
	}

	#[test]
	fn interior_nul_truncates_c_view_only() {
		let text = ForeignCString::copy_from("ab\0cd").expect("allocation succeeds");
		assert_eq!(text.as_c_str().to_bytes(), b"ab");
		assert_eq!(text.to_string_lossy(), "ab\0cd");
	}

	#[test]
	fn empty_text_still_allocates_terminator() {
		let text = ForeignCString::copy_from("").expect("allocation succeeds");
		assert!(text.is_empty());
		assert_ne!(text.addr(), 0);
		assert!(text.as_c_str().is_empty());
	}
}
