use std::fmt;
use std::ptr;

use crate::bridge::{CType, HostType, Kind, Reflected, ReflectedMut, SequenceSlot};

/// Borrowed-by-address sequence header, the host side of the `Slice` kind.
///
/// Only the element count and the address of the first element cross the boundary;
/// element memory is never copied. The header is meaningful only inside the process that
/// produced it and only while the backing storage stays alive and unmoved.
#[repr(C)]
pub struct CSlice<T> {
	len: usize,
	data: *const T,
}

impl<T> CSlice<T> {
	/// Header with zero length and a null data pointer.
	pub const fn empty() -> Self {
		Self { len: 0, data: ptr::null() }
	}

	/// Build a header from raw parts.
	pub const fn from_raw_parts(data: *const T, len: usize) -> Self {
		Self { len, data }
	}

	/// Element count.
	pub fn len(&self) -> usize {
		self.len
	}

	/// Return whether the header describes no elements.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Address of the first element.
	pub fn as_ptr(&self) -> *const T {
		self.data
	}

	/// View the elements the header points at.
	///
	/// # Safety
	///
	/// `data` must point at `len` initialized elements that outlive `'a` and are not mutated
	/// for the duration of the borrow.
	pub unsafe fn as_slice<'a>(&self) -> &'a [T] {
		if self.data.is_null() || self.len == 0 {
			return &[];
		}
		// SAFETY: upheld by the caller.
		unsafe { std::slice::from_raw_parts(self.data, self.len) }
	}
}

impl<T> Clone for CSlice<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for CSlice<T> {}

impl<T> Default for CSlice<T> {
	fn default() -> Self {
		Self::empty()
	}
}

impl<T> PartialEq for CSlice<T> {
	fn eq(&self, other: &Self) -> bool {
		self.len == other.len && ptr::eq(self.data, other.data)
	}
}

impl<T> Eq for CSlice<T> {}

impl<T> fmt::Debug for CSlice<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CSlice").field("len", &self.len).field("data", &self.data).finish()
	}
}

impl<T> From<&[T]> for CSlice<T> {
	fn from(items: &[T]) -> Self {
		Self::from_raw_parts(items.as_ptr(), items.len())
	}
}

impl<T> From<&Vec<T>> for CSlice<T> {
	fn from(items: &Vec<T>) -> Self {
		Self::from(items.as_slice())
	}
}

impl<T: CType> CType for CSlice<T> {
	fn host_type() -> HostType {
		HostType::indirect::<Self>(Kind::Slice, Some(T::host_type))
	}

	fn reflect(&self) -> Reflected<'_> {
		Reflected::Slice {
			len: self.len,
			data: self.data.expose_provenance(),
		}
	}

	fn reflect_mut(&mut self) -> ReflectedMut<'_> {
		ReflectedMut::Slice(self)
	}
}

impl<T> SequenceSlot for CSlice<T> {
	fn set_header(&mut self, len: usize, data: usize) {
		self.len = len;
		self.data = ptr::with_exposed_provenance(data);
	}
}

#[cfg(test)]
mod tests {
	use super::CSlice;

	#[test]
	fn header_tracks_vec_storage() {
		let items = vec![1.0_f64, 2.0, 3.0];
		let header = CSlice::from(&items);
		assert_eq!(header.len(), 3);
		assert_eq!(header.as_ptr(), items.as_ptr());
		// SAFETY: `items` outlives the view and is not mutated.
		let view = unsafe { header.as_slice() };
		assert_eq!(view, &[1.0, 2.0, 3.0]);
	}

	#[test]
	fn empty_header_views_as_empty_slice() {
		let header = CSlice::<u8>::empty();
		assert!(header.is_empty());
		// SAFETY: null headers never dereference.
		assert!(unsafe { header.as_slice() }.is_empty());
	}
}
