use std::collections::BTreeMap;
use std::ffi::CStr;
use std::fmt;

use crate::bridge::kind::POINTER_SIZE;
use crate::bridge::{CType, CTypeError, ForeignCString, ResolveOptions, Result, TypeDescriptor};

/// Foreign memory image of one value plus the text allocations it owns.
///
/// The buffer is exactly [`TypeDescriptor::size`] bytes. Text fields are written as
/// pointers into C-heap copies that the value owns; they are freed by [`Value::reset`]
/// or when the value is dropped.
pub struct Value {
	buf: Vec<u8>,
	ty: TypeDescriptor,
	pos: usize,
	cstrings: BTreeMap<usize, ForeignCString>,
}

impl Value {
	/// Allocate a zeroed image for `ty`.
	pub fn new(ty: TypeDescriptor) -> Self {
		log::debug!("allocated value for {} ({} bytes)", ty, ty.size());
		Self {
			buf: vec![0; ty.size()],
			ty,
			pos: 0,
			cstrings: BTreeMap::new(),
		}
	}

	/// Resolve `T` with default options and allocate a zeroed image.
	pub fn of<T: CType>() -> Result<Self> {
		Ok(Self::new(TypeDescriptor::of::<T>()?))
	}

	/// Resolve `T` with explicit options and allocate a zeroed image.
	pub fn of_with<T: CType>(options: &ResolveOptions) -> Result<Self> {
		Ok(Self::new(TypeDescriptor::of_with::<T>(options)?))
	}

	/// Free every owned text allocation, zero the buffer, and rewind the cursor.
	pub fn reset(&mut self) {
		if !self.cstrings.is_empty() {
			log::trace!("releasing {} owned text allocation(s)", self.cstrings.len());
		}
		self.cstrings.clear();
		self.buf.fill(0);
		self.pos = 0;
	}

	/// Read-only view of the foreign image.
	pub fn buffer(&self) -> &[u8] {
		&self.buf
	}

	/// Descriptor the image was allocated for; the type of the value.
	pub fn descriptor(&self) -> &TypeDescriptor {
		&self.ty
	}

	/// Return current cursor offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return bytes between the cursor and the end of the image.
	pub fn remaining(&self) -> usize {
		self.buf.len().saturating_sub(self.pos)
	}

	/// Number of text allocations currently owned.
	pub fn owned_text_count(&self) -> usize {
		self.cstrings.len()
	}

	/// Borrow the owned text whose pointer is stored at `offset`.
	///
	/// The borrow ties the view to this value, so it cannot outlive a reset.
	pub fn text_at(&self, offset: usize) -> Option<&CStr> {
		self.cstrings.get(&offset).map(ForeignCString::as_c_str)
	}

	pub(crate) fn rewind(&mut self) {
		self.pos = 0;
	}

	pub(crate) fn seek(&mut self, pos: usize) -> Result<()> {
		if pos > self.buf.len() {
			return Err(CTypeError::BufferOverrun {
				at: self.pos,
				need: pos - self.pos,
				rem: self.remaining(),
			});
		}
		self.pos = pos;
		Ok(())
	}

	fn claim(&mut self, n: usize) -> Result<usize> {
		if n > self.remaining() {
			return Err(CTypeError::BufferOverrun {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}
		let start = self.pos;
		self.pos += n;
		Ok(start)
	}

	/// Copy `bytes` at the cursor and advance.
	pub(crate) fn write(&mut self, bytes: &[u8]) -> Result<()> {
		let start = self.claim(bytes.len())?;
		self.buf[start..self.pos].copy_from_slice(bytes);
		Ok(())
	}

	/// Read `N` bytes at the cursor and advance.
	pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let start = self.claim(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(&self.buf[start..self.pos]);
		Ok(out)
	}

	/// Copy `text` to the C heap, take ownership, and write its address at the cursor.
	pub(crate) fn write_text(&mut self, text: &str) -> Result<()> {
		if self.remaining() < POINTER_SIZE {
			return Err(CTypeError::BufferOverrun {
				at: self.pos,
				need: POINTER_SIZE,
				rem: self.remaining(),
			});
		}
		let at = self.pos;
		let owned = ForeignCString::copy_from(text)?;
		self.write(&owned.addr().to_ne_bytes())?;
		self.cstrings.insert(at, owned);
		Ok(())
	}

	/// Read the text pointer at the cursor and copy the owned allocation it names.
	pub(crate) fn read_text(&mut self) -> Result<String> {
		let at = self.pos;
		let addr = usize::from_ne_bytes(self.read_array()?);
		if addr == 0 {
			return Ok(String::new());
		}
		match self.cstrings.get(&at) {
			Some(owned) if owned.addr() == addr => Ok(owned.to_string_lossy()),
			_ => Err(CTypeError::UnownedText { offset: at }),
		}
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Value")
			.field("ty", &self.ty)
			.field("len", &self.buf.len())
			.field("pos", &self.pos)
			.field("owned_text", &self.cstrings.len())
			.finish()
	}
}

#[cfg(test)]
mod tests;
