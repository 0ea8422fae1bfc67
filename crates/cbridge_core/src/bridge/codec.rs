use std::marker::PhantomData;

use crate::bridge::decode::decode_root;
use crate::bridge::encode::encode_root;
use crate::bridge::{CType, CTypeError, ResolveOptions, Result, TypeDescriptor, Value, resolve_with};

/// Writes values of `T` into one reusable [`Value`].
pub struct Encoder<'v, T> {
	value: &'v mut Value,
	_ty: PhantomData<fn(&T)>,
}

/// Reads values of `T` back out of one [`Value`].
pub struct Decoder<'v, T> {
	value: &'v mut Value,
	_ty: PhantomData<fn(&mut T)>,
}

fn bind<T: CType>(value: &Value) -> Result<()> {
	if value.descriptor().is_origin::<T>() {
		return Ok(());
	}
	Err(CTypeError::TypeMismatch {
		expected: value.descriptor().origin().type_name,
		got: std::any::type_name::<T>(),
	})
}

impl<'v, T: CType> Encoder<'v, T> {
	/// Bind to `value`, which must have been allocated for `T`.
	///
	/// A mismatched value is rejected and left untouched.
	pub fn new(value: &'v mut Value) -> Result<Self> {
		bind::<T>(value)?;
		Ok(Self { value, _ty: PhantomData })
	}

	/// Reset the bound value and encode `operand` into it.
	///
	/// The image and its text allocations stay valid until the next call.
	pub fn encode(&mut self, operand: &T) -> Result<&Value> {
		encode_root(self.value, operand)?;
		Ok(&*self.value)
	}

	/// Bound value.
	pub fn value(&self) -> &Value {
		&*self.value
	}
}

impl<'v, T: CType> Decoder<'v, T> {
	/// Bind to `value`, which must have been allocated for `T`.
	pub fn new(value: &'v mut Value) -> Result<Self> {
		bind::<T>(value)?;
		Ok(Self { value, _ty: PhantomData })
	}

	/// Rewind the bound value and rebuild `target` from it.
	pub fn decode(&mut self, target: &mut T) -> Result<&Value> {
		decode_root(self.value, target)?;
		Ok(&*self.value)
	}

	/// Bound value.
	pub fn value(&self) -> &Value {
		&*self.value
	}
}

/// Encode `operand` into a freshly allocated value with default options.
pub fn encode<T: CType>(operand: &T) -> Result<Value> {
	let mut value = Value::of::<T>()?;
	Encoder::new(&mut value)?.encode(operand)?;
	Ok(value)
}

/// Decode `value` into `target`.
pub fn decode_into<T: CType>(value: &mut Value, target: &mut T) -> Result<()> {
	Decoder::new(value)?.decode(target)?;
	Ok(())
}

/// Allocate a zeroed value for the type behind any chain of typed pointers.
pub fn value_of<T: CType>(operand: &T) -> Result<Value> {
	value_of_with(operand, &ResolveOptions::default())
}

/// Like [`value_of`], with explicit resolve options.
pub fn value_of_with<T: CType>(_operand: &T, options: &ResolveOptions) -> Result<Value> {
	let host = T::host_type().underlying();
	let ty: TypeDescriptor = resolve_with(&host, options)?;
	Ok(Value::new(ty))
}
