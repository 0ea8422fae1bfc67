mod codec;
mod complex;
mod decode;
mod descriptor;
mod encode;
mod error;
mod foreign;
mod host;
mod impls;
mod kind;
mod layout;
mod resolve;
mod slice;
mod value;

/// Typed encoder/decoder façades and one-shot helpers.
pub use codec::{Decoder, Encoder, decode_into, encode, value_of, value_of_with};
/// Complex number host types.
pub use complex::{Complex128, Complex64};
/// Resolved descriptor types.
pub use descriptor::{StructField, TypeDescriptor};
/// Error and result aliases.
pub use error::{CTypeError, Result};
/// Owned foreign-heap text allocation.
pub use foreign::ForeignCString;
/// Host reflection trait and reflected views.
pub use host::{AddressSlot, CType, HostField, HostType, Reflected, ReflectedMut, SequenceSlot};
/// Address-carrying integer host type.
pub use impls::UintPtr;
/// Kind model and platform widths.
pub use kind::{HostKind, INT_SIZE, Kind, POINTER_ALIGN, POINTER_SIZE};
/// Layout options.
pub use layout::{Layout, ResolveOptions};
/// Resolver entry points.
pub use resolve::{resolve, resolve_with};
/// Sequence header host type.
pub use slice::CSlice;
/// Value buffer.
pub use value::Value;
