//! `#[derive(CType)]`: host reflection for structs crossing the cbridge boundary.

mod attrs;
mod expand;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive `cbridge::bridge::CType` for a struct.
///
/// Field attributes: `#[ctype(rename = "...")]`, `#[ctype(tag = "...")]`, `#[ctype(anonymous)]`.
/// Container attribute: `#[ctype(name = "...")]`.
#[proc_macro_derive(CType, attributes(ctype))]
pub fn derive_ctype(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	let runtime = match expand::resolve_runtime_crate() {
		Ok(path) => path,
		Err(err) => return TokenStream::from(err.into_compile_error()),
	};
	match expand::expand(&input, &runtime) {
		Ok(tokens) => TokenStream::from(tokens),
		Err(err) => TokenStream::from(err.into_compile_error()),
	}
}
