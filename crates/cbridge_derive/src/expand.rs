use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Index, Member, Path, Visibility};

use crate::attrs::{ContainerAttrs, FieldAttrs};

/// Locate the `cbridge` runtime crate from the caller's manifest.
pub(crate) fn resolve_runtime_crate() -> syn::Result<Path> {
	match crate_name("cbridge") {
		// The runtime names itself `cbridge` through `extern crate self`, which also covers its own test targets.
		Ok(FoundCrate::Itself) => Ok(syn::parse_quote!(::cbridge)),
		Ok(FoundCrate::Name(name)) => {
			let ident = syn::Ident::new(&name.replace('-', "_"), Span::call_site());
			Ok(syn::parse_quote!(::#ident))
		}
		Err(err) => Err(syn::Error::new(
			Span::call_site(),
			format!("could not resolve the cbridge runtime crate: {err}"),
		)),
	}
}

/// Generate the `CType` impl for one struct.
pub(crate) fn expand(input: &DeriveInput, runtime: &Path) -> syn::Result<TokenStream> {
	let data = match &input.data {
		Data::Struct(data) => data,
		Data::Enum(data) => return Err(syn::Error::new(data.enum_token.span(), "CType can only be derived for structs")),
		Data::Union(data) => return Err(syn::Error::new(data.union_token.span(), "CType can only be derived for structs")),
	};
	if let Some(lifetime) = input.generics.lifetimes().next() {
		return Err(syn::Error::new(lifetime.span(), "CType cannot be derived for types with lifetime parameters"));
	}

	reject_packed_repr(input)?;

	let container = ContainerAttrs::parse(&input.attrs)?;
	let ident = &input.ident;
	let type_name = container.name.unwrap_or_else(|| ident.unraw().to_string());

	let mut generics = input.generics.clone();
	for param in generics.type_params_mut() {
		param.bounds.push(syn::parse_quote!(#runtime::bridge::CType));
	}
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

	let mut host_fields = Vec::with_capacity(data.fields.len());
	let mut reflect = Vec::with_capacity(data.fields.len());
	let mut reflect_mut = Vec::with_capacity(data.fields.len());

	for (index, field) in data.fields.iter().enumerate() {
		let attrs = FieldAttrs::parse(&field.attrs)?;
		let member = match &field.ident {
			Some(ident) => Member::Named(ident.clone()),
			None => Member::Unnamed(Index::from(index)),
		};
		let name = attrs.rename.unwrap_or_else(|| match &field.ident {
			Some(ident) => ident.unraw().to_string(),
			None => index.to_string(),
		});
		let tag = attrs.tag.unwrap_or_default();
		let anonymous = attrs.anonymous;
		let ty = &field.ty;
		let pkg_path = match field.vis {
			Visibility::Public(_) => quote!(""),
			_ => quote!(::core::module_path!()),
		};

		host_fields.push(quote! {
			#runtime::bridge::HostField {
				name: #name,
				pkg_path: #pkg_path,
				ty: <#ty as #runtime::bridge::CType>::host_type(),
				tag: #tag,
				offset: ::core::mem::offset_of!(Self, #member),
				index: #index,
				anonymous: #anonymous,
			}
		});
		reflect.push(quote!(#runtime::bridge::CType::reflect(&self.#member)));
		reflect_mut.push(quote!(#runtime::bridge::CType::reflect_mut(&mut self.#member)));
	}

	Ok(quote! {
		impl #impl_generics #runtime::bridge::CType for #ident #ty_generics #where_clause {
			fn host_type() -> #runtime::bridge::HostType {
				#runtime::bridge::HostType::aggregate::<Self>(
					#type_name,
					::core::module_path!(),
					::std::vec![#(#host_fields),*],
				)
			}

			fn reflect(&self) -> #runtime::bridge::Reflected<'_> {
				#runtime::bridge::Reflected::Struct(::std::vec![#(#reflect),*])
			}

			fn reflect_mut(&mut self) -> #runtime::bridge::ReflectedMut<'_> {
				#runtime::bridge::ReflectedMut::Struct(::std::vec![#(#reflect_mut),*])
			}
		}
	})
}

/// Field references into `repr(packed)` structs may be unaligned, which the generated reflection cannot take.
fn reject_packed_repr(input: &DeriveInput) -> syn::Result<()> {
	for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("repr")) {
		let mut packed = false;
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("packed") {
				packed = true;
			}
			if meta.input.peek(syn::token::Paren) {
				let content;
				syn::parenthesized!(content in meta.input);
				let _: TokenStream = content.parse()?;
			}
			Ok(())
		})?;
		if packed {
			return Err(syn::Error::new(
				attr.span(),
				"CType cannot be derived for `repr(packed)` structs; use `ResolveOptions::packed()` for an unpadded foreign layout",
			));
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use syn::{DeriveInput, Path, parse_quote};

	use super::expand;

	fn runtime() -> Path {
		parse_quote!(::cbridge)
	}

	fn expand_err(input: DeriveInput) -> String {
		expand(&input, &runtime()).expect_err("expansion should fail").to_string()
	}

	#[test]
	fn named_struct_expands_field_table() {
		let input: DeriveInput = parse_quote! {
			struct Sample {
				pub i: i32,
				#[ctype(rename = "text", tag = "note")]
				s: String,
			}
		};
		let tokens = expand(&input, &runtime()).expect("struct expands").to_string();
		assert!(tokens.contains("HostType :: aggregate :: < Self >"));
		assert!(tokens.contains("\"Sample\""));
		assert!(tokens.contains("\"text\""));
		assert!(tokens.contains("\"note\""));
		assert!(tokens.contains("offset_of ! (Self , i)"));
		assert!(tokens.contains("offset_of ! (Self , s)"));
	}

	#[test]
	fn tuple_struct_uses_positional_members() {
		let input: DeriveInput = parse_quote! {
			struct Pair(u8, #[ctype(anonymous)] u16);
		};
		let tokens = expand(&input, &runtime()).expect("tuple struct expands").to_string();
		assert!(tokens.contains("offset_of ! (Self , 1)"));
		assert!(tokens.contains("self . 0"));
		assert!(tokens.contains("anonymous : true"));
	}

	#[test]
	fn container_name_overrides_ident() {
		let input: DeriveInput = parse_quote! {
			#[ctype(name = "event_t")]
			struct Event {
				i: isize,
			}
		};
		let tokens = expand(&input, &runtime()).expect("struct expands").to_string();
		assert!(tokens.contains("\"event_t\""));
	}

	#[test]
	fn type_params_gain_ctype_bound() {
		let input: DeriveInput = parse_quote! {
			struct Wrap<T> {
				inner: T,
			}
		};
		let tokens = expand(&input, &runtime()).expect("generic struct expands").to_string();
		assert!(tokens.contains("impl < T : :: cbridge :: bridge :: CType >"));
	}

	#[test]
	fn rejects_enums_and_lifetimes() {
		let err = expand_err(parse_quote! {
			enum Choice {
				A,
			}
		});
		assert!(err.contains("only be derived for structs"));

		let err = expand_err(parse_quote! {
			struct Borrowed<'a> {
				s: &'a str,
			}
		});
		assert!(err.contains("lifetime parameters"));
	}

	#[test]
	fn rejects_packed_repr() {
		let err = expand_err(parse_quote! {
			#[repr(C, packed)]
			struct Tight {
				a: u8,
				b: u32,
			}
		});
		assert!(err.contains("repr(packed)"));

		let err = expand_err(parse_quote! {
			#[repr(packed(2))]
			struct Pair {
				a: u8,
				b: u32,
			}
		});
		assert!(err.contains("repr(packed)"));
	}

	#[test]
	fn accepts_other_reprs() {
		let input: DeriveInput = parse_quote! {
			#[repr(C, align(8))]
			struct Aligned {
				a: u8,
			}
		};
		assert!(expand(&input, &runtime()).is_ok());
	}

	#[test]
	fn rejects_unknown_field_attribute() {
		let err = expand_err(parse_quote! {
			struct Sample {
				#[ctype(align = 8)]
				i: i32,
			}
		});
		assert!(err.contains("unsupported field attribute"));
	}
}
