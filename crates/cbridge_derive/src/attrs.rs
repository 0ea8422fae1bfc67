use syn::{Attribute, LitStr};

/// Options from `#[ctype(...)]` on the struct itself.
#[derive(Debug, Default)]
pub(crate) struct ContainerAttrs {
	pub(crate) name: Option<String>,
}

/// Options from `#[ctype(...)]` on one field.
#[derive(Debug, Default)]
pub(crate) struct FieldAttrs {
	pub(crate) rename: Option<String>,
	pub(crate) tag: Option<String>,
	pub(crate) anonymous: bool,
}

impl ContainerAttrs {
	pub(crate) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
		let mut out = Self::default();
		for attr in attrs.iter().filter(|attr| attr.path().is_ident("ctype")) {
			attr.parse_nested_meta(|meta| {
				if meta.path.is_ident("name") {
					let lit: LitStr = meta.value()?.parse()?;
					out.name = Some(lit.value());
					Ok(())
				} else {
					Err(meta.error("unsupported container attribute; expected `name = \"...\"`"))
				}
			})?;
		}
		Ok(out)
	}
}

impl FieldAttrs {
	pub(crate) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
		let mut out = Self::default();
		for attr in attrs.iter().filter(|attr| attr.path().is_ident("ctype")) {
			attr.parse_nested_meta(|meta| {
				if meta.path.is_ident("rename") {
					let lit: LitStr = meta.value()?.parse()?;
					out.rename = Some(lit.value());
					Ok(())
				} else if meta.path.is_ident("tag") {
					let lit: LitStr = meta.value()?.parse()?;
					out.tag = Some(lit.value());
					Ok(())
				} else if meta.path.is_ident("anonymous") {
					out.anonymous = true;
					Ok(())
				} else {
					Err(meta.error("unsupported field attribute; expected `rename`, `tag`, or `anonymous`"))
				}
			})?;
		}
		Ok(out)
	}
}
