use cbridge::bridge::{CTypeError, Layout, ResolveOptions};
use thiserror::Error;

use crate::demo::DemoType;

pub mod layout;
pub mod roundtrip;
mod util;

/// Command result alias.
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// Failures surfaced by report commands.
#[derive(Debug, Error)]
pub(crate) enum CliError {
	/// Layout resolution or encode/decode failed.
	#[error(transparent)]
	Bridge(#[from] CTypeError),
	/// Report could not be rendered as JSON.
	#[error("failed to serialize report: {0}")]
	Json(#[from] serde_json::Error),
}

/// Shared switches for every report command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct ReportOptions {
	pub(crate) ty: DemoType,
	pub(crate) layout: Layout,
	pub(crate) json: bool,
}

impl ReportOptions {
	pub(crate) fn new(ty: DemoType, packed: bool, json: bool) -> Self {
		Self {
			ty,
			layout: if packed { Layout::Packed } else { Layout::Natural },
			json,
		}
	}

	pub(crate) fn resolve_options(&self) -> ResolveOptions {
		ResolveOptions {
			layout: self.layout,
			..ResolveOptions::default()
		}
	}
}
