use std::fmt::Write;

use serde::Serialize;

use crate::cmd::Result;

/// Render bytes as contiguous lowercase hex.
pub(crate) fn hex_bytes(bytes: &[u8]) -> String {
	let mut out = String::with_capacity(bytes.len() * 2);
	for byte in bytes {
		let _ = write!(out, "{byte:02x}");
	}
	out
}

/// Render bytes as hex rows of `width` bytes, each prefixed with its offset.
pub(crate) fn hex_rows(bytes: &[u8], width: usize) -> Vec<String> {
	bytes
		.chunks(width.max(1))
		.enumerate()
		.map(|(row, chunk)| {
			let cells: Vec<String> = chunk.iter().map(|byte| format!("{byte:02x}")).collect();
			format!("{:04x}: {}", row * width.max(1), cells.join(" "))
		})
		.collect()
}

/// Render a report as pretty JSON.
pub(crate) fn render_json<T: Serialize>(report: &T) -> Result<String> {
	Ok(serde_json::to_string_pretty(report)?)
}

/// Print a report as pretty JSON.
pub(crate) fn print_json<T: Serialize>(report: &T) -> Result<()> {
	println!("{}", render_json(report)?);
	Ok(())
}
