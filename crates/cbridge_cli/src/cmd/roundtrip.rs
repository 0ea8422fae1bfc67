use std::fmt::Debug;

use cbridge::bridge::{CType, Decoder, Encoder, Kind, Value};

use crate::cmd::{ReportOptions, Result};
use crate::cmd::util::{hex_bytes, hex_rows, print_json};
use crate::demo::{self, DemoType};

pub fn run(options: ReportOptions) -> Result<()> {
	let report = build_report(options)?;
	if options.json {
		return print_json(&report);
	}

	println!("type: {}", report.type_name);
	println!("layout: {}", report.layout);
	println!("size: {}", report.size);
	println!("owned_text: {}", report.owned_text);
	for text in &report.texts {
		println!("  +{} {:?}", text.offset, text.text);
	}
	println!("bytes:");
	for row in hex_rows(&report.bytes, 16) {
		println!("  {row}");
	}
	println!("roundtrip_equal: {}", report.equal);
	Ok(())
}

pub(crate) fn build_report(options: ReportOptions) -> Result<RoundtripJson> {
	let resolve = options.resolve_options();
	match options.ty {
		DemoType::Event => {
			let items = [0.25, 0.5, 0.75];
			let inner = demo::t1();
			let source = demo::event(&items, &inner);
			roundtrip(options.ty, &source, Value::of_with::<demo::Event>(&resolve)?)
		}
		DemoType::T1 => roundtrip(options.ty, &demo::t1(), Value::of_with::<demo::T1>(&resolve)?),
		DemoType::Sample => roundtrip(options.ty, &demo::sample(), Value::of_with::<demo::Sample>(&resolve)?),
	}
}

fn roundtrip<T>(demo: DemoType, source: &T, mut value: Value) -> Result<RoundtripJson>
where
	T: CType + Default + PartialEq + Debug,
{
	Encoder::new(&mut value)?.encode(source)?;

	let ty = value.descriptor().clone();
	let mut texts = Vec::new();
	for field in ty.fields()? {
		if field.ty.kind() != Kind::String {
			continue;
		}
		if let Some(text) = value.text_at(field.foreign_offset) {
			texts.push(TextJson {
				field: field.name.to_owned(),
				offset: field.foreign_offset,
				text: text.to_string_lossy().into_owned(),
			});
		}
	}
	let bytes = value.buffer().to_vec();
	let owned_text = value.owned_text_count();

	let mut decoded = T::default();
	Decoder::new(&mut value)?.decode(&mut decoded)?;
	if decoded != *source {
		log::warn!("decoded value differs from source: {decoded:?} != {source:?}");
	}

	Ok(RoundtripJson {
		demo: demo.as_str().to_owned(),
		type_name: ty.origin().type_name.to_owned(),
		layout: ty.layout().as_str().to_owned(),
		size: ty.size(),
		hex: hex_bytes(&bytes),
		bytes,
		owned_text,
		texts,
		equal: decoded == *source,
	})
}

#[derive(serde::Serialize)]
pub(crate) struct RoundtripJson {
	pub(crate) demo: String,
	#[serde(rename = "type")]
	pub(crate) type_name: String,
	pub(crate) layout: String,
	pub(crate) size: usize,
	pub(crate) hex: String,
	#[serde(skip)]
	pub(crate) bytes: Vec<u8>,
	pub(crate) owned_text: usize,
	pub(crate) texts: Vec<TextJson>,
	pub(crate) equal: bool,
}

#[derive(serde::Serialize)]
pub(crate) struct TextJson {
	pub(crate) field: String,
	pub(crate) offset: usize,
	pub(crate) text: String,
}

#[cfg(test)]
mod tests {
	use cbridge::bridge::POINTER_SIZE;
	use cbridge_testkit::{read_ne_f64, read_ne_i32};

	use super::build_report;
	use crate::cmd::ReportOptions;
	use crate::demo::DemoType;

	#[test]
	fn packed_sample_roundtrip_reports_canonical_bytes() {
		let report = build_report(ReportOptions::new(DemoType::Sample, true, false)).expect("sample roundtrip");
		assert!(report.equal);
		assert_eq!(report.size, 4 + POINTER_SIZE + 24);
		assert_eq!(report.hex.len(), report.size * 2);
		assert_eq!(read_ne_i32(&report.bytes, 0), 257012);
		assert_eq!(read_ne_f64(&report.bytes, 4 + POINTER_SIZE + 8), 2.0);
		assert_eq!(report.owned_text, 1);
		assert_eq!(report.texts.len(), 1);
		assert_eq!(report.texts[0].offset, 4);
		assert_eq!(report.texts[0].text, "32-42");
	}

	#[test]
	fn every_demo_roundtrips_in_both_layouts() {
		for ty in [DemoType::Event, DemoType::T1, DemoType::Sample] {
			for packed in [false, true] {
				let report = build_report(ReportOptions::new(ty, packed, false)).expect("roundtrip succeeds");
				assert!(report.equal, "{} packed={packed}", ty.as_str());
				assert_eq!(report.bytes.len(), report.size);
			}
		}
	}

	#[test]
	fn json_report_omits_raw_bytes() {
		let report = build_report(ReportOptions::new(DemoType::T1, false, true)).expect("t1 roundtrip");
		let json = serde_json::to_value(&report).expect("report serializes");
		assert!(json.get("bytes").is_none());
		assert_eq!(json["texts"][0]["field"], "s0");
		assert_eq!(json["equal"], true);
	}
}
