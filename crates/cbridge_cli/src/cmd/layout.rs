use cbridge::bridge::{CType, TypeDescriptor};

use crate::cmd::{ReportOptions, Result};
use crate::cmd::util::print_json;
use crate::demo::{self, DemoType};

pub fn run(options: ReportOptions) -> Result<()> {
	let report = build_report(options)?;
	if options.json {
		return print_json(&report);
	}

	println!("type: {}", report.type_name);
	println!("c_type: {}", report.c_type);
	println!("layout: {}", report.layout);
	println!("size: {}", report.size);
	println!("align: {}", report.align);
	println!("fields: {}", report.fields.len());
	for field in &report.fields {
		println!(
			"  {:<4} {:<10} host=+{:<4} foreign=+{:<4} size={:<4} {}",
			field.name, field.kind, field.host_offset, field.foreign_offset, field.size, field.c_type
		);
	}
	Ok(())
}

pub(crate) fn build_report(options: ReportOptions) -> Result<LayoutJson> {
	let resolve = options.resolve_options();
	let ty = match options.ty {
		DemoType::Event => TypeDescriptor::of_with::<demo::Event>(&resolve)?,
		DemoType::T1 => TypeDescriptor::of_with::<demo::T1>(&resolve)?,
		DemoType::Sample => TypeDescriptor::of_with::<demo::Sample>(&resolve)?,
	};
	describe(options.ty, &ty)
}

fn describe(demo: DemoType, ty: &TypeDescriptor) -> Result<LayoutJson> {
	let fields = ty
		.fields()?
		.iter()
		.map(|field| FieldJson {
			name: field.name.to_owned(),
			kind: field.ty.kind().as_str().to_owned(),
			c_type: field.ty.to_string(),
			host_offset: field.offset,
			foreign_offset: field.foreign_offset,
			size: field.ty.size(),
		})
		.collect();

	Ok(LayoutJson {
		demo: demo.as_str().to_owned(),
		type_name: ty.origin().type_name.to_owned(),
		c_type: ty.to_string(),
		layout: ty.layout().as_str().to_owned(),
		size: ty.size(),
		align: ty.align(),
		host_size: host_size(demo),
		fields,
	})
}

fn host_size(demo: DemoType) -> usize {
	match demo {
		DemoType::Event => demo::Event::host_type().size,
		DemoType::T1 => demo::T1::host_type().size,
		DemoType::Sample => demo::Sample::host_type().size,
	}
}

#[derive(serde::Serialize)]
pub(crate) struct LayoutJson {
	pub(crate) demo: String,
	#[serde(rename = "type")]
	pub(crate) type_name: String,
	pub(crate) c_type: String,
	pub(crate) layout: String,
	pub(crate) size: usize,
	pub(crate) align: usize,
	pub(crate) host_size: usize,
	pub(crate) fields: Vec<FieldJson>,
}

#[derive(serde::Serialize)]
pub(crate) struct FieldJson {
	pub(crate) name: String,
	pub(crate) kind: String,
	pub(crate) c_type: String,
	pub(crate) host_offset: usize,
	pub(crate) foreign_offset: usize,
	pub(crate) size: usize,
}

#[cfg(test)]
mod tests {
	use cbridge::bridge::{INT_SIZE, Layout, POINTER_SIZE};

	use super::build_report;
	use crate::cmd::ReportOptions;
	use crate::demo::DemoType;

	#[test]
	fn packed_sample_report_lists_unpadded_offsets() {
		let report = build_report(ReportOptions::new(DemoType::Sample, true, false)).expect("sample report");
		assert_eq!(report.layout, Layout::Packed.as_str());
		assert_eq!(report.size, 4 + POINTER_SIZE + 24);
		let offsets: Vec<usize> = report.fields.iter().map(|field| field.foreign_offset).collect();
		assert_eq!(offsets, vec![0, 4, 4 + POINTER_SIZE]);
		assert_eq!(report.fields[1].kind, "string");
		assert_eq!(report.fields[2].c_type, "double[3]");
	}

	#[test]
	fn natural_event_report_matches_host_layout_for_headers() {
		let report = build_report(ReportOptions::new(DemoType::Event, false, true)).expect("event report");
		assert_eq!(report.c_type, "struct Event");
		let names: Vec<&str> = report.fields.iter().map(|field| field.name.as_str()).collect();
		assert_eq!(names, vec!["i", "f", "a", "s", "b", "t"]);
		let slice = &report.fields[2];
		assert_eq!(slice.size, INT_SIZE + POINTER_SIZE);
		assert_eq!(slice.kind, "slice");
		assert_eq!(report.fields[5].c_type, "struct T1*");
		assert_eq!(report.size % report.align, 0);
	}

	#[test]
	fn report_serializes_type_key() {
		let report = build_report(ReportOptions::new(DemoType::T1, false, true)).expect("t1 report");
		let json = serde_json::to_value(&report).expect("report serializes");
		assert_eq!(json["demo"], "t1");
		assert_eq!(json["fields"].as_array().expect("fields array").len(), 6);
		assert!(json["type"].as_str().expect("type string").ends_with("T1"));
	}
}
