use cbridge::CType;
use cbridge::bridge::CSlice;

/// Demo record selectable from the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum DemoType {
	#[default]
	Event,
	T1,
	Sample,
}

impl DemoType {
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			Self::Event => "event",
			Self::T1 => "t1",
			Self::Sample => "sample",
		}
	}
}

#[derive(CType, Debug, Clone, PartialEq, Default)]
pub(crate) struct T1 {
	pub(crate) i0: isize,
	pub(crate) s0: String,
	pub(crate) i1: isize,
	pub(crate) f0: f64,
	pub(crate) f1: f32,
	pub(crate) f2: f32,
}

#[derive(CType, Debug, Clone, PartialEq)]
pub(crate) struct Event {
	pub(crate) i: isize,
	pub(crate) f: f64,
	pub(crate) a: CSlice<f64>,
	pub(crate) s: String,
	pub(crate) b: [f64; 10],
	pub(crate) t: *const T1,
}

impl Default for Event {
	fn default() -> Self {
		Self {
			i: 0,
			f: 0.0,
			a: CSlice::empty(),
			s: String::new(),
			b: [0.0; 10],
			t: std::ptr::null(),
		}
	}
}

#[derive(CType, Debug, Clone, PartialEq, Default)]
pub(crate) struct Sample {
	pub(crate) i: i32,
	pub(crate) s: String,
	pub(crate) a: [f64; 3],
}

pub(crate) fn t1() -> T1 {
	T1 {
		i0: 10,
		s0: "t1 text".to_owned(),
		i1: 20,
		f0: 30.5,
		f1: 40.25,
		f2: 50.125,
	}
}

/// Event pointing at `items` and `inner`; both must outlive every image built from it.
pub(crate) fn event(items: &[f64], inner: &T1) -> Event {
	let mut b = [0.0; 10];
	for (idx, slot) in b.iter_mut().enumerate() {
		*slot = (idx + 1) as f64;
	}
	Event {
		i: 42,
		f: 3.5,
		a: CSlice::from(items),
		s: "event".to_owned(),
		b,
		t: inner,
	}
}

pub(crate) fn sample() -> Sample {
	Sample {
		i: 257012,
		s: "32-42".to_owned(),
		a: [1.0, 2.0, 3.0],
	}
}
