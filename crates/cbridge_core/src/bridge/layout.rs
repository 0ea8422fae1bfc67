/// Field placement rule used when resolving aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
	/// Fields back-to-back with no padding; aggregate alignment is 1.
	Packed,
	/// C ABI placement: each field at a multiple of its alignment, size rounded to the aggregate alignment.
	#[default]
	Natural,
}

impl Layout {
	/// Short lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Packed => "packed",
			Self::Natural => "natural",
		}
	}
}

/// Resolver behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
	/// Aggregate field placement rule.
	pub layout: Layout,
	/// Maximum nesting depth of arrays and aggregates.
	pub max_depth: u32,
}

impl Default for ResolveOptions {
	fn default() -> Self {
		Self {
			layout: Layout::Natural,
			max_depth: 32,
		}
	}
}

impl ResolveOptions {
	/// Preset reproducing the unpadded layout: every field follows the previous one directly.
	pub fn packed() -> Self {
		Self {
			layout: Layout::Packed,
			..Self::default()
		}
	}
}

/// Round `offset` up to a multiple of `align`.
pub(crate) fn align_to(offset: usize, align: usize) -> usize {
	if align <= 1 {
		return offset;
	}
	offset.div_ceil(align) * align
}

/// Running placement state for one aggregate.
#[derive(Debug)]
pub(crate) struct FieldPlacer {
	layout: Layout,
	offset: usize,
	max_align: usize,
}

impl FieldPlacer {
	pub(crate) fn new(layout: Layout) -> Self {
		Self {
			layout,
			offset: 0,
			max_align: 1,
		}
	}

	/// Reserve room for one field and return its offset.
	pub(crate) fn place(&mut self, size: usize, align: usize) -> usize {
		if self.layout == Layout::Natural {
			self.offset = align_to(self.offset, align);
			self.max_align = self.max_align.max(align);
		}
		let at = self.offset;
		self.offset += size;
		at
	}

	/// Final `(size, align)` of the aggregate.
	pub(crate) fn finish(self) -> (usize, usize) {
		match self.layout {
			Layout::Packed => (self.offset, 1),
			Layout::Natural => (align_to(self.offset, self.max_align), self.max_align),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{FieldPlacer, Layout, align_to};

	#[test]
	fn align_to_rounds_up() {
		assert_eq!(align_to(0, 8), 0);
		assert_eq!(align_to(1, 8), 8);
		assert_eq!(align_to(12, 4), 12);
		assert_eq!(align_to(13, 1), 13);
	}

	#[test]
	fn packed_placement_sums_sizes() {
		let mut placer = FieldPlacer::new(Layout::Packed);
		assert_eq!(placer.place(4, 4), 0);
		assert_eq!(placer.place(8, 8), 4);
		assert_eq!(placer.place(1, 1), 12);
		assert_eq!(placer.finish(), (13, 1));
	}

	#[test]
	fn natural_placement_pads_fields_and_tail() {
		let mut placer = FieldPlacer::new(Layout::Natural);
		assert_eq!(placer.place(4, 4), 0);
		assert_eq!(placer.place(8, 8), 8);
		assert_eq!(placer.place(1, 1), 16);
		assert_eq!(placer.finish(), (24, 8));
	}

	#[test]
	fn empty_aggregate_has_zero_size() {
		assert_eq!(FieldPlacer::new(Layout::Natural).finish(), (0, 1));
		assert_eq!(FieldPlacer::new(Layout::Packed).finish(), (0, 1));
	}
}
