use crate::bridge::kind::POINTER_SIZE;
use crate::bridge::{CTypeError, Value};

#[test]
fn new_value_is_zeroed() {
	let value = Value::of::<[u32; 4]>().expect("array resolves");
	assert_eq!(value.buffer(), &[0_u8; 16]);
	assert_eq!(value.pos(), 0);
	assert_eq!(value.remaining(), 16);
	assert_eq!(value.owned_text_count(), 0);
}

#[test]
fn write_past_end_reports_overrun() {
	let mut value = Value::of::<u32>().expect("u32 resolves");
	value.write(&[1, 2, 3]).expect("three bytes fit");
	let err = value.write(&[4, 5]).expect_err("two more bytes do not fit");
	assert!(matches!(err, CTypeError::BufferOverrun { at: 3, need: 2, rem: 1 }));
	assert_eq!(value.buffer(), &[1, 2, 3, 0]);
}

#[test]
fn read_array_advances_cursor() {
	let mut value = Value::of::<u64>().expect("u64 resolves");
	value.write(&7_u64.to_ne_bytes()).expect("write fits");
	value.rewind();
	let raw: [u8; 8] = value.read_array().expect("read fits");
	assert_eq!(u64::from_ne_bytes(raw), 7);
	assert_eq!(value.remaining(), 0);
	assert!(value.read_array::<1>().is_err());
}

#[test]
fn seek_stays_within_image() {
	let mut value = Value::of::<[u8; 4]>().expect("array resolves");
	value.seek(4).expect("end is a valid position");
	assert_eq!(value.remaining(), 0);
	assert!(matches!(value.seek(5), Err(CTypeError::BufferOverrun { .. })));
	assert_eq!(value.pos(), 4);
}

#[test]
fn text_is_owned_until_reset() {
	let mut value = Value::of::<String>().expect("String resolves");
	value.write_text("32-42").expect("text fits");
	assert_eq!(value.pos(), POINTER_SIZE);
	assert_eq!(value.owned_text_count(), 1);
	assert_eq!(value.text_at(0).expect("owned text").to_bytes(), b"32-42");
	assert!(value.text_at(1).is_none());

	value.rewind();
	assert_eq!(value.read_text().expect("owned text decodes"), "32-42");

	value.reset();
	assert_eq!(value.owned_text_count(), 0);
	assert!(value.buffer().iter().all(|byte| *byte == 0));
	assert!(value.text_at(0).is_none());
}

#[test]
fn null_text_pointer_reads_as_empty() {
	let mut value = Value::of::<String>().expect("String resolves");
	assert_eq!(value.read_text().expect("null decodes"), "");
}

#[test]
fn foreign_text_pointer_is_rejected() {
	let mut value = Value::of::<String>().expect("String resolves");
	value.write(&0x1000_usize.to_ne_bytes()).expect("pointer fits");
	value.rewind();
	assert!(matches!(value.read_text(), Err(CTypeError::UnownedText { offset: 0 })));
}

#[test]
fn text_does_not_allocate_without_room() {
	let mut value = Value::of::<u32>().expect("u32 resolves");
	assert!(matches!(value.write_text("x"), Err(CTypeError::BufferOverrun { .. })));
	assert_eq!(value.owned_text_count(), 0);
}
