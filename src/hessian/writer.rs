use crate::hessian::arena::{Composite, CompositeId, ValueArena};
use crate::hessian::bytes::{put_f64, put_i32, put_i64, put_u16, put_u32};
use crate::hessian::refs::WriteRefs;
use crate::hessian::value::{Record, Value};
use crate::hessian::{HessianError, Result, tags};

/// Largest chunk payload the u16 length prefix can describe.
const CHUNK_MAX: usize = u16::MAX as usize;

/// Call encoder over a caller-owned arena.
///
/// One writer encodes exactly one call; its reference table is created with
/// it and discarded with it.
pub struct Writer<'a> {
	arena: &'a ValueArena,
	refs: WriteRefs,
	out: Vec<u8>,
}

impl<'a> Writer<'a> {
	/// Create a writer reading composites from `arena`.
	pub fn new(arena: &'a ValueArena) -> Self {
		Self {
			arena,
			refs: WriteRefs::new(),
			out: Vec::new(),
		}
	}

	/// Encode a complete call envelope for `method` with ordered `args`.
	pub fn write_call(mut self, method: &str, args: &[Value]) -> Result<Vec<u8>> {
		let chars = method.chars().count();
		let length = u16::try_from(chars).map_err(|_| HessianError::MethodTooLong { chars })?;

		self.out.push(tags::CALL);
		self.out.extend_from_slice(&tags::VERSION);
		self.out.push(tags::METHOD);
		put_u16(&mut self.out, length);
		self.out.extend_from_slice(method.as_bytes());

		for arg in args {
			self.write_object(arg, None)?;
		}

		self.out.push(tags::END);
		Ok(self.out)
	}

	fn write_object(&mut self, value: &Value, type_hint: Option<&str>) -> Result<()> {
		match value {
			Value::Null => self.out.push(tags::NULL),
			Value::Bool(true) => self.out.push(tags::TRUE),
			Value::Bool(false) => self.out.push(tags::FALSE),
			Value::Int(v) => self.write_int(i64::from(*v)),
			Value::Long(v) => self.write_int(*v),
			Value::Double(v) => {
				self.out.push(tags::DOUBLE);
				put_f64(&mut self.out, *v);
			}
			Value::Date(millis) => {
				self.out.push(tags::DATE);
				put_i64(&mut self.out, *millis);
			}
			Value::String(text) => self.write_text(text),
			Value::Bytes(data) => self.write_binary(data),
			Value::Typed(wrapper) => return self.write_object(&wrapper.value, Some(wrapper.type_name.as_str())),
			Value::Record(record) => return self.write_record(record),
			Value::List(id) | Value::Map(id) => return self.write_composite(*id, type_hint),
		}
		Ok(())
	}

	/// Route an integral value to the 4-byte form when it fits.
	fn write_int(&mut self, value: i64) {
		if let Ok(narrow) = i32::try_from(value) {
			self.out.push(tags::INT);
			put_i32(&mut self.out, narrow);
		} else {
			self.out.push(tags::LONG);
			put_i64(&mut self.out, value);
		}
	}

	fn write_text(&mut self, text: &str) {
		let mut rest = text;
		loop {
			let (chunk, chars, remainder) = take_chars(rest, CHUNK_MAX);
			let terminal = remainder.is_empty();
			self.out.push(if terminal { tags::STRING } else { tags::STRING_CHUNK });
			put_u16(&mut self.out, chars as u16);
			self.out.extend_from_slice(chunk.as_bytes());
			if terminal {
				return;
			}
			rest = remainder;
		}
	}

	fn write_binary(&mut self, data: &[u8]) {
		let mut rest = data;
		loop {
			let take = rest.len().min(CHUNK_MAX);
			let terminal = take == rest.len();
			self.out.push(if terminal { tags::BINARY } else { tags::BINARY_CHUNK });
			put_u16(&mut self.out, take as u16);
			self.out.extend_from_slice(&rest[..take]);
			if terminal {
				return;
			}
			rest = &rest[take..];
		}
	}

	fn write_composite(&mut self, id: CompositeId, type_hint: Option<&str>) -> Result<()> {
		if let Some(index) = self.refs.lookup(id) {
			self.out.push(tags::REF);
			put_u32(&mut self.out, index);
			return Ok(());
		}

		let arena = self.arena;
		let composite = arena.composite(id)?;
		// registered before elements so the body can reference itself
		self.refs.register(id);

		match composite {
			Composite::List(items) => {
				self.out.push(tags::LIST);
				self.write_type_block(type_hint);
				self.out.push(tags::LENGTH);
				put_u32(&mut self.out, items.len() as u32);
				for item in items {
					self.write_object(item, None)?;
				}
				self.out.push(tags::END);
			}
			Composite::Map(entries) => {
				self.out.push(tags::MAP);
				self.write_type_block(type_hint);
				for (key, value) in entries {
					self.write_object(key, None)?;
					self.write_object(value, None)?;
				}
				self.out.push(tags::END);
			}
		}
		Ok(())
	}

	fn write_record(&mut self, record: &Record) -> Result<()> {
		// fresh map body per occurrence; the receiving side registers it,
		// so a slot is consumed to keep later indices aligned
		self.refs.register_anonymous();
		self.out.push(tags::MAP);
		self.write_type_block(None);
		for field in &record.fields {
			self.write_text(&field.name);
			self.write_object(&field.value, None)?;
		}
		self.out.push(tags::END);
		Ok(())
	}

	fn write_type_block(&mut self, type_name: Option<&str>) {
		self.out.push(tags::TYPE);
		match type_name {
			Some(name) => {
				put_u16(&mut self.out, name.chars().count() as u16);
				self.out.extend_from_slice(name.as_bytes());
			}
			None => put_u16(&mut self.out, 0),
		}
	}
}

/// Split off at most `max` code points, returning `(chunk, count, rest)`.
fn take_chars(text: &str, max: usize) -> (&str, usize, &str) {
	let mut count = 0_usize;
	for (offset, _) in text.char_indices() {
		if count == max {
			return (&text[..offset], count, &text[offset..]);
		}
		count += 1;
	}
	(text, count, "")
}

/// Encode one call with a fresh reference table.
pub fn write_call(arena: &ValueArena, method: &str, args: &[Value]) -> Result<Vec<u8>> {
	Writer::new(arena).write_call(method, args)
}
