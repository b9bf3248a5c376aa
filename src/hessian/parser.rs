use crate::hessian::arena::ValueArena;
use crate::hessian::bytes::Cursor;
use crate::hessian::refs::ReadRefs;
use crate::hessian::value::Value;
use crate::hessian::{HessianError, RemoteFault, Result, tags};

/// Runtime limits for reply parsing.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
	/// Maximum recursive value nesting depth.
	pub max_depth: u32,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self { max_depth: 64 }
	}
}

/// Single-pass recursive-descent reply decoder.
///
/// One parser decodes exactly one reply buffer into a caller-owned arena;
/// after an error the cursor position is unspecified and the parser must be
/// discarded. Allocating into the caller's arena keeps fault detail
/// composites reachable when parsing ends in a remote fault.
pub struct Parser<'a, 'm> {
	cursor: Cursor<'a>,
	arena: &'m mut ValueArena,
	refs: ReadRefs,
	options: ParseOptions,
}

impl<'a, 'm> Parser<'a, 'm> {
	/// Create a parser with default options, decoding into `arena`.
	pub fn new(bytes: &'a [u8], arena: &'m mut ValueArena) -> Self {
		Self::with_options(bytes, arena, ParseOptions::default())
	}

	/// Create a parser with explicit limits.
	pub fn with_options(bytes: &'a [u8], arena: &'m mut ValueArena, options: ParseOptions) -> Self {
		Self {
			cursor: Cursor::new(bytes),
			arena,
			refs: ReadRefs::new(),
			options,
		}
	}

	/// Decode a complete reply envelope into one value.
	pub fn parse_reply(mut self) -> Result<Value> {
		// 'r' plus two version bytes that carry no meaning for decoding
		let header = self.cursor.read_exact(3)?;
		if header[0] != tags::REPLY {
			return Err(HessianError::InvalidReplyHeader { got: header[0] });
		}

		self.parse_object(0)
	}

	fn parse_object(&mut self, depth: u32) -> Result<Value> {
		if depth >= self.options.max_depth {
			return Err(HessianError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		let at = self.cursor.pos();
		let tag = self.cursor.read_u8()?;
		match tag {
			tags::FAULT => Err(self.parse_fault(depth)?),
			tags::STRING | tags::STRING_CHUNK | tags::XML | tags::XML_CHUNK => self.parse_text(tag),
			tags::BINARY | tags::BINARY_CHUNK => self.parse_binary(tag),
			tags::INT => Ok(Value::Int(self.cursor.read_i32()?)),
			tags::LONG => Ok(Value::Long(self.cursor.read_i64()?)),
			tags::DOUBLE => Ok(Value::Double(self.cursor.read_f64()?)),
			tags::DATE => Ok(Value::Date(self.cursor.read_i64()?)),
			tags::TRUE => Ok(Value::Bool(true)),
			tags::FALSE => Ok(Value::Bool(false)),
			tags::NULL => Ok(Value::Null),
			tags::REF => self.parse_ref(),
			tags::LIST => self.parse_list(depth),
			tags::MAP => self.parse_map(depth),
			other => Err(HessianError::UnexpectedTag { tag: other, at }),
		}
	}

	fn parse_text(&mut self, first: u8) -> Result<Value> {
		let mut tag = first;
		let mut out = String::new();
		loop {
			let chars = usize::from(self.cursor.read_u16()?);
			out.push_str(self.cursor.read_utf8(chars)?);
			if tag == tags::STRING || tag == tags::XML {
				return Ok(Value::String(out));
			}

			// a continuation chunk must chain into another string tag
			let at = self.cursor.pos();
			tag = self.cursor.read_u8()?;
			if !matches!(tag, tags::STRING | tags::STRING_CHUNK | tags::XML | tags::XML_CHUNK) {
				return Err(HessianError::UnexpectedTag { tag, at });
			}
		}
	}

	fn parse_binary(&mut self, first: u8) -> Result<Value> {
		let mut tag = first;
		let mut out = Vec::new();
		loop {
			let count = usize::from(self.cursor.read_u16()?);
			out.extend_from_slice(self.cursor.read_exact(count)?);
			if tag == tags::BINARY {
				return Ok(Value::Bytes(out));
			}

			let at = self.cursor.pos();
			tag = self.cursor.read_u8()?;
			if !matches!(tag, tags::BINARY | tags::BINARY_CHUNK) {
				return Err(HessianError::UnexpectedTag { tag, at });
			}
		}
	}

	fn parse_ref(&mut self) -> Result<Value> {
		let index = self.cursor.read_u32()?;
		self.refs.resolve(index).ok_or(HessianError::RefOutOfRange {
			index,
			len: self.refs.len(),
		})
	}

	fn parse_list(&mut self, depth: u32) -> Result<Value> {
		let type_name = self.parse_type_block()?;
		// explicit length block is informational only
		if self.cursor.peek_u8() == Some(tags::LENGTH) {
			let _ = self.cursor.read_u8()?;
			let _ = self.cursor.read_exact(4)?;
		}

		// registered before elements so the body can reference itself
		let id = self.arena.alloc_list(Vec::new());
		self.refs.register(Value::List(id));

		while self.peek_tag()? != tags::END {
			let item = self.parse_object(depth + 1)?;
			self.arena.push_item(id, item)?;
		}
		let _ = self.cursor.read_u8()?;

		Ok(wrap_typed(type_name, Value::List(id)))
	}

	fn parse_map(&mut self, depth: u32) -> Result<Value> {
		let type_name = self.parse_type_block()?;

		let id = self.arena.alloc_map(Vec::new());
		self.refs.register(Value::Map(id));

		while self.peek_tag()? != tags::END {
			let key = self.parse_object(depth + 1)?;
			let value = self.parse_object(depth + 1)?;
			self.arena.push_entry(id, key, value)?;
		}
		let _ = self.cursor.read_u8()?;

		Ok(wrap_typed(type_name, Value::Map(id)))
	}

	fn parse_type_block(&mut self) -> Result<Option<String>> {
		if self.cursor.peek_u8() != Some(tags::TYPE) {
			return Ok(None);
		}

		let _ = self.cursor.read_u8()?;
		let chars = usize::from(self.cursor.read_u16()?);
		let name = self.cursor.read_utf8(chars)?;
		// an empty block means "untyped"
		Ok((!name.is_empty()).then(|| name.to_owned()))
	}

	fn parse_fault(&mut self, depth: u32) -> Result<HessianError> {
		let code = self.parse_fault_entry("code", depth)?;
		let message = self.parse_fault_entry("message", depth)?;
		let detail = self.parse_fault_entry("detail", depth)?;
		Ok(HessianError::Fault(RemoteFault { code, message, detail }))
	}

	fn parse_fault_entry(&mut self, expected: &'static str, depth: u32) -> Result<Value> {
		let key = self.parse_object(depth + 1)?;
		match &key {
			Value::String(text) if text.as_str() == expected => {}
			other => {
				return Err(HessianError::FaultKeyMismatch {
					expected,
					got: format!("{other:?}"),
				});
			}
		}
		self.parse_object(depth + 1)
	}

	fn peek_tag(&self) -> Result<u8> {
		self.cursor.peek_u8().ok_or(HessianError::UnexpectedEof {
			at: self.cursor.pos(),
			need: 1,
			rem: 0,
		})
	}
}

/// Wrap a decoded composite when a non-empty type name was present.
fn wrap_typed(type_name: Option<String>, value: Value) -> Value {
	match type_name {
		Some(name) => Value::typed(name, value),
		None => value,
	}
}

/// Decode one reply with default options.
pub fn parse_reply(bytes: &[u8], arena: &mut ValueArena) -> Result<Value> {
	Parser::new(bytes, arena).parse_reply()
}
