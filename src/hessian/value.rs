use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::hessian::arena::CompositeId;

/// Native value carried through call encoding and reply decoding.
///
/// Composites hold handles into the per-message [`ValueArena`], so cloning a
/// `Value` never copies list or map bodies and two clones of one handle keep
/// pointing at the same composite.
///
/// [`ValueArena`]: crate::hessian::ValueArena
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Explicit null.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// 32-bit signed integer.
	Int(i32),
	/// 64-bit signed integer; encodes as 32-bit when the value fits.
	Long(i64),
	/// 64-bit IEEE-754 float.
	Double(f64),
	/// Timestamp as milliseconds since the Unix epoch.
	Date(i64),
	/// UTF-8 text.
	String(String),
	/// Raw binary payload.
	Bytes(Vec<u8>),
	/// Handle to an arena-registered list.
	List(CompositeId),
	/// Handle to an arena-registered map.
	Map(CompositeId),
	/// Value annotated with a wire type name.
	Typed(Box<TypedValue>),
	/// Field-named record, lowered to an untyped map on the wire.
	Record(Record),
}

impl Value {
	/// Wrap a value with a wire type name.
	pub fn typed(type_name: impl Into<String>, value: Value) -> Self {
		Self::Typed(Box::new(TypedValue {
			type_name: type_name.into(),
			value,
		}))
	}

	/// Build a timestamp value from a system clock reading.
	pub fn date_from(time: SystemTime) -> Self {
		let millis = match time.duration_since(UNIX_EPOCH) {
			Ok(elapsed) => elapsed.as_millis() as i64,
			Err(err) => -(err.duration().as_millis() as i64),
		};
		Self::Date(millis)
	}

	/// Convert a `Date` value back to a system time.
	pub fn to_system_time(&self) -> Option<SystemTime> {
		let Self::Date(millis) = self else {
			return None;
		};

		let offset = Duration::from_millis(millis.unsigned_abs());
		Some(if *millis >= 0 { UNIX_EPOCH + offset } else { UNIX_EPOCH - offset })
	}

	/// Stable lowercase label for diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Long(_) => "long",
			Self::Double(_) => "double",
			Self::Date(_) => "date",
			Self::String(_) => "string",
			Self::Bytes(_) => "bytes",
			Self::List(_) => "list",
			Self::Map(_) => "map",
			Self::Typed(_) => "typed",
			Self::Record(_) => "record",
		}
	}
}

/// Wire type name paired with the value it annotates.
///
/// The wrapper is transparent on the wire except for supplying the type
/// block of the underlying list or map.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
	/// Type name emitted in the composite type block.
	pub type_name: String,
	/// Annotated value.
	pub value: Value,
}

/// Record with named fields, serialized as a map keyed by field name.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
	/// Field values in declaration order.
	pub fields: Vec<FieldValue>,
}

/// Named record field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field identifier.
	pub name: Box<str>,
	/// Field payload.
	pub value: Value,
}
