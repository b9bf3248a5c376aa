use std::fmt;

use thiserror::Error;

use crate::hessian::arena::CompositeId;
use crate::hessian::value::Value;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, HessianError>;

/// Errors produced while encoding calls, decoding replies, and exchanging
/// buffers with a transport.
///
/// Variants group into the protocol's three failure kinds: serialization
/// errors (`UnknownComposite`, `CompositeKindMismatch`, `MethodTooLong`,
/// fixable only by the caller), protocol errors (`UnexpectedEof` through
/// `DepthExceeded`, a corrupt or incompatible stream), and the remote
/// `Fault` (the stream was well-formed; the server reported a structured
/// failure). `Io` surfaces transport failures.
#[derive(Debug, Error)]
pub enum HessianError {
	/// Transport or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Composite handle not registered in the arena in use.
	#[error("unknown composite handle {id:?}")]
	UnknownComposite {
		/// Offending handle.
		id: CompositeId,
	},
	/// Composite handle resolves to the other composite kind.
	#[error("composite {id:?} is a {actual}, expected {expected}")]
	CompositeKindMismatch {
		/// Offending handle.
		id: CompositeId,
		/// Kind the caller asked for.
		expected: &'static str,
		/// Kind actually registered.
		actual: &'static str,
	},
	/// Method name does not fit the call envelope's length field.
	#[error("method name too long: {chars} characters")]
	MethodTooLong {
		/// Character count of the rejected name.
		chars: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Text payload was not valid UTF-8.
	#[error("invalid utf-8 in text at offset {at}")]
	InvalidUtf8 {
		/// Byte offset of the offending sequence.
		at: usize,
	},
	/// Reply envelope did not start with the reply marker.
	#[error("invalid reply header: expected 'r', got 0x{got:02x}")]
	InvalidReplyHeader {
		/// First byte of the rejected buffer.
		got: u8,
	},
	/// Unrecognized tag byte at a value boundary.
	#[error("unrecognized tag 0x{tag:02x} at offset {at}")]
	UnexpectedTag {
		/// Offending tag byte.
		tag: u8,
		/// Byte offset of the tag.
		at: usize,
	},
	/// Back-reference index beyond the registered composite count.
	#[error("back-reference {index} out of range, {len} registered")]
	RefOutOfRange {
		/// Requested wire index.
		index: u32,
		/// Composites registered so far.
		len: u32,
	},
	/// Fault entries arrived under the wrong key or out of order.
	#[error("fault key mismatch: expected {expected}, got {got}")]
	FaultKeyMismatch {
		/// Key required at this position.
		expected: &'static str,
		/// Value actually decoded in key position.
		got: String,
	},
	/// Parser recursion exceeded the configured depth limit.
	#[error("parse depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Structured fault reported by the remote endpoint.
	#[error("remote fault: {0}")]
	Fault(RemoteFault),
}

/// Structured error explicitly reported by the remote endpoint.
///
/// Distinct from a protocol error: the byte stream itself was well-formed.
/// Composite handles inside `detail` resolve against the arena the reply
/// was decoded into.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteFault {
	/// Fault code, first fault field.
	pub code: Value,
	/// Human-readable description, second fault field.
	pub message: Value,
	/// Arbitrary detail payload, third fault field.
	pub detail: Value,
}

impl fmt::Display for RemoteFault {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "code={}, message={}", text_label(&self.code), text_label(&self.message))
	}
}

fn text_label(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => format!("{other:?}"),
	}
}
