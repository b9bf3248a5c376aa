mod arena;
mod bytes;
mod client;
mod error;
mod json;
mod parser;
mod refs;
mod tags;
mod value;
mod writer;

/// Per-message composite storage and opaque handles.
pub use arena::{Composite, CompositeId, ValueArena};
/// Transport seam and invoke-style client.
pub use client::{Client, Transport};
/// Error and result aliases.
pub use error::{HessianError, RemoteFault, Result};
/// Diagnostic JSON rendering for decoded value graphs.
pub use json::to_json;
/// Reply decoding entry points and limits.
pub use parser::{ParseOptions, Parser, parse_reply};
/// Per-message reference tables.
pub use refs::{ReadRefs, WriteRefs};
/// Value domain types.
pub use value::{FieldValue, Record, TypedValue, Value};
/// Call encoding entry points.
pub use writer::{Writer, write_call};
