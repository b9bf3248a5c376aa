//! Single-byte wire tags of the Hessian 1.0 protocol.

/// Call envelope marker.
pub const CALL: u8 = b'c';
/// Protocol version bytes following the call marker.
pub const VERSION: [u8; 2] = [0x00, 0x01];
/// Method-name marker inside the call envelope.
pub const METHOD: u8 = b'm';
/// Reply envelope marker.
pub const REPLY: u8 = b'r';
/// Fault marker opening the structured exception sub-protocol.
pub const FAULT: u8 = b'f';
/// Terminal string chunk.
pub const STRING: u8 = b'S';
/// Continuation string chunk.
pub const STRING_CHUNK: u8 = b's';
/// Terminal XML chunk, decoded as text.
pub const XML: u8 = b'X';
/// Continuation XML chunk, decoded as text.
pub const XML_CHUNK: u8 = b'x';
/// Terminal binary chunk.
pub const BINARY: u8 = b'B';
/// Continuation binary chunk.
pub const BINARY_CHUNK: u8 = b'b';
/// 32-bit big-endian signed integer.
pub const INT: u8 = b'I';
/// 64-bit big-endian signed integer.
pub const LONG: u8 = b'L';
/// 64-bit big-endian IEEE-754 double.
pub const DOUBLE: u8 = b'D';
/// Timestamp carried as int64 milliseconds.
pub const DATE: u8 = b'd';
/// Boolean true literal.
pub const TRUE: u8 = b'T';
/// Boolean false literal.
pub const FALSE: u8 = b'F';
/// Null literal.
pub const NULL: u8 = b'N';
/// Back-reference into the per-message reference table.
pub const REF: u8 = b'R';
/// List composite marker.
pub const LIST: u8 = b'V';
/// Map composite marker.
pub const MAP: u8 = b'M';
/// Type-name block marker inside a composite.
pub const TYPE: u8 = b't';
/// Explicit list length block marker.
pub const LENGTH: u8 = b'l';
/// End marker terminating envelopes and composites.
pub const END: u8 = b'z';
