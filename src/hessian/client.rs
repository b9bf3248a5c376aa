use crate::hessian::Result;
use crate::hessian::arena::ValueArena;
use crate::hessian::parser::Parser;
use crate::hessian::value::Value;
use crate::hessian::writer::Writer;

/// Byte-level exchange with a remote endpoint.
///
/// Implementations own connection setup, TLS, credentials, content-type
/// headers, and retry policy; the codec hands over one complete request
/// buffer and expects one complete reply buffer back. IO failures surface
/// through [`HessianError::Io`].
///
/// [`HessianError::Io`]: crate::hessian::HessianError::Io
pub trait Transport {
	/// Send one encoded call and return the complete reply buffer.
	fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>>;
}

/// RPC client joining the call encoder, a transport, and the reply decoder.
pub struct Client<T> {
	transport: T,
}

impl<T: Transport> Client<T> {
	/// Create a client over `transport`.
	pub fn new(transport: T) -> Self {
		Self { transport }
	}

	/// Invoke `method` with ordered `args`, decoding the reply into `arena`.
	///
	/// The arena scopes one exchange: composite arguments are read from it
	/// and the decoded reply graph is allocated into it. The writer and the
	/// parser each hold a private reference table, so wire indices never
	/// leak between the two messages.
	pub fn invoke(&mut self, method: &str, args: &[Value], arena: &mut ValueArena) -> Result<Value> {
		let request = Writer::new(arena).write_call(method, args)?;
		let response = self.transport.exchange(&request)?;
		Parser::new(&response, arena).parse_reply()
	}

	/// Consume the client, returning the transport.
	pub fn into_transport(self) -> T {
		self.transport
	}
}
