//! Public library API for the Hessian 1.0 binary RPC codec.

/// Call encoding, reply decoding, value arena, reference tables, and the
/// transport seam used to drive them.
pub mod hessian;
