use std::collections::HashMap;

use crate::hessian::arena::CompositeId;
use crate::hessian::value::Value;

/// Writer-side reference table mapping composite identity to wire index.
///
/// One instance per encoded call; indices are never valid across messages.
#[derive(Debug, Default)]
pub struct WriteRefs {
	indices: HashMap<CompositeId, u32>,
	next: u32,
}

impl WriteRefs {
	/// Create an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Return the wire index already assigned to `id`, if any.
	pub fn lookup(&self, id: CompositeId) -> Option<u32> {
		self.indices.get(&id).copied()
	}

	/// Assign the next sequential index to `id`.
	pub fn register(&mut self, id: CompositeId) -> u32 {
		let index = self.next;
		self.indices.insert(id, index);
		self.next += 1;
		index
	}

	/// Consume one index slot without keying it.
	///
	/// Lowered records emit a fresh map body per occurrence; the receiving
	/// side registers that body, so a slot must be burned to keep later
	/// indices aligned.
	pub fn register_anonymous(&mut self) {
		self.next += 1;
	}
}

/// Parser-side reference table mapping wire index to registered handle.
///
/// One instance per decoded reply; indices are never valid across messages.
#[derive(Debug, Default)]
pub struct ReadRefs {
	targets: Vec<Value>,
}

impl ReadRefs {
	/// Create an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of registered composites.
	pub fn len(&self) -> u32 {
		self.targets.len() as u32
	}

	/// Return `true` when no composite is registered.
	pub fn is_empty(&self) -> bool {
		self.targets.is_empty()
	}

	/// Register a freshly allocated composite handle under the next index.
	pub fn register(&mut self, handle: Value) -> u32 {
		let index = self.len();
		self.targets.push(handle);
		index
	}

	/// Resolve a wire index back to the registered handle.
	pub fn resolve(&self, index: u32) -> Option<Value> {
		self.targets.get(index as usize).cloned()
	}
}

#[cfg(test)]
mod tests {
	use crate::hessian::refs::{ReadRefs, WriteRefs};
	use crate::hessian::{Value, ValueArena};

	#[test]
	fn write_refs_assign_sequential_indices() {
		let mut arena = ValueArena::new();
		let first = arena.alloc_list(Vec::new());
		let second = arena.alloc_map(Vec::new());

		let mut refs = WriteRefs::new();
		assert_eq!(refs.lookup(first), None);
		assert_eq!(refs.register(first), 0);
		assert_eq!(refs.register(second), 1);
		assert_eq!(refs.lookup(first), Some(0));
		assert_eq!(refs.lookup(second), Some(1));
	}

	#[test]
	fn anonymous_registration_burns_a_slot() {
		let mut arena = ValueArena::new();
		let list = arena.alloc_list(Vec::new());

		let mut refs = WriteRefs::new();
		refs.register_anonymous();
		assert_eq!(refs.register(list), 1);
	}

	#[test]
	fn read_refs_resolve_registered_handles_only() {
		let mut arena = ValueArena::new();
		let list = arena.alloc_list(Vec::new());

		let mut refs = ReadRefs::new();
		assert!(refs.is_empty());
		assert_eq!(refs.register(Value::List(list)), 0);
		assert_eq!(refs.resolve(0), Some(Value::List(list)));
		assert_eq!(refs.resolve(1), None);
		assert_eq!(refs.len(), 1);
	}
}
