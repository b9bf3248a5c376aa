use crate::hessian::value::Value;
use crate::hessian::{HessianError, Result};

/// Opaque handle to one composite registered in a [`ValueArena`].
///
/// Handle equality is object identity: two values carrying the same handle
/// point at the same composite for the lifetime of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompositeId(u32);

/// One stored composite body.
#[derive(Debug, Clone, PartialEq)]
pub enum Composite {
	/// Ordered element sequence.
	List(Vec<Value>),
	/// Ordered key/value pairs, wire order and duplicates preserved.
	Map(Vec<(Value, Value)>),
}

impl Composite {
	/// Stable lowercase label.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::List(_) => "list",
			Self::Map(_) => "map",
		}
	}
}

/// Per-message storage for composite values.
///
/// Callers construct one arena per message and drop it once the value graph
/// is no longer needed; handles are never valid across arenas.
#[derive(Debug, Default)]
pub struct ValueArena {
	composites: Vec<Composite>,
}

impl ValueArena {
	/// Create an empty arena.
	pub fn new() -> Self {
		Self { composites: Vec::new() }
	}

	/// Number of registered composites.
	pub fn len(&self) -> usize {
		self.composites.len()
	}

	/// Return `true` when no composite is registered.
	pub fn is_empty(&self) -> bool {
		self.composites.is_empty()
	}

	/// Register a new list and return its handle.
	pub fn alloc_list(&mut self, items: Vec<Value>) -> CompositeId {
		self.push(Composite::List(items))
	}

	/// Register a new map and return its handle.
	pub fn alloc_map(&mut self, entries: Vec<(Value, Value)>) -> CompositeId {
		self.push(Composite::Map(entries))
	}

	/// Borrow the elements of a registered list.
	pub fn list_items(&self, id: CompositeId) -> Result<&[Value]> {
		match self.composite(id)? {
			Composite::List(items) => Ok(items),
			other => Err(HessianError::CompositeKindMismatch {
				id,
				expected: "list",
				actual: other.kind(),
			}),
		}
	}

	/// Borrow the entries of a registered map.
	pub fn map_entries(&self, id: CompositeId) -> Result<&[(Value, Value)]> {
		match self.composite(id)? {
			Composite::Map(entries) => Ok(entries),
			other => Err(HessianError::CompositeKindMismatch {
				id,
				expected: "map",
				actual: other.kind(),
			}),
		}
	}

	/// Append one element to a registered list.
	pub fn push_item(&mut self, id: CompositeId, item: Value) -> Result<()> {
		match self.composite_mut(id)? {
			Composite::List(items) => {
				items.push(item);
				Ok(())
			}
			other => Err(HessianError::CompositeKindMismatch {
				id,
				expected: "list",
				actual: other.kind(),
			}),
		}
	}

	/// Append one key/value pair to a registered map.
	pub fn push_entry(&mut self, id: CompositeId, key: Value, value: Value) -> Result<()> {
		match self.composite_mut(id)? {
			Composite::Map(entries) => {
				entries.push((key, value));
				Ok(())
			}
			other => Err(HessianError::CompositeKindMismatch {
				id,
				expected: "map",
				actual: other.kind(),
			}),
		}
	}

	/// Return the properly tagged value for a composite handle.
	pub fn handle_value(&self, id: CompositeId) -> Result<Value> {
		Ok(match self.composite(id)? {
			Composite::List(_) => Value::List(id),
			Composite::Map(_) => Value::Map(id),
		})
	}

	/// Borrow the composite body behind a handle.
	pub fn composite(&self, id: CompositeId) -> Result<&Composite> {
		self.composites.get(id.0 as usize).ok_or(HessianError::UnknownComposite { id })
	}

	fn composite_mut(&mut self, id: CompositeId) -> Result<&mut Composite> {
		self.composites.get_mut(id.0 as usize).ok_or(HessianError::UnknownComposite { id })
	}

	fn push(&mut self, composite: Composite) -> CompositeId {
		let id = CompositeId(self.composites.len() as u32);
		self.composites.push(composite);
		id
	}
}
