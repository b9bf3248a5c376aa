use serde_json::{Map as JsonMap, Number, Value as Json};

use crate::hessian::Result;
use crate::hessian::arena::{Composite, CompositeId, ValueArena};
use crate::hessian::value::{Record, Value};

/// Render a decoded value graph as JSON for inspection output.
///
/// Dates render as their millisecond count, binary payloads as lowercase
/// hex, and a composite revisited along one rendering path (a cycle) as the
/// string `"<circular>"`. Map keys are stringified; duplicate keys collapse
/// to the last occurrence, so this surface is diagnostic, not a codec.
pub fn to_json(arena: &ValueArena, value: &Value) -> Result<Json> {
	render(arena, value, &mut Vec::new())
}

fn render(arena: &ValueArena, value: &Value, trail: &mut Vec<CompositeId>) -> Result<Json> {
	Ok(match value {
		Value::Null => Json::Null,
		Value::Bool(v) => Json::Bool(*v),
		Value::Int(v) => Json::Number(Number::from(*v)),
		Value::Long(v) => Json::Number(Number::from(*v)),
		Value::Double(v) => Number::from_f64(*v).map(Json::Number).unwrap_or(Json::Null),
		Value::Date(millis) => Json::Number(Number::from(*millis)),
		Value::String(text) => Json::String(text.clone()),
		Value::Bytes(data) => Json::String(hex_label(data)),
		Value::List(id) | Value::Map(id) => render_composite(arena, *id, trail)?,
		Value::Typed(wrapper) => {
			let mut object = JsonMap::new();
			object.insert("type".to_owned(), Json::String(wrapper.type_name.clone()));
			object.insert("value".to_owned(), render(arena, &wrapper.value, trail)?);
			Json::Object(object)
		}
		Value::Record(record) => render_record(arena, record, trail)?,
	})
}

fn render_composite(arena: &ValueArena, id: CompositeId, trail: &mut Vec<CompositeId>) -> Result<Json> {
	if trail.contains(&id) {
		return Ok(Json::String("<circular>".to_owned()));
	}

	trail.push(id);
	let rendered = match arena.composite(id)? {
		Composite::List(items) => {
			let mut out = Vec::with_capacity(items.len());
			for item in items {
				out.push(render(arena, item, trail)?);
			}
			Json::Array(out)
		}
		Composite::Map(entries) => {
			let mut object = JsonMap::new();
			for (key, value) in entries {
				object.insert(key_label(key), render(arena, value, trail)?);
			}
			Json::Object(object)
		}
	};
	trail.pop();

	Ok(rendered)
}

fn render_record(arena: &ValueArena, record: &Record, trail: &mut Vec<CompositeId>) -> Result<Json> {
	let mut object = JsonMap::new();
	for field in &record.fields {
		object.insert(field.name.to_string(), render(arena, &field.value, trail)?);
	}
	Ok(Json::Object(object))
}

fn key_label(key: &Value) -> String {
	match key {
		Value::Null => "null".to_owned(),
		Value::Bool(v) => v.to_string(),
		Value::Int(v) => v.to_string(),
		Value::Long(v) => v.to_string(),
		Value::Double(v) => v.to_string(),
		Value::Date(millis) => millis.to_string(),
		Value::String(text) => text.clone(),
		Value::Bytes(data) => hex_label(data),
		other => format!("<{}>", other.kind()),
	}
}

fn hex_label(data: &[u8]) -> String {
	let mut out = String::with_capacity(data.len() * 2);
	for byte in data {
		out.push_str(&format!("{byte:02x}"));
	}
	out
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use crate::hessian::{Value, ValueArena, to_json};

	#[test]
	fn renders_scalars_and_composites() {
		let mut arena = ValueArena::new();
		let map = arena.alloc_map(vec![(Value::String("n".to_owned()), Value::Int(1))]);
		let list = arena.alloc_list(vec![Value::Map(map), Value::Bytes(vec![0xAB, 0x01]), Value::Date(99)]);

		let rendered = to_json(&arena, &Value::List(list)).expect("graph renders");
		assert_eq!(rendered, json!([{ "n": 1 }, "ab01", 99]));
	}

	#[test]
	fn renders_typed_wrapper_as_annotated_object() {
		let mut arena = ValueArena::new();
		let list = arena.alloc_list(vec![Value::Int(5)]);

		let rendered = to_json(&arena, &Value::typed("demo.Type", Value::List(list))).expect("graph renders");
		assert_eq!(rendered, json!({ "type": "demo.Type", "value": [5] }));
	}

	#[test]
	fn marks_cycles_instead_of_recursing() {
		let mut arena = ValueArena::new();
		let list = arena.alloc_list(Vec::new());
		arena.push_item(list, Value::List(list)).expect("push succeeds");

		let rendered = to_json(&arena, &Value::List(list)).expect("graph renders");
		assert_eq!(rendered, json!(["<circular>"]));
	}

	#[test]
	fn shared_non_cyclic_structure_renders_twice() {
		let mut arena = ValueArena::new();
		let map = arena.alloc_map(vec![(Value::String("k".to_owned()), Value::Int(1))]);
		let list = arena.alloc_list(vec![Value::Map(map), Value::Map(map)]);

		let rendered = to_json(&arena, &Value::List(list)).expect("graph renders");
		assert_eq!(rendered, json!([{ "k": 1 }, { "k": 1 }]));
	}
}
