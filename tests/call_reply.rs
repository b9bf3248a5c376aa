#![allow(missing_docs)]

use hessrpc::hessian::{Client, HessianError, Result, Transport, Value, ValueArena, parse_reply, to_json, write_call};

/// Transport returning a canned reply while capturing the request bytes.
struct CannedTransport {
	reply: Vec<u8>,
	last_request: Vec<u8>,
}

impl CannedTransport {
	fn new(reply: Vec<u8>) -> Self {
		Self {
			reply,
			last_request: Vec::new(),
		}
	}
}

impl Transport for CannedTransport {
	fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>> {
		self.last_request = request.to_vec();
		Ok(self.reply.clone())
	}
}

#[test]
fn add_invocation_round_trips_through_transport() {
	let mut reply = b"r\x01\x00I".to_vec();
	reply.extend_from_slice(&7_i32.to_be_bytes());

	let mut client = Client::new(CannedTransport::new(reply));
	let mut arena = ValueArena::new();
	let value = client.invoke("add", &[Value::Int(3), Value::Int(4)], &mut arena).expect("invocation succeeds");
	assert_eq!(value, Value::Int(7));

	let mut expected = b"c\x00\x01m\x00\x03add".to_vec();
	expected.push(b'I');
	expected.extend_from_slice(&3_i32.to_be_bytes());
	expected.push(b'I');
	expected.extend_from_slice(&4_i32.to_be_bytes());
	expected.push(b'z');
	assert_eq!(client.into_transport().last_request, expected);
}

#[test]
fn remote_fault_propagates_with_resolvable_detail() {
	let mut reply = b"r\x01\x00f".to_vec();
	push_string(&mut reply, "code");
	push_string(&mut reply, "ServiceException");
	push_string(&mut reply, "message");
	push_string(&mut reply, "boom");
	push_string(&mut reply, "detail");
	reply.push(b'M');
	push_string(&mut reply, "cause");
	push_string(&mut reply, "overflow");
	reply.push(b'z');
	reply.push(b'z');

	let mut client = Client::new(CannedTransport::new(reply));
	let mut arena = ValueArena::new();
	let err = client.invoke("work", &[], &mut arena).expect_err("server reported a fault");

	let HessianError::Fault(fault) = err else {
		panic!("expected remote fault, got {err:?}");
	};
	assert_eq!(fault.code, Value::String("ServiceException".to_owned()));
	assert_eq!(fault.message, Value::String("boom".to_owned()));

	let Value::Map(detail) = fault.detail else {
		panic!("expected map detail, got {:?}", fault.detail);
	};
	let entries = arena.map_entries(detail).expect("detail stays reachable after the error");
	assert_eq!(entries[0].1, Value::String("overflow".to_owned()));
}

#[test]
fn values_survive_a_wire_round_trip() {
	let mut arena = ValueArena::new();
	let map = arena.alloc_map(vec![
		(Value::String("name".to_owned()), Value::String("héllo wörld".to_owned())),
		(Value::String("raw".to_owned()), Value::Bytes(vec![0, 1, 254, 255])),
	]);
	let inner = arena.alloc_list(vec![Value::Long(5_000_000_000), Value::Double(-0.25)]);
	let root = arena.alloc_list(vec![
		Value::Null,
		Value::Bool(true),
		Value::Int(-42),
		Value::Date(1_700_000_000_123),
		Value::Map(map),
		Value::typed("demo.Vector", Value::List(inner)),
	]);

	let mut decoded_arena = ValueArena::new();
	let decoded = round_trip(&arena, &Value::List(root), &mut decoded_arena);

	let before = to_json(&arena, &Value::List(root)).expect("original renders");
	let after = to_json(&decoded_arena, &decoded).expect("decoded renders");
	assert_eq!(before, after);
}

#[test]
fn in_range_long_canonicalizes_to_int() {
	let arena = ValueArena::new();
	let mut decoded_arena = ValueArena::new();
	let decoded = round_trip(&arena, &Value::Long(41), &mut decoded_arena);
	assert_eq!(decoded, Value::Int(41));
}

#[test]
fn shared_composite_keeps_identity_across_the_wire() {
	let mut arena = ValueArena::new();
	let map = arena.alloc_map(vec![(Value::String("k".to_owned()), Value::Int(1))]);
	let root = arena.alloc_list(vec![Value::Map(map), Value::Map(map)]);

	let mut decoded_arena = ValueArena::new();
	let decoded = round_trip(&arena, &Value::List(root), &mut decoded_arena);

	let Value::List(list) = decoded else {
		panic!("expected list, got {decoded:?}");
	};
	let items = decoded_arena.list_items(list).expect("list resolves");
	assert_eq!(items[0], items[1], "both slots must point at one composite");
}

#[test]
fn chunk_boundaries_do_not_affect_reassembly() {
	let text = "chunk boundaries are transport noise";
	let splits: [&[&str]; 3] = [
		&[text],
		&["chunk bound", "aries are transport noise"],
		&["chunk", " boundaries ", "are transport noise"],
	];

	let mut decoded = Vec::new();
	for chunks in splits {
		let mut reply = b"r\x01\x00".to_vec();
		for (index, chunk) in chunks.iter().enumerate() {
			let terminal = index == chunks.len() - 1;
			reply.push(if terminal { b'S' } else { b's' });
			reply.extend_from_slice(&(chunk.chars().count() as u16).to_be_bytes());
			reply.extend_from_slice(chunk.as_bytes());
		}

		let mut arena = ValueArena::new();
		decoded.push(parse_reply(&reply, &mut arena).expect("reply parses"));
	}

	assert_eq!(decoded[0], Value::String(text.to_owned()));
	assert_eq!(decoded[0], decoded[1]);
	assert_eq!(decoded[1], decoded[2]);
}

/// Encode `value` as a single call argument, re-wrap the argument bytes as a
/// reply envelope, and decode them into `decoded_arena`.
fn round_trip(arena: &ValueArena, value: &Value, decoded_arena: &mut ValueArena) -> Value {
	let call = write_call(arena, "x", &[value.clone()]).expect("call encodes");
	// call layout: 'c' 0x00 0x01 'm' <u16 len> "x" <argument> 'z'
	let argument = &call[7..call.len() - 1];

	let mut reply = b"r\x01\x00".to_vec();
	reply.extend_from_slice(argument);
	parse_reply(&reply, decoded_arena).expect("reply parses")
}

fn push_string(out: &mut Vec<u8>, text: &str) {
	out.push(b'S');
	out.extend_from_slice(&(text.chars().count() as u16).to_be_bytes());
	out.extend_from_slice(text.as_bytes());
}
