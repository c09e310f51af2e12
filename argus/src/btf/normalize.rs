use super::graph::TypeGraph;
use super::types::TypeId;
use crate::error::Result;

/// Strips typedefs and qualifiers (`const`, `volatile`, `restrict`, type tags)
/// until a structural type is reached.
///
/// Pointers, arrays, structs and every other kind are returned unchanged.
pub fn normalize(graph: &TypeGraph, id: TypeId) -> Result<TypeId> {
	let mut current = id;

	// A wrapper chain longer than the graph can only loop on itself.
	for _ in 0..graph.len() {
		match graph.get(current)?.wrapped() {
			Some(target) => current = target,
			None => break,
		}
	}

	Ok(current)
}

// region:    --- Tests


// endregion: --- Tests
