use tracing::debug;

use super::descriptor::DescriptorArray;
use super::hook::locate_hook_param;
use super::path::{pad_path, resolve_path};
use crate::btf::{normalize, Type, TypeGraph, TypeId};
use crate::error::Result;

/// Descriptors for one `(hook, argument, path)` selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArg {
	pub hook: String,
	pub index: usize,
	pub path: String,
	pub steps: DescriptorArray,
	/// Normalized type at the end of the path
	pub final_type: TypeId,
	pub final_size: u32,
}

/// Resolves `dotted` against argument `index` of `hook`.
///
/// The probe already holds the argument value, so one pointer level of the
/// argument type is consumed before the path is padded.
pub fn resolve_arg(graph: &TypeGraph, hook: &str, index: usize, dotted: &str) -> Result<ResolvedArg> {
	let param = locate_hook_param(graph, hook, index)?;
	let root = match graph.get(normalize(graph, param.type_id)?)? {
		Type::Pointer { target } => *target,
		_ => param.type_id,
	};

	let path = pad_path(graph, root, dotted)?;
	let mut steps = DescriptorArray::new();
	let final_type = resolve_path(&mut steps, graph, root, &path, 0)?;
	let final_size = graph.size_of(final_type)?;

	debug!(hook, index, path = dotted, steps = steps.len(), "argument path resolved");

	Ok(ResolvedArg {
		hook: hook.to_string(),
		index,
		path: dotted.to_string(),
		steps,
		final_type,
		final_size,
	})
}

// region:    --- Tests


// endregion: --- Tests
