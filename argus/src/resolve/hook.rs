use crate::btf::{Param, Type, TypeGraph};
use crate::error::{Error, Result};

/// Finds parameter `index` of the kernel function `hook`.
///
/// Other kinds sharing the name are skipped. `NotAFunction` reports the first of
/// them when no function carries the name.
pub fn locate_hook_param<'g>(graph: &'g TypeGraph, hook: &str, index: usize) -> Result<&'g Param> {
	let Some(id) = graph.func_by_name(hook) else {
		let first = graph.types_by_name(hook).first().copied();
		return Err(match first {
			Some(other) => Error::NotAFunction {
				hook: hook.to_string(),
				kind: graph.get(other)?.kind_name(),
			},
			None => Error::HookNotFound { hook: hook.to_string() },
		});
	};

	let proto = match graph.get(id)? {
		Type::Func { proto, .. } => graph.get(*proto)?,
		other => {
			return Err(Error::NotAFunction {
				hook: hook.to_string(),
				kind: other.kind_name(),
			})
		}
	};
	let Type::FuncProto { params, .. } = proto else {
		return Err(Error::NotAFunction {
			hook: hook.to_string(),
			kind: proto.kind_name(),
		});
	};

	params.get(index).ok_or_else(|| Error::ArgIndexOutOfRange {
		hook: hook.to_string(),
		index,
		count: params.len(),
	})
}

// region:    --- Tests


// endregion: --- Tests
