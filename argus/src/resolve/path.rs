use argus_common::MAX_BTF_ARG_DEPTH;
use tracing::debug;

use super::descriptor::{Descriptor, DescriptorArray};
use crate::btf::{normalize, Member, Type, TypeGraph, TypeId};
use crate::error::{Error, Result};

/// One component of a padded path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
	Field(String),
	/// Dereference of the current pointer, inserted for pointer-typed roots.
	Deref,
}

impl PathSegment {
	fn label(&self) -> &str {
		match self {
			PathSegment::Field(name) => name,
			PathSegment::Deref => "*",
		}
	}
}

fn display_path(path: &[PathSegment]) -> String {
	path.iter().map(PathSegment::label).collect::<Vec<_>>().join(".")
}

/// Splits a dotted path and prepends one [`PathSegment::Deref`] per pointer level
/// of `root`.
pub fn pad_path(graph: &TypeGraph, root: TypeId, dotted: &str) -> Result<Vec<PathSegment>> {
	let fields = dotted.split('.').map(|name| {
		if name.is_empty() {
			Err(Error::InvalidPath {
				path: dotted.to_string(),
			})
		} else {
			Ok(PathSegment::Field(name.to_string()))
		}
	});
	let fields = fields.collect::<Result<Vec<_>>>()?;

	let too_deep = || Error::MaxDepthExceeded {
		path: dotted.to_string(),
		max: MAX_BTF_ARG_DEPTH,
	};

	let mut padding = 0;
	let mut current = normalize(graph, root)?;
	while let Type::Pointer { target } = graph.get(current)? {
		padding += 1;
		if padding + fields.len() > MAX_BTF_ARG_DEPTH {
			return Err(too_deep());
		}
		current = normalize(graph, *target)?;
	}
	if fields.len() > MAX_BTF_ARG_DEPTH {
		return Err(too_deep());
	}

	let mut path = vec![PathSegment::Deref; padding];
	path.extend(fields);
	Ok(path)
}

struct FoundMember {
	offset: u32,
	type_id: TypeId,
}

type MemberLookup = fn(&TypeGraph, &[Member], &str) -> Result<Option<FoundMember>>;

/// Direct members win over members of anonymous structs, which win over members
/// of embedded unions. Only one level of embedding is searched.
const MEMBER_LOOKUPS: [MemberLookup; 3] = [direct_member, anonymous_struct_member, union_member];

fn find_member(graph: &TypeGraph, members: &[Member], name: &str) -> Result<Option<FoundMember>> {
	for lookup in MEMBER_LOOKUPS {
		if let Some(found) = lookup(graph, members, name)? {
			return Ok(Some(found));
		}
	}
	Ok(None)
}

fn direct_member(_graph: &TypeGraph, members: &[Member], name: &str) -> Result<Option<FoundMember>> {
	Ok(members.iter().find(|m| m.has_name(name)).map(|m| FoundMember {
		offset: m.offset_bytes(),
		type_id: m.type_id,
	}))
}

fn anonymous_struct_member(graph: &TypeGraph, members: &[Member], name: &str) -> Result<Option<FoundMember>> {
	embedded_member(graph, members, name, |member, ty| {
		member.is_anonymous() && matches!(ty, Type::Struct(_))
	})
}

fn union_member(graph: &TypeGraph, members: &[Member], name: &str) -> Result<Option<FoundMember>> {
	embedded_member(graph, members, name, |_, ty| matches!(ty, Type::Union(_)))
}

fn embedded_member(
	graph: &TypeGraph,
	members: &[Member],
	name: &str,
	embeds: impl Fn(&Member, &Type) -> bool,
) -> Result<Option<FoundMember>> {
	for member in members {
		let ty = graph.get(normalize(graph, member.type_id)?)?;
		if !embeds(member, ty) {
			continue;
		}
		let Some(inner) = ty.members().and_then(|inner| inner.iter().find(|m| m.has_name(name))) else {
			continue;
		};
		return Ok(Some(FoundMember {
			offset: member.offset_bytes().saturating_add(inner.offset_bytes()),
			type_id: inner.type_id,
		}));
	}
	Ok(None)
}

fn deref_step(graph: &TypeGraph, raw: TypeId, current: TypeId) -> Result<(Descriptor, TypeId)> {
	match graph.get(current)? {
		Type::Pointer { target } => Ok((Descriptor::pointer(0), *target)),
		_ => Err(Error::UnexpectedType {
			attribute: String::new(),
			type_name: graph.type_name(raw),
		}),
	}
}

fn field_step(
	graph: &TypeGraph,
	raw: TypeId,
	current: TypeId,
	name: &str,
	is_last: bool,
) -> Result<(Descriptor, TypeId)> {
	let Some(members) = graph.get(current)?.members() else {
		return Err(Error::UnexpectedType {
			attribute: name.to_string(),
			type_name: graph.type_name(raw),
		});
	};
	let found = find_member(graph, members, name)?.ok_or_else(|| Error::AttributeNotFound {
		attribute: name.to_string(),
		container: graph.type_name(raw),
	})?;

	let member_ty = normalize(graph, found.type_id)?;
	match graph.get(member_ty)? {
		Type::Pointer { target } => Ok((Descriptor::pointer(found.offset), *target)),
		ty => {
			let step = Descriptor {
				offset: found.offset,
				is_pointer: is_last && ty.is_integer(),
			};
			Ok((step, found.type_id))
		}
	}
}

/// Walks `path` from `root`, writing one descriptor per segment into `out`
/// starting at slot `start`.
///
/// Returns the normalized type reached at the end of the path. On error `out`
/// is left untouched.
pub fn resolve_path(
	out: &mut DescriptorArray,
	graph: &TypeGraph,
	root: TypeId,
	path: &[PathSegment],
	start: usize,
) -> Result<TypeId> {
	if start > out.len() {
		return Err(Error::InvalidStartIndex {
			start,
			filled: out.len(),
		});
	}
	if start + path.len() > MAX_BTF_ARG_DEPTH {
		return Err(Error::MaxDepthExceeded {
			path: display_path(path),
			max: MAX_BTF_ARG_DEPTH,
		});
	}

	let mut steps = out.clone();
	steps.truncate(start);

	let mut raw = root;
	let mut current = normalize(graph, root)?;
	for (pos, segment) in path.iter().enumerate() {
		let (step, next) = match segment {
			PathSegment::Deref => deref_step(graph, raw, current)?,
			PathSegment::Field(name) => field_step(graph, raw, current, name, pos + 1 == path.len())?,
		};
		debug!(
			segment = segment.label(),
			offset = step.offset,
			is_pointer = step.is_pointer,
			"resolved path step"
		);
		steps.push(step)?;
		raw = next;
		current = normalize(graph, next)?;
	}

	*out = steps;
	Ok(current)
}

// region:    --- Tests


// endregion: --- Tests
