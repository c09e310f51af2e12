use std::collections::HashMap;

use super::types::{Type, TypeId};
use crate::error::{Error, Result};

/// Immutable-after-load arena of BTF types.
///
/// Types reference each other by [`TypeId`], so self-referential kernel structs
/// (`task_struct::parent` and friends) are plain indices and never owned cycles.
#[derive(Debug, Clone)]
pub struct TypeGraph {
	types: Vec<Type>,
	names: HashMap<String, Vec<TypeId>>,
}

impl Default for TypeGraph {
	fn default() -> Self {
		Self::new()
	}
}

impl TypeGraph {
	pub fn new() -> Self {
		Self {
			types: vec![Type::Void],
			names: HashMap::new(),
		}
	}

	pub fn add(&mut self, ty: Type) -> TypeId {
		let id = TypeId(self.types.len() as u32);
		if let Some(name) = ty.name().filter(|name| !name.is_empty()) {
			self.names.entry(name.to_string()).or_default().push(id);
		}
		self.types.push(ty);
		id
	}

	/// Reserves an id for a struct defined later with [`TypeGraph::define`].
	pub fn declare(&mut self, name: impl Into<String>) -> TypeId {
		self.add(Type::Fwd {
			name: name.into(),
			union: false,
		})
	}

	pub fn define(&mut self, id: TypeId, ty: Type) -> Result<()> {
		let slot = self.types.get_mut(id.index()).ok_or(Error::UnknownTypeId(id.as_u32()))?;

		if let Some(ids) = slot.name().and_then(|old| self.names.get_mut(old)) {
			ids.retain(|other| *other != id);
		}
		if let Some(name) = ty.name().filter(|name| !name.is_empty()) {
			let ids = self.names.entry(name.to_string()).or_default();
			ids.push(id);
			ids.sort_unstable();
		}

		*slot = ty;
		Ok(())
	}

	pub fn get(&self, id: TypeId) -> Result<&Type> {
		self.types.get(id.index()).ok_or(Error::UnknownTypeId(id.as_u32()))
	}

	/// Number of types, `void` included.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.len() <= 1
	}

	pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Type)> {
		self.types.iter().enumerate().map(|(idx, ty)| (TypeId(idx as u32), ty))
	}

	pub fn types_by_name(&self, name: &str) -> &[TypeId] {
		self.names.get(name).map(Vec::as_slice).unwrap_or_default()
	}

	/// First function carrying `name`. Structs, typedefs and enums sharing the
	/// name are passed over.
	pub fn func_by_name(&self, name: &str) -> Option<TypeId> {
		self.types_by_name(name)
			.iter()
			.copied()
			.find(|id| matches!(self.types.get(id.index()), Some(Type::Func { .. })))
	}

	pub fn struct_by_name(&self, name: &str) -> Option<TypeId> {
		self.types_by_name(name)
			.iter()
			.copied()
			.find(|id| matches!(self.types.get(id.index()), Some(Type::Struct(_))))
	}

	/// Name used in diagnostics: the declared name, `*` per pointer level, qualifiers
	/// skipped, the kind for anonymous types.
	pub fn type_name(&self, id: TypeId) -> String {
		let mut prefix = String::new();
		let mut current = id;

		for _ in 0..self.types.len() {
			let Some(ty) = self.types.get(current.index()) else {
				break;
			};
			if let Some(name) = ty.name().filter(|name| !name.is_empty()) {
				return format!("{prefix}{name}");
			}
			match ty {
				Type::Pointer { target } => {
					prefix.push('*');
					current = *target;
				}
				Type::Volatile { target }
				| Type::Const { target }
				| Type::Restrict { target }
				| Type::TypeTag { target, .. } => current = *target,
				other => return format!("{prefix}{}", other.kind_name()),
			}
		}

		format!("{prefix}<invalid>")
	}

	/// Size in bytes of a value of this type. Pointers are 8 bytes, types without
	/// storage (void, fwd, functions) are 0.
	pub fn size_of(&self, id: TypeId) -> Result<u32> {
		let mut current = id;
		let mut multiplier = 1u32;

		for _ in 0..self.types.len() {
			let size = match self.get(current)? {
				Type::Int { size, .. } | Type::Enum { size, .. } | Type::Float { size, .. } => *size,
				Type::Struct(c) | Type::Union(c) => c.size,
				Type::Pointer { .. } => 8,
				Type::Array { elem, len } => {
					multiplier = multiplier.saturating_mul(*len);
					current = *elem;
					continue;
				}
				Type::Typedef { target, .. }
				| Type::Volatile { target }
				| Type::Const { target }
				| Type::Restrict { target }
				| Type::TypeTag { target, .. } => {
					current = *target;
					continue;
				}
				Type::Void | Type::Fwd { .. } | Type::Func { .. } | Type::FuncProto { .. } | Type::Opaque => 0,
			};
			return Ok(size.saturating_mul(multiplier));
		}

		Ok(0)
	}

	/// Checks that every referenced type id exists.
	pub fn validate(&self) -> Result<()> {
		for ty in &self.types {
			if let Some(dangling) = ty.references().into_iter().find(|id| id.index() >= self.types.len()) {
				return Err(Error::UnknownTypeId(dangling.as_u32()));
			}
		}
		Ok(())
	}
}

// region:    --- Tests


// endregion: --- Tests
