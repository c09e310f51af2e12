//! Type representations for kernel BTF information

/// Index of a type inside a [`TypeGraph`](super::TypeGraph).
///
/// Ids follow BTF numbering: `0` is `void` and loaded types start at `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
	pub const VOID: TypeId = TypeId(0);

	pub fn as_u32(self) -> u32 {
		self.0
	}

	pub(crate) fn index(self) -> usize {
		self.0 as usize
	}
}

/// A struct or union member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
	/// `None` for anonymous embedded structs and unions
	pub name: Option<String>,
	pub type_id: TypeId,
	/// Offset in bits from the start of the containing aggregate
	pub offset_bits: u32,
	/// Non-zero for bitfield members
	pub bitfield_size: u8,
}

impl Member {
	pub fn new(name: impl Into<String>, type_id: TypeId, offset_bytes: u32) -> Self {
		Self {
			name: Some(name.into()),
			type_id,
			offset_bits: offset_bytes * 8,
			bitfield_size: 0,
		}
	}

	pub fn anonymous(type_id: TypeId, offset_bytes: u32) -> Self {
		Self {
			name: None,
			type_id,
			offset_bits: offset_bytes * 8,
			bitfield_size: 0,
		}
	}

	/// Byte offset, truncated for bitfields.
	pub fn offset_bytes(&self) -> u32 {
		self.offset_bits / 8
	}

	pub fn is_anonymous(&self) -> bool {
		self.name.as_deref().map_or(true, str::is_empty)
	}

	pub fn has_name(&self, name: &str) -> bool {
		self.name.as_deref() == Some(name)
	}
}

/// A function prototype parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
	pub name: Option<String>,
	pub type_id: TypeId,
}

impl Param {
	pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
		Self {
			name: Some(name.into()),
			type_id,
		}
	}
}

/// Body of a struct or union.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composite {
	pub name: Option<String>,
	/// Size in bytes
	pub size: u32,
	pub members: Vec<Member>,
}

impl Composite {
	pub fn new(name: impl Into<String>, size: u32, members: Vec<Member>) -> Self {
		Self {
			name: Some(name.into()),
			size,
			members,
		}
	}

	pub fn anonymous(size: u32, members: Vec<Member>) -> Self {
		Self {
			name: None,
			size,
			members,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
	Void,
	Int { name: String, size: u32, signed: bool },
	Pointer { target: TypeId },
	Array { elem: TypeId, len: u32 },
	Struct(Composite),
	Union(Composite),
	Enum { name: Option<String>, size: u32 },
	Fwd { name: String, union: bool },
	Typedef { name: String, target: TypeId },
	Volatile { target: TypeId },
	Const { target: TypeId },
	Restrict { target: TypeId },
	TypeTag { name: String, target: TypeId },
	Func { name: String, proto: TypeId },
	FuncProto { ret: TypeId, params: Vec<Param> },
	Float { name: String, size: u32 },
	/// Kinds carried in the graph but never walked (variables, data sections, decl tags)
	Opaque,
}

impl Type {
	pub fn int(name: impl Into<String>, size: u32, signed: bool) -> Self {
		Type::Int {
			name: name.into(),
			size,
			signed,
		}
	}

	pub fn typedef(name: impl Into<String>, target: TypeId) -> Self {
		Type::Typedef {
			name: name.into(),
			target,
		}
	}

	/// Declared type name. A type tag's text (`rcu`, `user`) annotates the
	/// pointee and is not a name.
	pub fn name(&self) -> Option<&str> {
		match self {
			Type::Int { name, .. }
			| Type::Fwd { name, .. }
			| Type::Typedef { name, .. }
			| Type::Func { name, .. }
			| Type::Float { name, .. } => Some(name),
			Type::Struct(c) | Type::Union(c) => c.name.as_deref(),
			Type::Enum { name, .. } => name.as_deref(),
			Type::Void
			| Type::Pointer { .. }
			| Type::Array { .. }
			| Type::Volatile { .. }
			| Type::Const { .. }
			| Type::Restrict { .. }
			| Type::TypeTag { .. }
			| Type::FuncProto { .. }
			| Type::Opaque => None,
		}
	}

	pub fn kind_name(&self) -> &'static str {
		match self {
			Type::Void => "void",
			Type::Int { .. } => "int",
			Type::Pointer { .. } => "pointer",
			Type::Array { .. } => "array",
			Type::Struct(_) => "struct",
			Type::Union(_) => "union",
			Type::Enum { .. } => "enum",
			Type::Fwd { .. } => "fwd",
			Type::Typedef { .. } => "typedef",
			Type::Volatile { .. } => "volatile",
			Type::Const { .. } => "const",
			Type::Restrict { .. } => "restrict",
			Type::TypeTag { .. } => "type_tag",
			Type::Func { .. } => "func",
			Type::FuncProto { .. } => "func_proto",
			Type::Float { .. } => "float",
			Type::Opaque => "opaque",
		}
	}

	/// Target of a transparent wrapper (typedef or qualifier), if this is one.
	pub fn wrapped(&self) -> Option<TypeId> {
		match self {
			Type::Typedef { target, .. }
			| Type::Volatile { target }
			| Type::Const { target }
			| Type::Restrict { target }
			| Type::TypeTag { target, .. } => Some(*target),
			Type::Void
			| Type::Int { .. }
			| Type::Pointer { .. }
			| Type::Array { .. }
			| Type::Struct(_)
			| Type::Union(_)
			| Type::Enum { .. }
			| Type::Fwd { .. }
			| Type::Func { .. }
			| Type::FuncProto { .. }
			| Type::Float { .. }
			| Type::Opaque => None,
		}
	}

	pub fn members(&self) -> Option<&[Member]> {
		match self {
			Type::Struct(c) | Type::Union(c) => Some(&c.members),
			_ => None,
		}
	}

	/// Leaves read through their address. Enums do not count.
	pub fn is_integer(&self) -> bool {
		matches!(self, Type::Int { .. })
	}

	/// Every type id this type refers to.
	pub(crate) fn references(&self) -> Vec<TypeId> {
		match self {
			Type::Pointer { target }
			| Type::Typedef { target, .. }
			| Type::Volatile { target }
			| Type::Const { target }
			| Type::Restrict { target }
			| Type::TypeTag { target, .. } => vec![*target],
			Type::Array { elem, .. } => vec![*elem],
			Type::Func { proto, .. } => vec![*proto],
			Type::Struct(c) | Type::Union(c) => c.members.iter().map(|m| m.type_id).collect(),
			Type::FuncProto { ret, params } => std::iter::once(*ret).chain(params.iter().map(|p| p.type_id)).collect(),
			Type::Void | Type::Int { .. } | Type::Enum { .. } | Type::Fwd { .. } | Type::Float { .. } | Type::Opaque => {
				Vec::new()
			}
		}
	}
}
