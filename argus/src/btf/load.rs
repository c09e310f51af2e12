//! Kernel BTF loading (`/sys/kernel/btf/vmlinux` and detached `.btf` files)

use std::fmt::Display;
use std::path::Path;

use btf_rs::{Btf, BtfType};
use tracing::{debug, info};

use super::graph::TypeGraph;
use super::types::{Composite, Member, Param, Type, TypeId};
use crate::error::{Error, Result};

impl TypeGraph {
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		if !path.exists() {
			return Err(Error::BtfFileMissing(path.to_path_buf()));
		}

		let btf = Btf::from_file(path).map_err(|err| Error::BtfParse {
			path: path.to_path_buf(),
			reason: err.to_string(),
		})?;
		let graph = Self::from_btf(&btf)?;
		info!(btf_file = %path.display(), types = graph.len(), "BTF loaded");

		Ok(graph)
	}

	/// Copies every type of `btf` into a new graph. Arena ids are the BTF type ids.
	pub fn from_btf(btf: &Btf) -> Result<Self> {
		let mut graph = TypeGraph::new();

		let mut type_id = 1;
		while let Ok(ty) = btf.resolve_type_by_id(type_id) {
			graph.add(convert(btf, type_id, &ty)?);
			type_id += 1;
		}
		debug!(last_type_id = type_id - 1, "BTF types converted");

		graph.validate()?;
		Ok(graph)
	}
}

fn type_err<E: Display>(type_id: u32) -> impl FnOnce(E) -> Error {
	move |err| Error::BtfType {
		type_id,
		reason: err.to_string(),
	}
}

/// Declared name, `None` for anonymous types.
fn name_of<T: BtfType>(btf: &Btf, type_id: u32, item: &T) -> Result<Option<String>> {
	let name = btf.resolve_name(item).map_err(type_err(type_id))?;
	Ok(Some(name).filter(|name| !name.is_empty()))
}

fn target_of<T: BtfType>(type_id: u32, item: &T) -> Result<TypeId> {
	item.get_type_id().map(TypeId).map_err(type_err(type_id))
}

fn convert(btf: &Btf, type_id: u32, ty: &btf_rs::Type) -> Result<Type> {
	// Struct and union bodies share one layout.
	macro_rules! composite {
		($body:expr) => {
			Composite {
				name: name_of(btf, type_id, $body)?,
				size: $body.size() as u32,
				members: $body
					.members
					.iter()
					.map(|member| {
						Ok(Member {
							name: name_of(btf, type_id, member)?,
							type_id: target_of(type_id, member)?,
							offset_bits: member.bit_offset(),
							bitfield_size: member.bitfield_size().map_or(0, |bits| bits as u8),
						})
					})
					.collect::<Result<Vec<_>>>()?,
			}
		};
	}

	let ty = match ty {
		btf_rs::Type::Void => Type::Void,
		btf_rs::Type::Int(int) => Type::Int {
			name: name_of(btf, type_id, int)?.unwrap_or_default(),
			size: int.size() as u32,
			signed: int.is_signed(),
		},
		btf_rs::Type::Ptr(ptr) => Type::Pointer {
			target: target_of(type_id, ptr)?,
		},
		btf_rs::Type::Array(array) => Type::Array {
			elem: target_of(type_id, array)?,
			len: array.len() as u32,
		},
		btf_rs::Type::Struct(body) => Type::Struct(composite!(body)),
		btf_rs::Type::Union(body) => Type::Union(composite!(body)),
		btf_rs::Type::Enum(en) => Type::Enum {
			name: name_of(btf, type_id, en)?,
			size: en.size() as u32,
		},
		btf_rs::Type::Fwd(fwd) => Type::Fwd {
			name: name_of(btf, type_id, fwd)?.unwrap_or_default(),
			union: fwd.is_union(),
		},
		btf_rs::Type::Typedef(typedef) => Type::Typedef {
			name: name_of(btf, type_id, typedef)?.unwrap_or_default(),
			target: target_of(type_id, typedef)?,
		},
		btf_rs::Type::Volatile(qualifier) => Type::Volatile {
			target: target_of(type_id, qualifier)?,
		},
		btf_rs::Type::Const(qualifier) => Type::Const {
			target: target_of(type_id, qualifier)?,
		},
		btf_rs::Type::Restrict(qualifier) => Type::Restrict {
			target: target_of(type_id, qualifier)?,
		},
		btf_rs::Type::TypeTag(tag) => Type::TypeTag {
			name: name_of(btf, type_id, tag)?.unwrap_or_default(),
			target: target_of(type_id, tag)?,
		},
		btf_rs::Type::Func(func) => Type::Func {
			name: name_of(btf, type_id, func)?.unwrap_or_default(),
			proto: target_of(type_id, func)?,
		},
		btf_rs::Type::FuncProto(proto) => Type::FuncProto {
			ret: TypeId(proto.return_type_id()),
			params: proto
				.parameters
				.iter()
				.map(|param| {
					Ok(Param {
						name: name_of(btf, type_id, param)?,
						type_id: target_of(type_id, param)?,
					})
				})
				.collect::<Result<Vec<_>>>()?,
		},
		btf_rs::Type::Float(float) => Type::Float {
			name: name_of(btf, type_id, float)?.unwrap_or_default(),
			size: float.size() as u32,
		},
		// Variables, data sections, decl tags and 64-bit enums are never walked.
		_ => Type::Opaque,
	};

	Ok(ty)
}

// region:    --- Tests


// endregion: --- Tests
