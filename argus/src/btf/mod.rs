//! Kernel BTF (BPF Type Format) loading and type graph
//!
//! Loads the kernel's BTF (parsed by `btf_rs`) into an arena ([`TypeGraph`]) that the path
//! resolver walks. The graph is read-only once built and can be shared across
//! threads.

mod discovery;
mod graph;
mod load;
mod normalize;
mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use discovery::{
	cached_btf_file, find_btf_file, init_cached_btf, kernel_release, BtfSearch, BTF_ENV, DEFAULT_BTF_FILE,
};
pub use graph::TypeGraph;
pub use normalize::normalize;
pub use types::{Composite, Member, Param, Type, TypeId};
