use std::path::PathBuf;

use derive_more::{Display, From};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Display, From)]
pub enum Error {
	#[from(String, &String, &str)]
	#[display("{_0}")]
	Custom(String),

	// -- Hook lookup
	#[display("failed to find BTF type for hook {hook:?}")]
	HookNotFound { hook: String },
	#[display("failed to find BTF type for hook {hook:?}: expected function type, got {kind}")]
	NotAFunction { hook: String, kind: &'static str },
	#[display("failed to get param for hook {hook:?}: index {index} is out of range (hook has {count} params)")]
	ArgIndexOutOfRange { hook: String, index: usize, count: usize },

	// -- Path resolution
	#[display("attribute {attribute:?} not found in structure {container:?}")]
	AttributeNotFound { attribute: String, container: String },
	#[display("unexpected type : {attribute:?} has type {type_name:?}")]
	UnexpectedType { attribute: String, type_name: String },
	#[display("unable to resolve {path:?}: the maximum depth allowed is {max}")]
	MaxDepthExceeded { path: String, max: usize },
	#[display("invalid path {path:?}: empty path component")]
	InvalidPath { path: String },
	#[display("start index {start} is past the {filled} resolved steps")]
	InvalidStartIndex { start: usize, filled: usize },
	#[display("descriptor slot {slot} breaks the initialized prefix")]
	InvalidDescriptorLayout { slot: usize },

	// -- Type graph
	#[display("unknown BTF type id {_0}")]
	UnknownTypeId(u32),

	// -- BTF loading
	#[display("failed to parse BTF {}: {reason}", path.display())]
	BtfParse { path: PathBuf, reason: String },
	#[display("failed to read BTF type {type_id}: {reason}")]
	BtfType { type_id: u32, reason: String },

	// -- BTF discovery
	#[display("BTF discovery: candidate btf file does not exist: {}", _0.display())]
	BtfNotFound(PathBuf),
	#[display("BTF file '{}' does not exist", _0.display())]
	BtfFileMissing(PathBuf),
	#[display("uname failed: {_0}")]
	Uname(std::io::Error),

	// -- Policy
	#[display("No policy file found at '{_0}'")]
	PolicyPathNotFound(String),
	#[from]
	#[display("{_0}")]
	TomlDe(toml::de::Error),

	// -- Externals
	#[from]
	#[display("{_0}")]
	Io(std::io::Error),
}

// region:    --- Error Boilerplate

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
