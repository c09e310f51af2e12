use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::btf::TypeGraph;
use crate::error::{Error, Result};
use crate::resolve::{resolve_arg, ResolvedArg};

/// A TOML file listing the argument paths a probe needs.
///
/// ```toml
/// btf = "/sys/kernel/btf/vmlinux"
///
/// [[args]]
/// hook = "security_bprm_check"
/// index = 0
/// paths = ["file.f_path.dentry.d_name.name", "mm.arg_start"]
/// ```
#[cfg_attr(test, derive(PartialEq))]
#[derive(Debug, Deserialize, Clone)]
pub struct Policy {
	pub btf: Option<PathBuf>,
	pub lib_dir: Option<PathBuf>,
	#[serde(default)]
	pub args: Vec<ArgSelector>,
}

#[cfg_attr(test, derive(PartialEq))]
#[derive(Debug, Deserialize, Clone)]
pub struct ArgSelector {
	pub hook: String,
	pub index: usize,
	pub paths: Vec<String>,
}

impl Policy {
	#[allow(clippy::should_implement_trait)]
	pub fn from_str(s: &str) -> Result<Self> {
		let policy: Policy = toml::from_str(s)?;
		Ok(policy)
	}

	pub fn from_file(policy_path: impl AsRef<Path>) -> Result<Self> {
		let policy_path = policy_path.as_ref();

		if !policy_path.exists() {
			return Err(Error::PolicyPathNotFound(policy_path.display().to_string()));
		}

		let content = std::fs::read_to_string(policy_path)?;
		Self::from_str(&content)
	}
}

/// Resolves every selector of `policy`. The first failure rejects the whole policy.
pub fn compile_policy(graph: &TypeGraph, policy: &Policy) -> Result<Vec<ResolvedArg>> {
	let mut resolved = Vec::new();
	for selector in &policy.args {
		for path in &selector.paths {
			resolved.push(resolve_arg(graph, &selector.hook, selector.index, path)?);
		}
	}
	info!(selectors = policy.args.len(), resolved = resolved.len(), "policy compiled");
	Ok(resolved)
}

// region:    --- Tests


// endregion: --- Tests
