//! Locating the kernel BTF file on the host

use std::ffi::CStr;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{info, warn};

use crate::error::{Error, Result};

pub const DEFAULT_BTF_FILE: &str = "/sys/kernel/btf/vmlinux";
/// Environment variable overriding the discovery chain.
pub const BTF_ENV: &str = "ARGUS_BTF";

static CACHED_BTF_FILE: OnceLock<PathBuf> = OnceLock::new();

/// Candidate locations, probed in order by [`BtfSearch::find`].
#[derive(Debug, Clone)]
pub struct BtfSearch {
	pub default_file: PathBuf,
	/// Agent lib directory. Without one only the default file is probed.
	pub lib_dir: Option<PathBuf>,
	pub env_override: Option<PathBuf>,
	pub kernel_release: Option<String>,
}

impl BtfSearch {
	/// Search rooted at the running host: `ARGUS_BTF`, `uname -r` and the default paths.
	pub fn from_host(lib_dir: Option<&Path>) -> Self {
		let kernel_release = match kernel_release() {
			Ok(release) => Some(release),
			Err(err) => {
				warn!("BTF discovery: {err}");
				None
			}
		};

		Self {
			default_file: PathBuf::from(DEFAULT_BTF_FILE),
			lib_dir: lib_dir.map(Path::to_path_buf),
			env_override: std::env::var_os(BTF_ENV).filter(|v| !v.is_empty()).map(PathBuf::from),
			kernel_release,
		}
	}

	/// Returns the first BTF file that exists.
	///
	/// An explicit path or the environment override must exist: neither falls
	/// back to the rest of the chain.
	pub fn find(&self, explicit: Option<&Path>) -> Result<PathBuf> {
		if let Some(btf) = explicit {
			return existing(btf);
		}
		if let Some(btf) = &self.env_override {
			info!(btf_file = %btf.display(), "BTF discovery: using {BTF_ENV}");
			return existing(btf);
		}

		if self.default_file.exists() {
			info!(btf_file = %self.default_file.display(), "BTF discovery: default kernel btf file found");
			return Ok(self.default_file.clone());
		}
		info!(btf_file = %self.default_file.display(), "BTF discovery: default kernel btf file does not exist");

		let Some(lib_dir) = &self.lib_dir else {
			return Err(Error::BtfNotFound(self.default_file.clone()));
		};

		if let Some(release) = &self.kernel_release {
			let candidate = lib_dir.join("metadata").join(format!("vmlinux-{release}"));
			if candidate.exists() {
				info!(btf_file = %candidate.display(), "BTF discovery: candidate btf file found");
				return Ok(candidate);
			}
			info!(btf_file = %candidate.display(), "BTF discovery: candidate btf file does not exist");
		}

		let candidate = lib_dir.join("btf");
		if candidate.exists() {
			info!(btf_file = %candidate.display(), "BTF discovery: candidate btf file found");
			return Ok(candidate);
		}

		Err(Error::BtfNotFound(candidate))
	}
}

fn existing(path: &Path) -> Result<PathBuf> {
	if path.exists() {
		Ok(path.to_path_buf())
	} else {
		Err(Error::BtfFileMissing(path.to_path_buf()))
	}
}

pub fn find_btf_file(lib_dir: Option<&Path>, explicit: Option<&Path>) -> Result<PathBuf> {
	BtfSearch::from_host(lib_dir).find(explicit)
}

/// Runs discovery once per process. Later calls return the first result.
pub fn init_cached_btf(lib_dir: Option<&Path>, explicit: Option<&Path>) -> Result<&'static Path> {
	if let Some(cached) = CACHED_BTF_FILE.get() {
		return Ok(cached);
	}
	let found = find_btf_file(lib_dir, explicit)?;
	Ok(CACHED_BTF_FILE.get_or_init(|| found))
}

pub fn cached_btf_file() -> Option<&'static Path> {
	CACHED_BTF_FILE.get().map(PathBuf::as_path)
}

/// Running kernel release, as printed by `uname -r`.
pub fn kernel_release() -> Result<String> {
	// SAFETY: utsname is plain old data, an all-zero value is valid.
	let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
	if unsafe { libc::uname(&mut uts) } != 0 {
		return Err(Error::Uname(std::io::Error::last_os_error()));
	}
	// SAFETY: uname NUL-terminates every field it fills.
	let release = unsafe { CStr::from_ptr(uts.release.as_ptr()) };
	Ok(release.to_string_lossy().into_owned())
}

// region:    --- Tests


// endregion: --- Tests
