use argus_common::{BtfArgConfig, BtfArgStep, MAX_BTF_ARG_DEPTH};

use crate::error::{Error, Result};

/// One resolved step: add `offset` to the current address, then dereference it
/// when `is_pointer` is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Descriptor {
	pub offset: u32,
	pub is_pointer: bool,
}

impl Descriptor {
	pub fn field(offset: u32) -> Self {
		Self {
			offset,
			is_pointer: false,
		}
	}

	pub fn pointer(offset: u32) -> Self {
		Self {
			offset,
			is_pointer: true,
		}
	}
}

/// Fixed-capacity descriptor sequence handed to the probe.
///
/// Only the first `len()` slots are meaningful. The rest stay zeroed, which the
/// probe reads as "not initialized".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DescriptorArray {
	steps: [Descriptor; MAX_BTF_ARG_DEPTH],
	len: usize,
}

impl DescriptorArray {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn as_slice(&self) -> &[Descriptor] {
		&self.steps[..self.len]
	}

	pub(crate) fn push(&mut self, step: Descriptor) -> Result<()> {
		let slot = self.steps.get_mut(self.len).ok_or(Error::MaxDepthExceeded {
			path: String::new(),
			max: MAX_BTF_ARG_DEPTH,
		})?;
		*slot = step;
		self.len += 1;
		Ok(())
	}

	/// Drops every step from `len` on.
	pub(crate) fn truncate(&mut self, len: usize) {
		if len < self.len {
			self.steps[len..self.len].fill(Descriptor::default());
			self.len = len;
		}
	}

	/// Kernel-facing layout: every used slot marked initialized, the rest zeroed.
	pub fn to_config(&self) -> BtfArgConfig {
		let mut config = BtfArgConfig::default();
		for (slot, step) in config.iter_mut().zip(self.as_slice()) {
			*slot = BtfArgStep::new(step.offset, step.is_pointer);
		}
		config
	}

	/// Reads back a kernel-facing array. Initialized slots must form a prefix.
	pub fn from_config(config: &BtfArgConfig) -> Result<Self> {
		let mut steps = Self::new();
		for (slot, raw) in config.iter().enumerate() {
			match (raw.is_initialized(), slot == steps.len) {
				(true, true) => steps.push(Descriptor {
					offset: raw.offset,
					is_pointer: raw.is_pointer(),
				})?,
				(true, false) => return Err(Error::InvalidDescriptorLayout { slot }),
				(false, _) => {}
			}
		}
		Ok(steps)
	}
}

// region:    --- Tests


// endregion: --- Tests
