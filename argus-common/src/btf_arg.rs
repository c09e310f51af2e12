use zerocopy_derive::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Number of steps the kernel-side reader walks for one argument path. The reader is
/// unrolled over this many slots, so it must match the probe program.
pub const MAX_BTF_ARG_DEPTH: usize = 10;

/// One hop of an argument path as the probe program reads it.
///
/// `offset` is added to the current address; when `is_pointer` is set the probe reads a
/// pointer at that address and continues from it (on the last initialized step it means the
/// value itself is read through the address). Slots with `is_initialized == 0` end the walk.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct BtfArgStep {
	pub offset: u32,         // 0..4
	pub is_pointer: u16,     // 4..6
	pub is_initialized: u16, // 6..8
}

pub type BtfArgConfig = [BtfArgStep; MAX_BTF_ARG_DEPTH];

impl BtfArgStep {
	pub const fn new(offset: u32, is_pointer: bool) -> Self {
		Self {
			offset,
			is_pointer: is_pointer as u16,
			is_initialized: 1,
		}
	}

	pub fn is_initialized(&self) -> bool {
		self.is_initialized != 0
	}

	pub fn is_pointer(&self) -> bool {
		self.is_pointer != 0
	}
}

#[cfg(feature = "user")]
unsafe impl aya::Pod for BtfArgStep {}

// region:    --- Tests


// endregion: --- Tests
