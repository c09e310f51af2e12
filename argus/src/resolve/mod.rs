//! Hook argument path resolution
//!
//! Turns a `(hook, argument index, dotted path)` selector into the fixed-size
//! descriptor array the probe follows to read a nested kernel value.

mod arg;
mod descriptor;
mod hook;
mod path;

pub use arg::{resolve_arg, ResolvedArg};
pub use descriptor::{Descriptor, DescriptorArray};
pub use hook::locate_hook_param;
pub use path::{pad_path, resolve_path, PathSegment};
