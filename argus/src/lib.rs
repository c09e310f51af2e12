pub mod btf;
pub mod error;
pub mod policy;
pub mod resolve;

pub use self::error::{Error, Result};
