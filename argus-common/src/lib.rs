#![no_std]

mod btf_arg;

pub use btf_arg::*;
