use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "argus", about = "Resolve kernel hook argument paths against BTF")]
pub struct Cli {
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BtfArgs {
	/// BTF file to load instead of running discovery
	#[arg(long)]
	pub btf: Option<PathBuf>,

	/// Agent lib directory holding `metadata/vmlinux-<release>` or `btf` fallbacks
	#[arg(long)]
	pub lib_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
	/// Resolve one dotted path against a hook argument
	Resolve {
		#[arg(long)]
		hook: String,

		#[arg(long)]
		arg: usize,

		#[arg(long)]
		path: String,

		#[command(flatten)]
		btf: BtfArgs,
	},

	/// Resolve every argument path listed in a policy file
	Policy {
		file: PathBuf,

		#[command(flatten)]
		btf: BtfArgs,
	},

	/// Print the BTF file discovery settles on
	Locate(BtfArgs),
}
