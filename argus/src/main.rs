mod cli;

use argus::{
	btf::{init_cached_btf, TypeGraph},
	policy::{compile_policy, Policy},
	resolve::{resolve_arg, ResolvedArg},
	Result,
};
use clap::Parser;
use cli::args::{BtfArgs, Cli, Command};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn load_graph(btf: &BtfArgs) -> Result<TypeGraph> {
	let btf_file = init_cached_btf(btf.lib_dir.as_deref(), btf.btf.as_deref())?;
	info!(btf_file = %btf_file.display(), "loading BTF");
	TypeGraph::from_file(btf_file)
}

fn print_resolved(graph: &TypeGraph, resolved: &ResolvedArg) {
	println!(
		"{}[{}] {} -> {} ({} bytes)",
		resolved.hook,
		resolved.index,
		resolved.path,
		graph.type_name(resolved.final_type),
		resolved.final_size
	);
	for (slot, step) in resolved.steps.as_slice().iter().enumerate() {
		let kind = if step.is_pointer { "pointer" } else { "field" };
		println!("  [{slot}] offset={:<6} {kind}", step.offset);
	}
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_target(false)
		.with_env_filter(EnvFilter::from_default_env())
		.init();

	let args = Cli::parse();

	match args.command {
		Command::Resolve { hook, arg, path, btf } => {
			let graph = load_graph(&btf)?;
			let resolved = resolve_arg(&graph, &hook, arg, &path)?;
			print_resolved(&graph, &resolved);
		}

		Command::Policy { file, btf } => {
			let policy = Policy::from_file(&file)?;
			// Command line flags win over the policy file.
			let btf = BtfArgs {
				btf: btf.btf.or_else(|| policy.btf.clone()),
				lib_dir: btf.lib_dir.or_else(|| policy.lib_dir.clone()),
			};
			let graph = load_graph(&btf)?;
			for resolved in compile_policy(&graph, &policy)? {
				print_resolved(&graph, &resolved);
			}
		}

		Command::Locate(btf) => {
			let btf_file = init_cached_btf(btf.lib_dir.as_deref(), btf.btf.as_deref())?;
			println!("{}", btf_file.display());
		}
	}

	Ok(())
}
