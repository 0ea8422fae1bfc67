#![allow(missing_docs)]

use clap::{Parser, Subcommand};

use crate::cmd::ReportOptions;
use crate::demo::DemoType;

mod cmd;
mod demo;

#[derive(Parser)]
#[command(name = "cbridge", about = "Inspect C-ABI layouts and images of Rust values")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Layout {
		#[arg(long = "type", value_enum, default_value_t = DemoType::Event)]
		ty: DemoType,
		#[arg(long)]
		packed: bool,
		#[arg(long)]
		json: bool,
	},
	Roundtrip {
		#[arg(long = "type", value_enum, default_value_t = DemoType::Event)]
		ty: DemoType,
		#[arg(long)]
		packed: bool,
		#[arg(long)]
		json: bool,
	},
}

fn main() {
	env_logger::init();
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> cmd::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Layout { ty, packed, json } => cmd::layout::run(ReportOptions::new(ty, packed, json)),
		Commands::Roundtrip { ty, packed, json } => cmd::roundtrip::run(ReportOptions::new(ty, packed, json)),
	}
}
