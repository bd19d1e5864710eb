mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Check that a JSON document parses
	Check(tools::check::Subcommand),

	#[clap(alias = "fmt")]
	/// Parse a JSON document and write it back out
	Format(tools::format::Subcommand),

	/// Show the structure of a JSON document
	Probe(tools::probe::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Check(arguments) => tools::check::run(arguments),
		Commands::Format(arguments) => tools::format::run(arguments),
		Commands::Probe(arguments) => tools::probe::run(arguments),
	}
}
