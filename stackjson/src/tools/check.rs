use super::parse_input;
use anyhow::Result;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// JSON file to check, or "-" to read from stdin
	#[arg(required = true)]
	input_file: String,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let value = parse_input(&arguments.input_file)?;
	log::info!("'{}' holds a valid {}", arguments.input_file, value.type_as_str());
	println!("ok");
	Ok(())
}
