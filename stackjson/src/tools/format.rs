use super::parse_input;
use anyhow::Result;
use stackjson_core::json::{JsonValue, stringify_pretty_multi_line};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// JSON file to format, or "-" to read from stdin
	#[arg(required = true)]
	input_file: String,

	/// pretty print: containers that do not fit into --width are broken over several lines
	#[arg(long, short, conflicts_with = "display")]
	pretty: bool,

	/// print for reading: a top level string without quotes, strings unescaped
	#[arg(long, short)]
	display: bool,

	/// maximum line width used by --pretty
	#[arg(long, default_value_t = 80, requires = "pretty")]
	width: usize,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let value = parse_input(&arguments.input_file)?;
	println!("{}", render(&value, arguments));
	Ok(())
}

fn render(value: &JsonValue, arguments: &Subcommand) -> String {
	if arguments.pretty {
		stringify_pretty_multi_line(value, arguments.width, 0, 0)
	} else if arguments.display {
		value.to_display_string()
	} else {
		value.stringify()
	}
}
