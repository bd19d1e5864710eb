use super::parse_input;
use anyhow::Result;
use stackjson_core::json::JsonValue;
use std::{
	collections::BTreeMap,
	fmt::{self, Display},
};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// JSON file to probe, or "-" to read from stdin
	#[arg(required = true)]
	input_file: String,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let value = parse_input(&arguments.input_file)?;
	print!("{}", Summary::of(&value));
	Ok(())
}

/// Shape of a parsed document.
#[derive(Debug, PartialEq)]
struct Summary {
	root: &'static str,
	/// Nesting level of the deepest container, the root being level 1.
	max_depth: usize,
	counts: BTreeMap<&'static str, usize>,
}

impl Summary {
	/// Walk the tree with an explicit stack, so arbitrarily deep documents can be probed.
	fn of(root: &JsonValue) -> Self {
		let mut summary = Summary {
			root: root.type_as_str(),
			max_depth: 0,
			counts: BTreeMap::new(),
		};

		let mut stack = vec![(root, 1)];
		while let Some((value, depth)) = stack.pop() {
			*summary.counts.entry(value.type_as_str()).or_default() += 1;
			match value {
				JsonValue::Array(array) => {
					summary.max_depth = summary.max_depth.max(depth);
					stack.extend(array.iter().map(|child| (child, depth + 1)));
				}
				JsonValue::Object(object) => {
					summary.max_depth = summary.max_depth.max(depth);
					stack.extend(object.iter().map(|(_, child)| (child, depth + 1)));
				}
				_ => {}
			}
		}
		summary
	}

	fn total(&self) -> usize {
		self.counts.values().sum()
	}
}

impl Display for Summary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "root:   {}", self.root)?;
		writeln!(f, "depth:  {}", self.max_depth)?;
		writeln!(f, "values: {}", self.total())?;
		for (name, count) in &self.counts {
			writeln!(f, "  {name}: {count}")?;
		}
		Ok(())
	}
}
