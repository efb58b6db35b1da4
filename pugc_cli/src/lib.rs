use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about = "Compile a pug page template into a C++ header and source file.",
	long_about = "pugc compiles one pug document into a C++ render function.\n\nThe document is \
	              flattened into static text, variable expressions and translated strings. Text \
	              wrapped in `_(...)` becomes a call to the translation function. Two files are \
	              written to the output directory, named after the input file:\n\n  pugc \
	              pages/login.pug generated\n\nproduces `generated/login.hpp` and \
	              `generated/login.cpp`."
)]
pub struct PugcCli {
	/// The `.pug` document to compile.
	pub input: PathBuf,

	/// Directory the generated files are written to. Created if missing.
	pub output_dir: PathBuf,

	/// Directory holding the declaration and definition templates. Overrides
	/// `[templates] dir` from the config file.
	#[arg(long, short)]
	pub templates: Option<PathBuf>,

	/// Path to a config file. When omitted, `pugc.toml`, `.pugc.toml` and
	/// `.config/pugc.toml` are searched in the working directory.
	#[arg(long, short)]
	pub config: Option<PathBuf>,

	/// Print the optimized block sequence as JSON to stdout.
	#[arg(long, default_value_t = false)]
	pub emit_blocks: bool,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}
