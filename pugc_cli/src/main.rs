use std::path::Path;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use owo_colors::OwoColorize;
use pugc_cli::PugcCli;
use pugc_core::AnyEmptyResult;
use pugc_core::LocaleScanner;
use pugc_core::OutputTemplates;
use pugc_core::PugcConfig;
use pugc_core::PugcError;
use pugc_core::PugcResult;
use pugc_core::compile_file;
use pugc_core::generate;
use pugc_core::write_artifacts;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
	let args = match PugcCli::try_parse() {
		Ok(args) => args,
		Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
		Err(e) => {
			let _ = e.print();
			process::exit(1);
		}
	};

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_logging(args.verbose);

	if let Err(e) = run(&args) {
		let prefix = if use_color {
			format!("{}", "error:".red())
		} else {
			"error:".to_string()
		};

		// Compiler errors carry miette codes and help text.
		match e.downcast::<PugcError>() {
			Ok(pugc_err) => {
				let report: miette::Report = (*pugc_err).into();
				eprintln!("{prefix} {report:?}");
			}
			Err(e) => eprintln!("{prefix} {e}"),
		}
		process::exit(1);
	}
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn run(args: &PugcCli) -> AnyEmptyResult {
	let root = std::env::current_dir()?;
	let mut config = load_config(args, &root)?;

	if let Some(dir) = &args.templates {
		config.templates.dir.clone_from(dir);
	}

	let scanner = LocaleScanner::new(config.locale.function.as_str());
	let params = compile_file(&args.input, &scanner)?;

	if args.emit_blocks {
		println!("{}", serde_json::to_string_pretty(&params.blocks)?);
	}

	let templates = OutputTemplates::load(&root, &config.templates)?;
	let artifacts = generate(&params, &templates)?;
	let [declaration, definition] = write_artifacts(&artifacts, &args.output_dir, &config.output)?;

	if args.verbose {
		eprintln!("wrote {}", declaration.display());
		eprintln!("wrote {}", definition.display());
	}

	Ok(())
}

fn load_config(args: &PugcCli, root: &Path) -> PugcResult<PugcConfig> {
	let config = match &args.config {
		Some(path) => Some(PugcConfig::load_file(path)?),
		None => PugcConfig::load(root)?,
	};

	debug!(found = config.is_some(), "resolved config");

	Ok(config.unwrap_or_default())
}
