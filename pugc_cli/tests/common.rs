use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;
use pugc_core::AnyEmptyResult;
use pugc_core::OutputTemplates;

pub fn pugc_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("pugc"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// Write the builtin output templates to `<root>/templates`.
pub fn write_builtin_templates(root: &Path) -> AnyEmptyResult {
	let templates = OutputTemplates::builtin();
	let dir = root.join("templates");
	std::fs::create_dir_all(&dir)?;
	std::fs::write(dir.join("header.jinja"), templates.declaration)?;
	std::fs::write(dir.join("impl.jinja"), templates.definition)?;

	Ok(())
}
