use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::info;

use crate::Artifacts;
use crate::BuildParams;
use crate::LocaleScanner;
use crate::OutputConfig;
use crate::PugcError;
use crate::PugcResult;
use crate::extract_with;
use crate::namespace_from_path;
use crate::optimize;
use crate::parse;

/// Parse, extract and optimize one document.
pub fn compile_source(
	source: &str,
	namespace: impl Into<String>,
	scanner: &LocaleScanner,
) -> PugcResult<BuildParams> {
	let document = parse(source)?;
	let blocks = extract_with(&document, scanner);
	let extracted = blocks.len();
	let blocks = optimize(blocks);

	debug!(extracted, optimized = blocks.len(), "extracted blocks");

	Ok(BuildParams::new(blocks, namespace))
}

/// Compile the document at `path`. The namespace is the file name without
/// its extension.
pub fn compile_file(path: &Path, scanner: &LocaleScanner) -> PugcResult<BuildParams> {
	if !path.is_file() {
		return Err(PugcError::InputNotFound {
			path: path.display().to_string(),
		});
	}

	let source = std::fs::read_to_string(path)?;
	let namespace = namespace_from_path(path);

	debug!(path = %path.display(), namespace = namespace.as_str(), "compiling");

	compile_source(&source, namespace, scanner)
}

/// The declaration and definition paths for `namespace` inside `out_dir`.
pub fn artifact_paths(namespace: &str, out_dir: &Path, output: &OutputConfig) -> (PathBuf, PathBuf) {
	(
		out_dir.join(format!("{namespace}.{}", output.declaration_extension)),
		out_dir.join(format!("{namespace}.{}", output.definition_extension)),
	)
}

/// Write both artifacts into `out_dir`, replacing existing files. Returns
/// the written paths, declaration first.
pub fn write_artifacts(
	artifacts: &Artifacts,
	out_dir: &Path,
	output: &OutputConfig,
) -> PugcResult<[PathBuf; 2]> {
	let (declaration_path, definition_path) =
		artifact_paths(&artifacts.namespace, out_dir, output);

	std::fs::create_dir_all(out_dir)?;
	std::fs::write(&declaration_path, &artifacts.declaration)?;
	std::fs::write(&definition_path, &artifacts.definition)?;

	info!(
		declaration = %declaration_path.display(),
		definition = %definition_path.display(),
		"wrote artifacts"
	);

	Ok([declaration_path, definition_path])
}
