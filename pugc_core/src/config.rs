use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DEFAULT_LOCALE_FUNCTION;
use crate::PugcError;
use crate::PugcResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["pugc.toml", ".pugc.toml", ".config/pugc.toml"];

/// Configuration loaded from a `pugc.toml` file.
///
/// Every section is optional:
///
/// ```toml
/// [templates]
/// dir = "templates"
/// declaration = "header.jinja"
/// definition = "impl.jinja"
///
/// [output]
/// declaration_extension = "hpp"
/// definition_extension = "cpp"
///
/// [locale]
/// function = "_"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PugcConfig {
	#[serde(default)]
	pub templates: TemplatesConfig,
	#[serde(default)]
	pub output: OutputConfig,
	#[serde(default)]
	pub locale: LocaleConfig,
}

/// Where the two output templates are read from.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
	/// Directory holding both templates, relative to the working directory.
	pub dir: PathBuf,
	/// File name of the declaration template inside `dir`.
	pub declaration: PathBuf,
	/// File name of the definition template inside `dir`.
	pub definition: PathBuf,
}

impl Default for TemplatesConfig {
	fn default() -> Self {
		Self {
			dir: PathBuf::from("templates"),
			declaration: PathBuf::from("header.jinja"),
			definition: PathBuf::from("impl.jinja"),
		}
	}
}

/// File extensions of the generated artifacts.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
	pub declaration_extension: String,
	pub definition_extension: String,
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self {
			declaration_extension: "hpp".to_string(),
			definition_extension: "cpp".to_string(),
		}
	}
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleConfig {
	/// Translation function called by locale blocks.
	pub function: String,
}

impl Default for LocaleConfig {
	fn default() -> Self {
		Self {
			function: DEFAULT_LOCALE_FUNCTION.to_string(),
		}
	}
}

impl PugcConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> PugcResult<Option<PugcConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_file(&config_path).map(Some)
	}

	/// Load the config from an explicit path.
	pub fn load_file(path: &Path) -> PugcResult<PugcConfig> {
		let content = std::fs::read_to_string(path)?;
		toml::from_str(&content).map_err(|e| PugcError::ConfigParse(e.to_string()))
	}
}
