use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum PugcError {
	#[error(transparent)]
	#[diagnostic(code(pugc::io_error))]
	Io(#[from] std::io::Error),

	#[error("file not found: `{path}`")]
	#[diagnostic(
		code(pugc::input_not_found),
		help("pass the path of an existing `.pug` document as the first argument")
	)]
	InputNotFound { path: String },

	#[error("malformed markup at {line}:{column}: {reason}")]
	#[diagnostic(code(pugc::malformed_markup))]
	MalformedMarkup {
		line: usize,
		column: usize,
		reason: String,
	},

	#[error("output template not found: `{path}`")]
	#[diagnostic(
		code(pugc::template_not_found),
		help("set `[templates] dir` in pugc.toml or pass `--templates <DIR>`")
	)]
	TemplateNotFound { path: String },

	#[error("template rendering failed: {0}")]
	#[diagnostic(code(pugc::template_render))]
	TemplateRender(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(pugc::config_parse),
		help("check that pugc.toml is valid TOML with [templates], [output] and/or [locale] sections")
	)]
	ConfigParse(String),
}

impl PugcError {
	pub(crate) fn malformed(line: usize, column: usize, reason: impl Into<String>) -> Self {
		Self::MalformedMarkup {
			line,
			column,
			reason: reason.into(),
		}
	}
}

pub type PugcResult<T> = Result<T, PugcError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
