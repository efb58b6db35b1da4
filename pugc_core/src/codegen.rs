use std::collections::HashSet;
use std::path::Path;

use minijinja::Environment;
use minijinja::UndefinedBehavior;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::BlockKind;
use crate::Blocks;
use crate::PugcError;
use crate::PugcResult;
use crate::TemplatesConfig;

const DECLARATION_TEMPLATE: &str = "declaration";
const DEFINITION_TEMPLATE: &str = "definition";

/// The record handed to both output templates.
///
/// Templates see the block sequence as `json`, the distinct variable
/// expressions as `variables`, and the unit name as `namespace`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildParams {
	#[serde(rename = "json")]
	pub blocks: Blocks,
	pub variables: Vec<String>,
	pub namespace: String,
}

impl BuildParams {
	/// Build the record for an optimized block sequence. Variable expressions
	/// that are not plain identifiers are used verbatim but logged as a
	/// warning.
	pub fn new(blocks: Blocks, namespace: impl Into<String>) -> Self {
		let variables = collect_variables(&blocks);

		for variable in variables.iter().filter(|v| !is_identifier(v)) {
			warn!(
				variable = variable.as_str(),
				"variable expression is not a plain identifier and will be used verbatim"
			);
		}

		Self {
			blocks,
			variables,
			namespace: namespace.into(),
		}
	}
}

/// Distinct values of all variable blocks, in order of first appearance.
pub fn collect_variables(blocks: &Blocks) -> Vec<String> {
	let mut seen = HashSet::new();

	blocks
		.iter()
		.filter(|block| block.kind == BlockKind::Variable)
		.filter(|block| seen.insert(block.value.as_str()))
		.map(|block| block.value.clone())
		.collect()
}

/// The unit name for an input document: its file name without the extension.
///
/// The name is not sanitized. `pages/login.pug` gives `login`; a name that is
/// not a valid identifier in the generated language is passed through as is.
pub fn namespace_from_path(path: &Path) -> String {
	path.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.unwrap_or_default()
}

fn is_identifier(value: &str) -> bool {
	let mut chars = value.chars();
	chars
		.next()
		.is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Sources of the two output templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplates {
	pub declaration: String,
	pub definition: String,
}

impl OutputTemplates {
	pub fn new(declaration: impl Into<String>, definition: impl Into<String>) -> Self {
		Self {
			declaration: declaration.into(),
			definition: definition.into(),
		}
	}

	/// The C++ header and source templates shipped with this crate.
	pub fn builtin() -> Self {
		Self::new(
			include_str!("../templates/header.jinja"),
			include_str!("../templates/impl.jinja"),
		)
	}

	/// Read both templates from the directory described by `config`,
	/// relative to `root`.
	pub fn load(root: &Path, config: &TemplatesConfig) -> PugcResult<Self> {
		let dir = root.join(&config.dir);
		let read = |name: &Path| {
			let path = dir.join(name);
			std::fs::read_to_string(&path).map_err(|_| PugcError::TemplateNotFound {
				path: path.display().to_string(),
			})
		};

		Ok(Self {
			declaration: read(&config.declaration)?,
			definition: read(&config.definition)?,
		})
	}
}

/// Both rendered artifacts of one compiled document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
	pub namespace: String,
	pub declaration: String,
	pub definition: String,
}

/// Render the declaration and definition artifacts for `params`.
///
/// Both are rendered before this returns, so a failure in either leaves
/// nothing to write.
pub fn generate(params: &BuildParams, templates: &OutputTemplates) -> PugcResult<Artifacts> {
	let env = environment(templates)?;
	let ctx = minijinja::Value::from_serialize(params);
	let render = |name: &str| {
		env.get_template(name)
			.and_then(|template| template.render(&ctx))
			.map_err(|e| PugcError::TemplateRender(e.to_string()))
	};

	let declaration = render(DECLARATION_TEMPLATE)?;
	let definition = render(DEFINITION_TEMPLATE)?;

	debug!(
		namespace = params.namespace.as_str(),
		blocks = params.blocks.len(),
		variables = params.variables.len(),
		"rendered artifacts"
	);

	Ok(Artifacts {
		namespace: params.namespace.clone(),
		declaration,
		definition,
	})
}

fn environment(templates: &OutputTemplates) -> PugcResult<Environment<'_>> {
	let mut env = Environment::new();
	env.set_keep_trailing_newline(true);
	env.set_trim_blocks(true);
	env.set_lstrip_blocks(true);
	env.set_undefined_behavior(UndefinedBehavior::Strict);
	env.add_filter("cstr", c_string_literal);

	env.add_template(DECLARATION_TEMPLATE, &templates.declaration)
		.map_err(|e| PugcError::TemplateRender(e.to_string()))?;
	env.add_template(DEFINITION_TEMPLATE, &templates.definition)
		.map_err(|e| PugcError::TemplateRender(e.to_string()))?;

	Ok(env)
}

/// Escape `value` for use between the quotes of a C or C++ string literal.
pub fn c_string_literal(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());

	for c in value.chars() {
		match c {
			'\\' => escaped.push_str("\\\\"),
			'"' => escaped.push_str("\\\""),
			'\n' => escaped.push_str("\\n"),
			'\r' => escaped.push_str("\\r"),
			'\t' => escaped.push_str("\\t"),
			c => escaped.push(c),
		}
	}

	escaped
}
