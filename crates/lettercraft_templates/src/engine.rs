//! Template variable substitution.
//!
//! Rendering scans the template once for `{{name}}` tokens built from the
//! declared variable names and resolves each match against the catalogue.
//! Substituted text is never scanned again, so a value that happens to
//! contain `{{other}}` is emitted as-is.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{trace, warn};

use crate::model::{FieldKind, ValueMap, VariableDefinition};

/// Prefix placed before a non-empty list value.
pub const LIST_PREFIX: &str = ", particularly in ";

static ENGINE: LazyLock<TemplateEngine> = LazyLock::new(TemplateEngine::new);

/// Formats an effective value into the text that replaces its token.
pub type Formatter = for<'a> fn(&'a str) -> Cow<'a, str>;

/// Look up the formatter used for a field kind.
pub fn formatter(kind: FieldKind) -> Formatter {
    match kind {
        kind if kind.is_list() => format_list,
        _ => format_verbatim,
    }
}

fn format_verbatim(value: &str) -> Cow<'_, str> {
    Cow::Borrowed(value)
}

fn format_list(value: &str) -> Cow<'_, str> {
    let items = value.trim();
    if items.is_empty() {
        Cow::Borrowed("")
    } else {
        Cow::Owned(format!("{LIST_PREFIX}{items}"))
    }
}

/// Resolve the value substituted for a variable.
///
/// A present, non-empty entry in `values` wins (whitespace-only counts as
/// present), then the variable's default, then the empty string.
pub fn effective_value<'a>(variable: &'a VariableDefinition, values: &'a ValueMap) -> &'a str {
    values
        .get(&variable.id)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .or(variable.default_value.as_deref())
        .unwrap_or("")
}

/// Template engine holding the compiled placeholder patterns.
pub struct TemplateEngine {
    token_pattern: Regex,
    name_pattern: Regex,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// Create a new template engine.
    pub fn new() -> Self {
        Self {
            // Fallback scan; cannot see names that are empty or contain braces
            token_pattern: Regex::new(r"\{\{([^{}]+)\}\}").expect("token pattern is valid"),
            name_pattern: Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("name pattern is valid"),
        }
    }

    /// Render `content`, replacing every `{{name}}` whose name belongs to a
    /// variable in `variables`.
    ///
    /// Tokens with no matching variable are left untouched. When several
    /// variables share a name the first one in the list wins.
    pub fn render(
        &self,
        content: &str,
        variables: &[VariableDefinition],
        values: &ValueMap,
    ) -> String {
        let mut by_name: HashMap<&str, &VariableDefinition> =
            HashMap::with_capacity(variables.len());
        for variable in variables {
            by_name.entry(variable.name.as_str()).or_insert(variable);
        }

        trace!(
            variables = by_name.len(),
            content_len = content.len(),
            "Rendering template"
        );

        if by_name.is_empty() {
            return content.to_string();
        }

        match declared_tokens(by_name.keys().copied()) {
            Ok(pattern) => pattern
                .replace_all(content, |caps: &Captures| substitute(caps, &by_name, values))
                .into_owned(),
            Err(e) => {
                warn!("Falling back to generic token scan: {}", e);
                self.token_pattern
                    .replace_all(content, |caps: &Captures| substitute(caps, &by_name, values))
                    .into_owned()
            }
        }
    }

    /// Collect the distinct placeholder names referenced by `content`.
    pub fn extract_variable_names(&self, content: &str) -> BTreeSet<String> {
        self.name_pattern
            .captures_iter(content)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

fn substitute(
    caps: &Captures,
    by_name: &HashMap<&str, &VariableDefinition>,
    values: &ValueMap,
) -> String {
    match by_name.get(&caps[1]) {
        Some(variable) => {
            let format = formatter(variable.kind);
            format(effective_value(variable, values)).into_owned()
        }
        None => caps[0].to_string(),
    }
}

/// Pattern matching `{{name}}` for exactly the given names.
///
/// Names are matched literally, so empty names and names containing braces
/// still form tokens. Longer names are tried first.
fn declared_tokens<'a>(names: impl Iterator<Item = &'a str>) -> Result<Regex, regex::Error> {
    let mut names: Vec<&str> = names.collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let alternation = names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\{{\{{({alternation})\}}\}}"))
}

/// Render a template with the shared engine.
pub fn render(content: &str, variables: &[VariableDefinition], values: &ValueMap) -> String {
    ENGINE.render(content, variables, values)
}

/// Extract placeholder names with the shared engine.
pub fn extract_variable_names(content: &str) -> BTreeSet<String> {
    ENGINE.extract_variable_names(content)
}
