//! Template and variable definitions.
//!
//! This module defines the data-driven content model: variable definitions
//! that describe fillable slots, templates that reference them through
//! `{{name}}` placeholders, and the sender details used as form defaults.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Values entered for the active form, keyed by variable id.
pub type ValueMap = HashMap<String, String>;

/// Kind of input a variable expects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text
    #[default]
    Text,
    Email,
    Phone,
    Date,
    Number,
    /// Multi-line text
    Textarea,
    /// Several picked items, stored as one pre-joined string
    Multiselect,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::Date => "date",
            FieldKind::Number => "number",
            FieldKind::Textarea => "textarea",
            FieldKind::Multiselect => "multiselect",
        }
    }

    /// Whether values of this kind hold a list of items.
    pub fn is_list(&self) -> bool {
        matches!(self, FieldKind::Multiselect)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Template variable definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariableDefinition {
    /// Stable identifier, unique within a catalogue
    pub id: String,
    /// Token name used inside template text
    pub name: String,
    /// Human-readable form label
    #[serde(default)]
    pub label: String,
    #[serde(default, alias = "fieldType")]
    pub kind: FieldKind,
    /// Input hint shown by the form surface
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    /// Suggested values for list kinds
    #[serde(default)]
    pub options: Vec<String>,
}

impl VariableDefinition {
    /// Create a definition whose token name equals its id.
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            label: id.clone(),
            id,
            kind,
            placeholder: None,
            required: false,
            default_value: None,
            options: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The placeholder token this variable replaces.
    pub fn token(&self) -> String {
        format!("{{{{{}}}}}", self.name)
    }
}

/// Partial update of a variable definition.
#[derive(Debug, Clone, Default)]
pub struct VariablePatch {
    pub name: Option<String>,
    pub label: Option<String>,
    pub kind: Option<FieldKind>,
    pub placeholder: Option<Option<String>>,
    pub required: Option<bool>,
    pub default_value: Option<Option<String>>,
    pub options: Option<Vec<String>>,
}

impl VariablePatch {
    pub(crate) fn apply(self, var: &mut VariableDefinition) {
        if let Some(name) = self.name {
            var.name = name;
        }
        if let Some(label) = self.label {
            var.label = label;
        }
        if let Some(kind) = self.kind {
            var.kind = kind;
        }
        if let Some(placeholder) = self.placeholder {
            var.placeholder = placeholder;
        }
        if let Some(required) = self.required {
            var.required = required;
        }
        if let Some(default_value) = self.default_value {
            var.default_value = default_value;
        }
        if let Some(options) = self.options {
            var.options = options;
        }
    }
}

/// A named text document with placeholder tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Unique template identifier
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Raw text with `{{name}}` placeholders
    pub content: String,
    /// Ids of the variables the form exposes for this template
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Template {
    pub fn new(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            content: content.into(),
            variables: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_variables<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether the template declares a variable id.
    pub fn declares(&self, variable_id: &str) -> bool {
        self.variables.iter().any(|v| v == variable_id)
    }
}

/// Partial update of a template.
#[derive(Debug, Clone, Default)]
pub struct TemplatePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub variables: Option<Vec<String>>,
}

impl TemplatePatch {
    pub(crate) fn apply(self, template: &mut Template) {
        if let Some(name) = self.name {
            template.name = name;
        }
        if let Some(description) = self.description {
            template.description = description;
        }
        if let Some(content) = self.content {
            template.content = content;
        }
        if let Some(variables) = self.variables {
            template.variables = variables;
        }
        template.updated_at = Utc::now();
    }
}

/// Sender details used to prefill the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SenderDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub linked_in: Option<String>,
    #[serde(default)]
    pub portfolio: Option<String>,
}

impl SenderDetails {
    /// Look up a detail by the variable id it prefills.
    pub fn get(&self, variable_id: &str) -> Option<&str> {
        let value = match variable_id {
            "fullName" => &self.full_name,
            "email" => &self.email,
            "phone" => &self.phone,
            "address" => &self.address,
            "city" => &self.city,
            "state" => &self.state,
            "zipCode" => &self.zip_code,
            "country" => &self.country,
            "linkedIn" => return self.linked_in.as_deref(),
            "portfolio" => return self.portfolio.as_deref(),
            _ => return None,
        };
        Some(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_from_yaml() {
        let var: VariableDefinition = serde_yaml::from_str(
            r#"
id: techStack
name: techStack
label: Relevant Tech Stack
fieldType: multiselect
options: [React, Go]
"#,
        )
        .unwrap();
        assert_eq!(var.kind, FieldKind::Multiselect);
        assert_eq!(var.options, vec!["React", "Go"]);
        assert!(!var.required);
        assert!(var.default_value.is_none());
    }

    #[test]
    fn test_template_from_yaml_defaults_timestamps() {
        let template: Template = serde_yaml::from_str(
            r#"
id: short
name: Short
content: "Hi {{fullName}}"
variables: [fullName]
"#,
        )
        .unwrap();
        assert!(template.declares("fullName"));
        assert!(!template.declares("email"));
        assert!(template.description.is_empty());
    }

    #[test]
    fn test_token() {
        let var = VariableDefinition::new("position", FieldKind::Text);
        assert_eq!(var.token(), "{{position}}");
    }

    #[test]
    fn test_patch_bumps_updated_at() {
        let mut template = Template::new("t", "T", "body");
        let before = template.updated_at;
        TemplatePatch {
            content: Some("new body".to_string()),
            ..Default::default()
        }
        .apply(&mut template);
        assert_eq!(template.content, "new body");
        assert!(template.updated_at >= before);
    }

    #[test]
    fn test_sender_details_lookup() {
        let details = SenderDetails {
            full_name: "A. Lee".to_string(),
            ..Default::default()
        };
        assert_eq!(details.get("fullName"), Some("A. Lee"));
        assert_eq!(details.get("linkedIn"), None);
        assert_eq!(details.get("companyName"), None);
    }
}
