//! Template library and template checks.
//!
//! The library keeps templates in insertion order together with the id of
//! the active template. Checks compare what a template declares against
//! the placeholders its content actually references.

use tracing::{debug, info};

use crate::catalogue::Catalogue;
use crate::engine::extract_variable_names;
use crate::error::{TemplateError, TemplateResult};
use crate::model::{Template, TemplatePatch};

/// Ordered templates plus the active selection.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
    active_id: Option<String>,
}

impl TemplateLibrary {
    /// Create a library; the first template becomes active.
    pub fn new(templates: Vec<Template>) -> Self {
        let active_id = templates.first().map(|t| t.id.clone());
        Self {
            templates,
            active_id,
        }
    }

    /// List all templates in order.
    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    /// Get a template by id.
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Check if a template exists.
    pub fn exists(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// The active template, falling back to the first one when the active
    /// id is unset or stale.
    pub fn active(&self) -> Option<&Template> {
        self.active_id
            .as_deref()
            .and_then(|id| self.get(id))
            .or_else(|| self.templates.first())
    }

    /// Select the active template.
    pub fn set_active(&mut self, id: &str) -> TemplateResult<()> {
        if !self.exists(id) {
            return Err(TemplateError::NotFound(id.to_string()));
        }
        debug!("Active template: {}", id);
        self.active_id = Some(id.to_string());
        Ok(())
    }

    /// Add a new template.
    pub fn add(&mut self, template: Template) -> TemplateResult<()> {
        if self.exists(&template.id) {
            return Err(TemplateError::AlreadyExists(template.id));
        }
        if self.active_id.is_none() {
            self.active_id = Some(template.id.clone());
        }
        self.templates.push(template);
        Ok(())
    }

    /// Add a template, replacing any existing one with the same id.
    pub fn upsert(&mut self, template: Template) {
        match self.templates.iter().position(|t| t.id == template.id) {
            Some(index) => self.templates[index] = template,
            None => {
                if self.active_id.is_none() {
                    self.active_id = Some(template.id.clone());
                }
                self.templates.push(template);
            }
        }
    }

    /// Apply a partial update; `updated_at` is bumped.
    pub fn update(&mut self, id: &str, patch: TemplatePatch) -> TemplateResult<()> {
        let template = self
            .templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))?;
        patch.apply(template);
        info!("Updated template {}", id);
        Ok(())
    }

    /// Remove a template. Removing the active template activates the first
    /// remaining one.
    pub fn remove(&mut self, id: &str) -> Option<Template> {
        let index = self.templates.iter().position(|t| t.id == id)?;
        let removed = self.templates.remove(index);
        if self.active_id.as_deref() == Some(id) {
            self.active_id = self.templates.first().map(|t| t.id.clone());
        }
        Some(removed)
    }
}

/// Outcome of checking a template against a catalogue.
#[derive(Debug, Default)]
pub struct TemplateCheck {
    pub template_id: String,
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl TemplateCheck {
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Cross-check a template's declared variables against its content.
///
/// Declared ids missing from the catalogue are errors. Declared variables
/// whose token never appears, and tokens with no declared variable, are
/// warnings.
pub fn check_template(template: &Template, catalogue: &Catalogue) -> TemplateCheck {
    let mut result = TemplateCheck::new(&template.id);
    let referenced = extract_variable_names(&template.content);

    let mut declared_names = Vec::new();
    for id in &template.variables {
        match catalogue.get(id) {
            Some(var) => {
                if !referenced.contains(&var.name) {
                    result.add_warning(format!(
                        "Declared variable '{}' is not used in the content",
                        var.name
                    ));
                }
                declared_names.push(var.name.as_str());
            }
            None => result.add_error(format!("Declared variable '{}' is not in the catalogue", id)),
        }
    }

    for name in &referenced {
        if !declared_names.contains(&name.as_str()) {
            result.add_warning(format!(
                "Placeholder '{{{{{}}}}}' has no declared variable",
                name
            ));
        }
    }

    result
}
