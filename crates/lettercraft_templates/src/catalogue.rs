//! Variable catalogue.
//!
//! The catalogue is the ordered set of variable definitions known to the
//! system. Ids and token names are both unique within it.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{TemplateError, TemplateResult};
use crate::model::{Template, VariableDefinition, VariablePatch};

/// Ordered collection of variable definitions with unique ids and names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogue {
    variables: Vec<VariableDefinition>,
}

impl Catalogue {
    /// Build a catalogue, rejecting invalid or duplicate definitions.
    pub fn new(variables: Vec<VariableDefinition>) -> TemplateResult<Self> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for var in &variables {
            validate_definition(var)?;
            if !ids.insert(var.id.as_str()) {
                return Err(TemplateError::DuplicateVariableId(var.id.clone()));
            }
            if !names.insert(var.name.as_str()) {
                return Err(TemplateError::DuplicateVariableName(var.name.clone()));
            }
        }
        Ok(Self { variables })
    }

    /// All definitions in catalogue order.
    pub fn variables(&self) -> &[VariableDefinition] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Get a definition by id.
    pub fn get(&self, id: &str) -> Option<&VariableDefinition> {
        self.variables.iter().find(|v| v.id == id)
    }

    /// Get a definition by token name.
    pub fn by_name(&self, name: &str) -> Option<&VariableDefinition> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Add a definition at the end of the catalogue.
    pub fn add(&mut self, variable: VariableDefinition) -> TemplateResult<()> {
        validate_definition(&variable)?;
        if self.get(&variable.id).is_some() {
            return Err(TemplateError::DuplicateVariableId(variable.id));
        }
        if self.by_name(&variable.name).is_some() {
            return Err(TemplateError::DuplicateVariableName(variable.name));
        }
        debug!("Adding variable {}", variable.id);
        self.variables.push(variable);
        Ok(())
    }

    /// Apply a partial update to the definition with the given id.
    pub fn update(&mut self, id: &str, patch: VariablePatch) -> TemplateResult<()> {
        let index = self
            .variables
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| TemplateError::VariableNotFound(id.to_string()))?;

        let mut updated = self.variables[index].clone();
        patch.apply(&mut updated);
        validate_definition(&updated)?;

        let name_taken = self
            .variables
            .iter()
            .enumerate()
            .any(|(i, v)| i != index && v.name == updated.name);
        if name_taken {
            return Err(TemplateError::DuplicateVariableName(updated.name));
        }

        self.variables[index] = updated;
        Ok(())
    }

    /// Remove a definition, returning it if it existed.
    pub fn remove(&mut self, id: &str) -> Option<VariableDefinition> {
        let index = self.variables.iter().position(|v| v.id == id)?;
        Some(self.variables.remove(index))
    }

    /// Insert or replace definitions by id, keeping existing order for
    /// replaced entries and appending new ones.
    pub fn merge(&mut self, others: Vec<VariableDefinition>) -> TemplateResult<()> {
        let mut merged = self.variables.clone();
        for var in others {
            match merged.iter().position(|v| v.id == var.id) {
                Some(index) => merged[index] = var,
                None => merged.push(var),
            }
        }
        *self = Self::new(merged)?;
        Ok(())
    }

    /// Definitions a template declares, in catalogue order.
    pub fn for_template(&self, template: &Template) -> Vec<VariableDefinition> {
        self.variables
            .iter()
            .filter(|v| template.declares(&v.id))
            .cloned()
            .collect()
    }
}

fn validate_definition(var: &VariableDefinition) -> TemplateResult<()> {
    if var.id.trim().is_empty() {
        return Err(TemplateError::InvalidVariable {
            variable: var.name.clone(),
            message: "id cannot be empty".to_string(),
        });
    }
    if var.name.is_empty() {
        return Err(TemplateError::InvalidVariable {
            variable: var.id.clone(),
            message: "name cannot be empty".to_string(),
        });
    }
    if var.name.contains(['{', '}']) {
        return Err(TemplateError::InvalidVariable {
            variable: var.id.clone(),
            message: "name cannot contain braces".to_string(),
        });
    }
    Ok(())
}
