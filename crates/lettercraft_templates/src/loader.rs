//! Content loading from a user directory.
//!
//! Directory layout:
//! ```text
//! <content-dir>/
//! ├── variables.yaml        # Extra or replacement variable definitions
//! └── templates/
//!     ├── <id>.yaml         # One template per file
//!     └── ...
//! ```
//!
//! User content is layered over the built-in catalogue and templates.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::builtin::{builtin_catalogue, builtin_library};
use crate::catalogue::Catalogue;
use crate::error::{TemplateError, TemplateResult};
use crate::library::TemplateLibrary;
use crate::model::{Template, VariableDefinition};

/// Catalogue and templates available to the application.
#[derive(Debug, Clone)]
pub struct Content {
    pub catalogue: Catalogue,
    pub library: TemplateLibrary,
}

impl Content {
    /// Built-in content only.
    pub fn builtin() -> TemplateResult<Self> {
        Ok(Self {
            catalogue: builtin_catalogue()?,
            library: builtin_library()?,
        })
    }
}

/// Loader for user content directories.
pub struct ContentLoader {
    content_path: PathBuf,
}

impl ContentLoader {
    /// Create a new content loader.
    pub fn new(content_path: impl Into<PathBuf>) -> Self {
        Self {
            content_path: content_path.into(),
        }
    }

    /// Load built-in content and layer the directory's content over it.
    pub fn load(&self) -> TemplateResult<Content> {
        let mut content = Content::builtin()?;

        if !self.content_path.exists() {
            warn!("Content directory does not exist: {:?}", self.content_path);
            return Ok(content);
        }

        if let Some(variables) = self.load_variables()? {
            content.catalogue.merge(variables)?;
        }

        for template in self.load_templates()? {
            content.library.upsert(template);
        }

        Ok(content)
    }

    /// Load `variables.yaml` (or `.yml`), if present.
    pub fn load_variables(&self) -> TemplateResult<Option<Vec<VariableDefinition>>> {
        let path = ["variables.yaml", "variables.yml"]
            .iter()
            .map(|name| self.content_path.join(name))
            .find(|p| p.exists());

        let Some(path) = path else {
            debug!("No variables file in {:?}", self.content_path);
            return Ok(None);
        };

        let raw = fs::read_to_string(&path)?;
        let variables: Vec<VariableDefinition> =
            serde_yaml::from_str(&raw).map_err(|e| TemplateError::InvalidTemplateFile {
                path: path.clone(),
                message: e.to_string(),
            })?;
        info!("Loaded {} variables from {:?}", variables.len(), path);
        Ok(Some(variables))
    }

    /// Load every template file under `templates/`, skipping invalid ones.
    pub fn load_templates(&self) -> TemplateResult<Vec<Template>> {
        let templates_dir = self.content_path.join("templates");
        let mut templates = Vec::new();

        if !templates_dir.exists() {
            debug!("No templates directory in {:?}", self.content_path);
            return Ok(templates);
        }

        for entry in WalkDir::new(&templates_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_yaml(path) {
                continue;
            }
            match self.load_template(path) {
                Ok(template) => {
                    info!("Loaded template: {} ({})", template.name, template.id);
                    templates.push(template);
                }
                Err(e) => {
                    warn!("Failed to load template from {:?}: {}", path, e);
                }
            }
        }

        Ok(templates)
    }

    /// Load a single template file.
    pub fn load_template(&self, path: &Path) -> TemplateResult<Template> {
        debug!("Loading template from {:?}", path);
        let raw = fs::read_to_string(path)?;
        let template: Template =
            serde_yaml::from_str(&raw).map_err(|e| TemplateError::InvalidTemplateFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        if template.id.trim().is_empty() {
            return Err(TemplateError::InvalidTemplateFile {
                path: path.to_path_buf(),
                message: "template id cannot be empty".to_string(),
            });
        }
        Ok(template)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
