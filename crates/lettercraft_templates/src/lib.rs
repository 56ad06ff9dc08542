//! # lettercraft_templates
//!
//! Template variable substitution for LetterCraft.
//!
//! This crate owns the cover-letter content model and the engine that fills
//! it in:
//!
//! - Variable definitions, templates and the variable catalogue
//! - Rendering `{{name}}` placeholders from a value map
//! - Placeholder discovery for template tooling
//! - Built-in and user-supplied content
//!
//! ## Example
//!
//! ```rust
//! use lettercraft_templates::{render, FieldKind, ValueMap, VariableDefinition};
//!
//! let variables = vec![
//!     VariableDefinition::new("position", FieldKind::Text),
//!     VariableDefinition::new("techStack", FieldKind::Multiselect),
//! ];
//! let mut values = ValueMap::new();
//! values.insert("position".to_string(), "Engineer".to_string());
//! values.insert("techStack".to_string(), "Rust, Go".to_string());
//!
//! let text = render("{{position}}{{techStack}}", &variables, &values);
//! assert_eq!(text, "Engineer, particularly in Rust, Go");
//! ```

pub mod builtin;
pub mod catalogue;
pub mod engine;
pub mod error;
pub mod form;
pub mod library;
pub mod loader;
pub mod model;

pub use builtin::{builtin_catalogue, builtin_library, DEFAULT_TEMPLATE_ID};
pub use catalogue::Catalogue;
pub use engine::{effective_value, extract_variable_names, render, TemplateEngine};
pub use error::{TemplateError, TemplateResult};
pub use library::{check_template, TemplateCheck, TemplateLibrary};
pub use loader::{Content, ContentLoader};
pub use model::{
    FieldKind, SenderDetails, Template, TemplatePatch, ValueMap, VariableDefinition,
    VariablePatch,
};
