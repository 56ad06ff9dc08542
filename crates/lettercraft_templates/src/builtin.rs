//! Built-in variable catalogue and templates.

use tracing::debug;

use crate::catalogue::Catalogue;
use crate::error::TemplateResult;
use crate::library::TemplateLibrary;
use crate::model::{Template, VariableDefinition};

const VARIABLES: &str = include_str!("../content/variables.yaml");

const TEMPLATES: [&str; 3] = [
    include_str!("../content/templates/regular.yaml"),
    include_str!("../content/templates/regular-with-resume.yaml"),
    include_str!("../content/templates/upwork.yaml"),
];

/// Id of the template selected when nothing else is chosen.
pub const DEFAULT_TEMPLATE_ID: &str = "regular";

/// The default variable catalogue.
pub fn builtin_catalogue() -> TemplateResult<Catalogue> {
    let variables: Vec<VariableDefinition> = serde_yaml::from_str(VARIABLES)?;
    debug!("Loaded {} built-in variables", variables.len());
    Catalogue::new(variables)
}

/// The default template library with the regular application active.
pub fn builtin_library() -> TemplateResult<TemplateLibrary> {
    let templates = TEMPLATES
        .iter()
        .map(|raw| serde_yaml::from_str::<Template>(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let mut library = TemplateLibrary::new(templates);
    library.set_active(DEFAULT_TEMPLATE_ID)?;
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::check_template;
    use crate::model::FieldKind;

    #[test]
    fn test_builtin_catalogue() {
        let catalogue = builtin_catalogue().unwrap();
        assert_eq!(catalogue.len(), 7);
        let tech = catalogue.get("techStack").unwrap();
        assert_eq!(tech.kind, FieldKind::Multiselect);
        assert!(tech.options.iter().any(|o| o == "Rust"));
        assert!(catalogue.get("fullName").unwrap().required);
        assert!(!catalogue.get("phone").unwrap().required);
    }

    #[test]
    fn test_tech_stack_options_are_unique() {
        let catalogue = builtin_catalogue().unwrap();
        let options = &catalogue.get("techStack").unwrap().options;
        let mut sorted = options.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), options.len());
    }

    #[test]
    fn test_builtin_library() {
        let library = builtin_library().unwrap();
        let ids: Vec<&str> = library.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["regular", "regular-with-resume", "upwork"]);
        assert_eq!(library.active_id(), Some("regular"));
    }

    #[test]
    fn test_builtin_templates_are_consistent() {
        let catalogue = builtin_catalogue().unwrap();
        let library = builtin_library().unwrap();
        for template in library.list() {
            let check = check_template(template, &catalogue);
            assert!(check.valid, "{}: {:?}", template.id, check.errors);
            assert!(check.warnings.is_empty(), "{}: {:?}", template.id, check.warnings);
        }
    }

    #[test]
    fn test_builtin_content_has_no_trailing_newline() {
        let library = builtin_library().unwrap();
        let regular = library.get("regular").unwrap();
        assert!(regular.content.starts_with("Dear Hiring Manager,\n\n"));
        assert!(regular.content.ends_with("{{phone}}"));
    }
}
