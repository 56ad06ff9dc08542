//! Integration tests for defaults persistence and query sync.

use lettercraft_store::{parse_query, shareable_url, Defaults, DefaultsStore, TEMPLATE_PARAM};
use lettercraft_templates::form::{apply_details, initial_values};
use lettercraft_templates::{render, Content};
use tempfile::tempdir;

#[test]
fn test_defaults_round_trip() {
    let temp = tempdir().unwrap();
    let store = DefaultsStore::new(temp.path());

    let defaults = Defaults {
        full_name: "A. Lee".to_string(),
        email: "lee@example.com".to_string(),
        phone: "555-0100".to_string(),
    };
    store.save(&defaults).unwrap();

    assert!(store.store_dir().join("defaults.json").exists());
    assert_eq!(DefaultsStore::new(temp.path()).load(), defaults);
}

#[test]
fn test_signature_lifecycle() {
    let temp = tempdir().unwrap();
    let store = DefaultsStore::new(temp.path());

    store.clear_signature().unwrap();
    store.save_signature("data:image/png;base64,AAAA\n").unwrap();
    assert_eq!(
        store.load_signature().as_deref(),
        Some("data:image/png;base64,AAAA")
    );

    store.clear_signature().unwrap();
    assert!(store.load_signature().is_none());
}

#[test]
fn test_shared_link_reopens_same_letter() {
    let temp = tempdir().unwrap();
    let store = DefaultsStore::new(temp.path());
    store
        .save(&Defaults {
            full_name: "A. Lee".to_string(),
            ..Default::default()
        })
        .unwrap();

    let content = Content::builtin().unwrap();
    let template = content.library.get("upwork").unwrap();
    let variables = content.catalogue.for_template(template);
    let details = store.load().to_details();

    let mut typed = initial_values(&variables, &Default::default(), &details);
    typed.insert("position".to_string(), "Rust developer".to_string());
    typed.insert("techStack".to_string(), "Rust, Tokio".to_string());
    let original = render(&template.content, &variables, &typed);

    let url = shareable_url(
        "https://lettercraft.example/",
        &typed,
        Some(template.id.as_str()),
    )
    .unwrap();
    let query = parse_query(&url);
    assert_eq!(query[TEMPLATE_PARAM], "upwork");

    let mut reopened = initial_values(&variables, &query, &details);
    apply_details(&mut reopened, &details);
    assert_eq!(render(&template.content, &variables, &reopened), original);
}
