//! Configuration and catalog file loading

use std::fs;
use std::path::PathBuf;

use texassist::{AssistConfig, AssistError, Category, SymbolCatalog};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("texassist-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_config_with_relative_extra_catalog() {
    let dir = scratch_dir("relative");
    fs::write(
        dir.join("chem.json"),
        r#"[{"text": "\\ce{H2O}", "description": "Chemical formula", "category": "latex"}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("texassist.toml"),
        "[catalog]\nextra = [\"chem.json\"]\n\n[suggestions]\nmax_suggestions = 4\n",
    )
    .unwrap();

    let config = AssistConfig::load(dir.join("texassist.toml")).unwrap();
    assert_eq!(config.catalog.extra, vec![dir.join("chem.json")]);

    let catalog = config.build_catalog().unwrap();
    let builtin = SymbolCatalog::builtin();
    assert_eq!(catalog.len(), builtin.len() + 1);
    // extras come after the built-ins
    assert_eq!(catalog.iter().last().unwrap().text, r"\ce{H2O}");

    let matcher = config.build_matcher().unwrap();
    assert_eq!(matcher.suggestions_for(r"\ce")[0].category, Category::Latex);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_missing_catalog_file_is_io_error() {
    let err = SymbolCatalog::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, AssistError::IoError { .. }));
}

#[test]
fn test_catalog_with_empty_template_rejected() {
    let dir = scratch_dir("empty");
    let path = dir.join("bad.json");
    fs::write(&path, r#"[{"text": "", "description": "broken"}]"#).unwrap();
    let err = SymbolCatalog::load(&path).unwrap_err();
    assert!(err.to_string().contains("broken"));
    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_malformed_catalog_json() {
    let err = SymbolCatalog::from_json_str(r#"[{"text": 3}]"#).unwrap_err();
    assert!(matches!(err, AssistError::InvalidCatalog { .. }));
}
