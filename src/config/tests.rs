use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert!(settings.cycle);
    assert!(settings.scope_matches_to_group);
    assert!(!settings.transient_preview);
    assert_eq!(settings.load_timeout(), Duration::from_secs(2));
}

#[test]
fn test_partial_json_keeps_defaults() -> Result<()> {
    let settings = Settings::from_json_str(r#"{ "cycle": false, "open_in_pane": 1 }"#)?;
    assert!(!settings.cycle);
    assert_eq!(settings.open_in_pane, Some(1));
    assert!(settings.highlight_search_term);
    assert_eq!(settings.find_results_syntaxes.len(), 2);
    Ok(())
}

#[test]
fn test_wrong_type_is_an_error() {
    let err = Settings::from_json_str(r#"{ "cycle": "yes" }"#).unwrap_err();
    assert!(err.to_string().contains("Failed to parse settings"));
}

#[test]
fn test_load_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, r#"{{ "transient_preview": true, "color_scheme": "Mariana.sublime-color-scheme" }}"#)?;

    let settings = Settings::load(file.path())?;
    assert!(settings.transient_preview);
    assert_eq!(
        settings.color_scheme.as_deref(),
        Some("Mariana.sublime-color-scheme")
    );
    Ok(())
}

#[test]
fn test_load_missing_file() {
    let err = Settings::load(Path::new("/no/such/settings.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read settings file"));
}

#[test]
fn test_find_results_syntax_detection() {
    let settings = Settings::default();
    assert!(settings.is_find_results_syntax("Packages/Default/Find Results.hidden-tmLanguage"));
    assert!(!settings.is_find_results_syntax("Packages/Rust/Rust.sublime-syntax"));
}
