use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn file_settings_override_defaults() {
    let mut settings = Settings::default();
    apply_file_settings(
        &mut settings,
        r#"
target = "canvas"
vocabulary = "pointer-mouse"
prefixed_pointer_names = false
"#,
    )
    .expect("apply");

    assert_eq!(settings.target, "canvas");
    assert_eq!(settings.vocabulary, Vocabulary::PointerMouse);
    assert!(!settings.prefixed_pointer_names);
    assert!(!settings.strict_phases);
}

#[test]
fn unknown_vocabulary_in_file_is_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file_settings(&mut settings, r#"vocabulary = "keyboard""#).is_err());
}

#[test]
fn app_prefixed_env_wins_over_faketouch_prefix() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env(&[
            ("FAKETOUCH_VOCABULARY", "mouse"),
            ("APP__VOCABULARY", "500"),
            ("FAKETOUCH_STRICT_PHASES", "yes"),
        ]),
    )
    .expect("apply");

    assert_eq!(settings.vocabulary, Vocabulary::TouchAndMouse);
    assert!(settings.strict_phases);
}

#[test]
fn malformed_env_boolean_is_an_error() {
    let mut settings = Settings::default();
    let err = apply_env(&mut settings, env(&[("FAKETOUCH_PREFIXED_POINTER_NAMES", "maybe")]))
        .expect_err("should fail");
    assert!(err.to_string().contains("maybe"));
}

#[test]
fn missing_settings_file_keeps_defaults() {
    let settings = load_settings_with(Some(Path::new("does-not-exist/faketouch.toml")), env(&[]))
        .expect("load");
    assert_eq!(settings, Settings::default());
}

#[test]
fn environment_overrides_settings_file() {
    let suffix = std::process::id();
    let path = std::env::temp_dir().join(format!("faketouch_settings_{suffix}.toml"));
    fs::write(&path, "target = \"canvas\"\nstrict_phases = true\n").expect("write settings");

    let settings = load_settings_with(Some(&path), env(&[("FAKETOUCH_TARGET", "overlay")]));
    let _ = fs::remove_file(&path);
    let settings = settings.expect("load");

    assert_eq!(settings.target, "overlay");
    assert!(settings.strict_phases);
    assert_eq!(settings.vocabulary, Vocabulary::Touch);
}
