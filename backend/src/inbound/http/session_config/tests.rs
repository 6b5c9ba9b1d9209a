//! Unit tests for session configuration parsing.

use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use rstest::rstest;
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temporary key file");
    file.write_all(&vec![b'k'; len]).expect("write key bytes");
    file
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_vars(key: &NamedTempFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (
            KEY_FILE_ENV,
            key.path().to_str().expect("utf-8 temp path").to_owned(),
        ),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

#[rstest]
fn release_accepts_complete_configuration() {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let env = mock_env(release_vars(&key));

    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(#[case] missing: &'static str) {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let mut vars = release_vars(&key);
    vars.remove(missing);

    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .err()
        .expect("missing toggle rejected");

    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case("maybe")]
#[case("")]
fn release_rejects_unparseable_toggle(#[case] value: &str) {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let mut vars = release_vars(&key);
    vars.insert(COOKIE_SECURE_ENV, value.to_owned());

    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .err()
        .expect("invalid toggle rejected");

    assert!(matches!(err, SessionConfigError::InvalidEnv { name: COOKIE_SECURE_ENV, .. }));
}

#[rstest]
fn release_rejects_ephemeral_keys() {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let mut vars = release_vars(&key);
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());

    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .err()
        .expect("ephemeral rejected");

    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_short_keys() {
    let key = key_file(SESSION_KEY_MIN_LEN - 1);
    let env = mock_env(release_vars(&key));

    let err = session_settings_from_env(&env, BuildMode::Release)
        .err()
        .expect("short key rejected");

    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_reports_unreadable_key_file() {
    let mut vars = HashMap::from([
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]);
    vars.insert(KEY_FILE_ENV, "/nonexistent/habits/session_key".to_owned());

    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .err()
        .expect("unreadable key rejected");

    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_defaults_are_secure_and_lax() {
    let vars = HashMap::from([(KEY_FILE_ENV, "/nonexistent/habits/session_key".to_owned())]);

    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug defaults");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("0", false)]
#[case("no", false)]
#[case("TRUE", true)]
#[case("garbage", true)]
fn debug_cookie_secure_parsing(#[case] value: &str, #[case] expected: bool) {
    let vars = HashMap::from([
        (KEY_FILE_ENV, "/nonexistent/habits/session_key".to_owned()),
        (COOKIE_SECURE_ENV, value.to_owned()),
    ]);

    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug settings");

    assert_eq!(settings.cookie_secure, expected);
}
