//! API key loading.
//!
//! The key is read once per fetch. A key file contributes only its first line,
//! with the line terminator removed and nothing else touched.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::domain::{Credential, CredentialSource};
use crate::error::AppError;

pub fn load_credential(source: &CredentialSource) -> Result<Credential, AppError> {
    match source {
        CredentialSource::File(path) => read_key_file(path),
        CredentialSource::Env(var) => read_key_env(var),
    }
}

fn read_key_file(path: &Path) -> Result<Credential, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::resource_unavailable(format!("Failed to open API key file '{}': {e}", path.display()))
    })?;

    let mut line = String::new();
    let n = BufReader::new(file).read_line(&mut line).map_err(|e| {
        AppError::resource_unavailable(format!("Failed to read API key file '{}': {e}", path.display()))
    })?;
    if n == 0 {
        return Err(AppError::resource_unavailable(format!(
            "API key file '{}' is empty.",
            path.display()
        )));
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }

    tracing::debug!(path = %path.display(), "loaded API key from file");
    Ok(Credential::new(line))
}

fn read_key_env(var: &str) -> Result<Credential, AppError> {
    dotenvy::dotenv().ok();
    let key = std::env::var(var)
        .map_err(|_| AppError::resource_unavailable(format!("Missing {var} in environment (.env).")))?;
    tracing::debug!(var, "loaded API key from environment");
    Ok(Credential::new(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::path::PathBuf;

    fn temp_key_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("eia-series-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn file_uses_first_line_only() {
        let path = temp_key_file("first-line", "abc123\nsecond line\n");
        let key = load_credential(&CredentialSource::File(path.clone())).unwrap();
        assert_eq!(key.expose(), "abc123");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn file_keeps_inner_whitespace_but_drops_crlf() {
        let path = temp_key_file("crlf", " key with spaces \r\nnext");
        let key = load_credential(&CredentialSource::File(path.clone())).unwrap();
        assert_eq!(key.expose(), " key with spaces ");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn file_without_newline_is_used_verbatim() {
        let path = temp_key_file("no-newline", "abc123");
        let key = load_credential(&CredentialSource::File(path.clone())).unwrap();
        assert_eq!(key.expose(), "abc123");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_resource_unavailable() {
        let path = std::env::temp_dir().join("eia-series-definitely-missing-key-file");
        let err = load_credential(&CredentialSource::File(path)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceUnavailable);
    }

    #[test]
    fn empty_file_is_resource_unavailable() {
        let path = temp_key_file("empty", "");
        let err = load_credential(&CredentialSource::File(path.clone())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceUnavailable);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn env_var_is_used_verbatim() {
        let var = "EIA_SERIES_TEST_KEY_ENV_5C21";
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var(var, "env-key-123") };
        let key = load_credential(&CredentialSource::Env(var.into())).unwrap();
        unsafe { std::env::remove_var(var) };
        assert_eq!(key.expose(), "env-key-123");
    }

    #[test]
    fn missing_env_var_is_resource_unavailable() {
        let err = load_credential(&CredentialSource::Env("EIA_SERIES_TEST_UNSET_VAR_7F3A".into())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceUnavailable);
    }
}
