//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Strings without `${` are returned unchanged, so bare `$name` survives.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("RSTDOC_TEST_DOCS", "/srv/docs");
        }
        let result = expand_env("${RSTDOC_TEST_DOCS}/api", "convert.source_dir").unwrap();
        assert_eq!(result, "/srv/docs/api");
        unsafe {
            std::env::remove_var("RSTDOC_TEST_DOCS");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("RSTDOC_TEST_UNSET");
        }
        let result = expand_env("${RSTDOC_TEST_UNSET:-out}", "convert.output_dir").unwrap();
        assert_eq!(result, "out");
    }

    #[test]
    fn test_expand_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("RSTDOC_TEST_MISSING");
        }
        let err = expand_env("${RSTDOC_TEST_MISSING}", "convert.source_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in convert.source_dir: ${RSTDOC_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("docs", "f").unwrap(), "docs");
        assert_eq!(expand_env("price$5", "f").unwrap(), "price$5");
    }
}
