//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// An unset variable without a default is an error naming the config field.
/// Bare `$VAR` is left alone so API paths and tokens containing `$` survive.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar {
            name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.name),
    })
}

struct UnsetVar {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NB_TEST_SIMPLE", "secret");
        }
        let result = expand_env("${NB_TEST_SIMPLE}", "notion.base_url").unwrap();
        assert_eq!(result, "secret");
        unsafe {
            std::env::remove_var("NB_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NB_TEST_UNSET");
        }
        let result = expand_env("${NB_TEST_UNSET:-title}", "blog.name_property").unwrap();
        assert_eq!(result, "title");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NB_TEST_HOST", "notion.internal");
        }
        let result = expand_env("https://${NB_TEST_HOST}/api/v3", "notion.base_url").unwrap();
        assert_eq!(result, "https://notion.internal/api/v3");
        unsafe {
            std::env::remove_var("NB_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NB_TEST_MISSING");
        }
        let err = expand_env("${NB_TEST_MISSING}", "blog.page_id").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("NB_TEST_MISSING"));
        assert!(err.to_string().contains("blog.page_id"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("https://example.com/$path", "notion.base_url").unwrap();
        assert_eq!(result, "https://example.com/$path");
    }
}
