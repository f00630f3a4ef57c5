/// Get environment variable with COURSES_ prefix, falling back to unprefixed version
///
/// Checks `COURSES_{key}` first, then `{key}`, so standard names such as
/// `PORT` and `DATABASE_URL` keep working.
///
/// # Examples
///
/// ```rust
/// use courses_api::utils::get_env_with_prefix;
///
/// // Checks COURSES_PORT first, then PORT
/// let port = get_env_with_prefix("PORT");
/// ```
pub fn get_env_with_prefix(key: &str) -> Option<String> {
    std::env::var(format!("COURSES_{}", key))
        .or_else(|_| std::env::var(key))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_with_prefix() {
        unsafe {
            std::env::set_var("COURSES_UTILS_TEST_VAR", "prefixed_value");
            std::env::set_var("UTILS_TEST_VAR", "unprefixed_value");
        }
        assert_eq!(
            get_env_with_prefix("UTILS_TEST_VAR"),
            Some("prefixed_value".to_string())
        );
        unsafe {
            std::env::remove_var("COURSES_UTILS_TEST_VAR");
        }
        assert_eq!(
            get_env_with_prefix("UTILS_TEST_VAR"),
            Some("unprefixed_value".to_string())
        );
        unsafe {
            std::env::remove_var("UTILS_TEST_VAR");
        }

        assert_eq!(get_env_with_prefix("UTILS_NON_EXISTENT_VAR"), None);
    }
}
