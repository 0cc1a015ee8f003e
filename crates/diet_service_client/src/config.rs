use crate::DietServiceError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, DietServiceError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, DietServiceError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let base_url = get("DIET_SERVICE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        if base_url.trim().is_empty() {
            return Err(DietServiceError::Config(
                "DIET_SERVICE_BASE_URL is empty".into(),
            ));
        }
        Ok(Self { base_url })
    }
}
