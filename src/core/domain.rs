use serde::{Deserialize, Serialize};

const API_KEY_ENV: &str = "LIBRARY_API_KEY";
const DEFAULT_API_KEY: &str = "dev-secret-key";

// Configuration abstracts config options for the library API
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub api_key: String,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            api_key: std::env::var(API_KEY_ENV).unwrap_or_else(|_| DEFAULT_API_KEY.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!("test", config.branch_id.as_str());
        assert!(!config.api_key.is_empty());
    }
}
