//! Configuration module
//!
//! Loads the GitHub target (owner, repo, token, branch) and the store
//! guardrails from the environment. Core logic never reads the environment
//! itself; the store receives a constructed config at build time.

use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_BRANCH, DEFAULT_MAX_MEDIA_SIZE_MB, DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Coordinates of the repository submissions are committed into.
#[derive(Clone, Debug)]
pub struct GitHubConfig {
    pub owner: String,
    pub repo: String,
    pub token: String,
    pub branch: String,
}

impl GitHubConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.owner.is_empty() {
            return Err(anyhow::anyhow!("GITHUB_OWNER must not be empty"));
        }
        if self.repo.is_empty() {
            return Err(anyhow::anyhow!("GITHUB_REPO must not be empty"));
        }
        if self.token.is_empty() {
            return Err(anyhow::anyhow!("GITHUB_TOKEN must not be empty"));
        }
        if self.branch.is_empty() {
            return Err(anyhow::anyhow!("GITHUB_BRANCH must not be empty"));
        }
        Ok(())
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub github: GitHubConfig,
    pub api_url: String,
    pub max_media_bytes: usize,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let github = GitHubConfig {
            owner: env::var("GITHUB_OWNER")
                .map_err(|_| anyhow::anyhow!("GITHUB_OWNER must be set"))?,
            repo: env::var("GITHUB_REPO").map_err(|_| anyhow::anyhow!("GITHUB_REPO must be set"))?,
            token: env::var("GITHUB_TOKEN")
                .map_err(|_| anyhow::anyhow!("GITHUB_TOKEN must be set"))?,
            branch: env::var("GITHUB_BRANCH").unwrap_or_else(|_| DEFAULT_BRANCH.to_string()),
        };

        let max_media_size_mb = env::var("MAX_MEDIA_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_MEDIA_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_MEDIA_SIZE_MB);

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let config = AppConfig {
            github,
            api_url: env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            max_media_bytes: max_media_size_mb * 1024 * 1024,
            request_timeout: Duration::from_secs(request_timeout_secs),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.github.validate()?;
        if self.api_url.is_empty() {
            return Err(anyhow::anyhow!("GITHUB_API_URL must not be empty"));
        }
        if self.max_media_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_MEDIA_SIZE_MB must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github_config() -> GitHubConfig {
        GitHubConfig {
            owner: "owner".to_string(),
            repo: "repo".to_string(),
            token: "ghp_test".to_string(),
            branch: "main".to_string(),
        }
    }

    #[test]
    fn github_config_valid() {
        assert!(github_config().validate().is_ok());
    }

    #[test]
    fn github_config_rejects_missing_fields() {
        for field in ["owner", "repo", "token", "branch"] {
            let mut cfg = github_config();
            match field {
                "owner" => cfg.owner.clear(),
                "repo" => cfg.repo.clear(),
                "token" => cfg.token.clear(),
                _ => cfg.branch.clear(),
            }
            let err = cfg.validate().unwrap_err().to_string();
            assert!(err.to_lowercase().contains(field), "expected {field} in: {err}");
        }
    }

    #[test]
    fn app_config_rejects_zero_size_cap() {
        let cfg = AppConfig {
            github: github_config(),
            api_url: DEFAULT_API_URL.to_string(),
            max_media_bytes: 0,
            request_timeout: Duration::from_secs(30),
        };
        assert!(cfg.validate().is_err());
    }

    // Env manipulation is process-global, so all from_env cases run in one test.
    #[test]
    fn app_config_from_env() {
        let vars = ["GITHUB_OWNER", "GITHUB_REPO", "GITHUB_TOKEN", "GITHUB_BRANCH"];
        for var in vars {
            env::remove_var(var);
        }
        env::remove_var("GITHUB_API_URL");
        env::remove_var("MAX_MEDIA_SIZE_MB");
        env::remove_var("REQUEST_TIMEOUT_SECS");

        assert!(AppConfig::from_env().is_err(), "missing owner must fail fast");

        env::set_var("GITHUB_OWNER", "owner");
        env::set_var("GITHUB_REPO", "repo");
        assert!(AppConfig::from_env().is_err(), "missing token must fail fast");

        env::set_var("GITHUB_TOKEN", "ghp_test");
        let cfg = AppConfig::from_env().expect("complete config loads");
        assert_eq!(cfg.github.branch, DEFAULT_BRANCH);
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.max_media_bytes, DEFAULT_MAX_MEDIA_SIZE_MB * 1024 * 1024);
        assert_eq!(
            cfg.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );

        env::set_var("GITHUB_BRANCH", "archive");
        env::set_var("MAX_MEDIA_SIZE_MB", "2");
        env::set_var("REQUEST_TIMEOUT_SECS", "5");
        let cfg = AppConfig::from_env().expect("overridden config loads");
        assert_eq!(cfg.github.branch, "archive");
        assert_eq!(cfg.max_media_bytes, 2 * 1024 * 1024);
        assert_eq!(cfg.request_timeout, Duration::from_secs(5));

        for var in vars {
            env::remove_var(var);
        }
        env::remove_var("MAX_MEDIA_SIZE_MB");
        env::remove_var("REQUEST_TIMEOUT_SECS");
    }
}
