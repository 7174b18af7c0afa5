//! ghops - GitHub REST v3 operations as a library and a CLI

pub mod commands;
pub mod config;
pub mod constants;
pub mod github;

pub use ghops_rest::{GitHubError, join_repository_uri, split_repository_uri};

// Re-export commonly used types
pub use commands::{Command, CommandContext};
pub use config::Config;
pub use github::GitHubClient;

/// Load the default config file, falling back to defaults when it is missing
pub fn load_default_config() -> anyhow::Result<Config> {
    Config::load_or_default(constants::config::DEFAULT_CONFIG_FILE)
}
