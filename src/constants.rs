//! Central constants for ghops

/// Logical type names attached to decoded resources
pub mod type_names {
    pub const USER: &str = "GitHub.User";
    pub const USER_CONTEXTUAL_INFORMATION: &str = "GitHub.UserContextualInformation";
    pub const REFERENCE: &str = "GitHub.Reference";
    pub const BRANCH: &str = "GitHub.Branch";
    pub const TAG: &str = "GitHub.Tag";
    pub const PULL_REQUEST: &str = "GitHub.PullRequest";
    pub const COMMIT: &str = "GitHub.Commit";
    pub const PULL_REQUEST_REVIEW: &str = "GitHub.PullRequestReview";
    pub const PULL_REQUEST_REVIEW_REQUEST: &str = "GitHub.PullRequestReviewRequest";
    pub const TEAM: &str = "GitHub.Team";
    pub const META: &str = "GitHub.Meta";
    pub const RATE_LIMIT: &str = "GitHub.RateLimit";
}

/// Git reference namespaces
pub mod refs {
    pub const REFS_PREFIX: &str = "refs/";
    pub const HEADS_PREFIX: &str = "refs/heads/";
    pub const TAGS_PREFIX: &str = "refs/tags/";
    pub const HEADS: &str = "heads/";
    pub const TAGS: &str = "tags/";
}

/// Default values for configuration
pub mod config {
    /// Default configuration file name
    pub const DEFAULT_CONFIG_FILE: &str = "ghops.yaml";

    pub const DEFAULT_API_HOST_NAME: &str = "github.com";

    pub const DEFAULT_WEB_REQUEST_TIMEOUT_SEC: u64 = 30;

    pub const DEFAULT_MAXIMUM_RETRIES_WHEN_RESULT_NOT_READY: u32 = 30;

    pub const DEFAULT_RETRY_DELAY_SECONDS: u64 = 30;

    /// Environment variable that overrides the configured access token
    pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";
}

/// Target for operation telemetry events
pub const TELEMETRY_TARGET: &str = "ghops::telemetry";
