//! Build metadata shared by the HTTP client and the CLI.
//! Includes the generated version.rs from the build script.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// GitHub REST API version sent as `X-GitHub-Api-Version`
pub fn github_api_version() -> &'static str {
    GITHUB_API_VERSION
}

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}

/// User agent presented to the GitHub API
pub fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Long version string for `--version`
pub fn long_version() -> String {
    format!(
        "{} ({} built {}, GitHub API {})",
        env!("CARGO_PKG_VERSION"),
        git_hash(),
        build_time(),
        github_api_version()
    )
}
