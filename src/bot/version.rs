//! `!version` support: recent commit history from git

use anyhow::{bail, Result};
use tokio::process::Command;

/// Commits shown by `!version`
pub const LATEST_COMMITS: usize = 1;
/// Commits shown by `!version history`
pub const HISTORY_COMMITS: usize = 5;

/// Run `git log` for the last `count` commits
pub async fn git_log(count: usize) -> Result<String> {
    let output = Command::new("git")
        .arg("log")
        .arg("--use-mailmap")
        .arg(format!("-n{}", count))
        .output()
        .await?;

    if !output.status.success() {
        bail!(
            "git log failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Format commit history for the channel
pub fn format_history(log: &str) -> String {
    format!("Latest commits...\n```{}```", log)
}
