//! Reader for the cf CLI's own `config.json`.
//!
//! The API gateway reuses whatever session `cf login` / `cf target` left
//! behind; scaleover never authenticates on its own.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// The subset of `$CF_HOME/.cf/config.json` the API gateway needs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CfSession {
    /// Cloud Controller base URL, e.g. `https://api.example.com`.
    #[serde(rename = "Target")]
    pub target: String,
    /// `bearer ...` token header value.
    #[serde(rename = "AccessToken")]
    pub access_token: String,
    #[serde(rename = "SSLDisabled")]
    pub ssl_disabled: bool,
    #[serde(rename = "SpaceFields")]
    pub space: CfSpace,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CfSpace {
    #[serde(rename = "GUID")]
    pub guid: String,
    #[serde(rename = "Name")]
    pub name: String,
}

impl CfSession {
    /// Check that the session is logged in and targeted at a space.
    ///
    /// # Errors
    ///
    /// Returns an error naming the `cf` command that fixes the problem.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.target.is_empty(),
            "No API endpoint set. Use 'cf login' or 'cf api' to target an endpoint."
        );
        anyhow::ensure!(
            !self.access_token.is_empty(),
            "Not logged in. Use 'cf login' to log in."
        );
        anyhow::ensure!(
            !self.space.guid.is_empty(),
            "No space targeted. Use 'cf target -s SPACE' to target a space."
        );
        Ok(())
    }
}

/// Resolve the directory containing `.cf/`.
///
/// Order: explicit override, `CF_HOME`, the user's home directory.
///
/// # Errors
///
/// Returns an error if no candidate can be determined.
pub fn cf_home(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Ok(val) = std::env::var("CF_HOME") {
        return Ok(PathBuf::from(val));
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))
}

/// Load and validate the session stored under `home`.
///
/// # Errors
///
/// Returns an error if the file is missing, unparsable, or the session is
/// not usable.
pub fn load_session(home: &Path) -> Result<CfSession> {
    let path = home.join(".cf").join("config.json");
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("cannot read {}. Use 'cf login' first", path.display()))?;
    let session: CfSession =
        serde_json::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))?;
    session.validate()?;
    Ok(session)
}
