use std::env;
use std::path::PathBuf;

/// Connection and workspace settings. Every field is optional; anything
/// missing falls back to the default AWS credential chain or the current
/// directory.
#[derive(Debug, Clone)]
pub struct ImageGenConfig {
    pub region: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub workspace_dir: Option<PathBuf>,
}

impl Default for ImageGenConfig {
    fn default() -> Self {
        ImageGenConfig {
            region: None,
            access_key: None,
            secret_key: None,
            workspace_dir: None,
        }
    }
}

impl ImageGenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let region = env::var("AWS_REGION")
            .or_else(|_| env::var("AWS_DEFAULT_REGION"))
            .ok();
        let access_key = env::var("AWS_ACCESS_KEY_ID").ok();
        let secret_key = env::var("AWS_SECRET_ACCESS_KEY").ok();
        let workspace_dir = env::var("WORKSPACE_DIR").ok().map(PathBuf::from);

        ImageGenConfig {
            region,
            access_key,
            secret_key,
            workspace_dir,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn with_workspace_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workspace_dir = Some(dir.into());
        self
    }

    /// Directory artifacts are rooted under; the current directory when
    /// unset.
    pub fn workspace(&self) -> PathBuf {
        self.workspace_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chains() {
        let config = ImageGenConfig::new()
            .with_region("us-west-2")
            .with_credentials("key", "secret")
            .with_workspace_dir("/tmp/work");
        assert_eq!(config.region.as_deref(), Some("us-west-2"));
        assert_eq!(config.access_key.as_deref(), Some("key"));
        assert_eq!(config.workspace(), PathBuf::from("/tmp/work"));
    }

    #[test]
    fn workspace_defaults_to_cwd() {
        assert_eq!(ImageGenConfig::default().workspace(), PathBuf::from("."));
    }
}
