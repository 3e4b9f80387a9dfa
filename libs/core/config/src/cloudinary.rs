use std::fmt;
use std::str::FromStr;

use crate::{env_or_default, env_parse_or, ConfigError, FromEnv};

/// Digest used for signed upload and destroy requests.
///
/// Accounts sign with SHA-1 unless switched to SHA-256 in the console.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl FromStr for SignatureAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            other => Err(format!("unknown signature algorithm '{}' (expected sha1 or sha256)", other)),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha1 => f.write_str("sha1"),
            Self::Sha256 => f.write_str("sha256"),
        }
    }
}

/// Credentials and upload defaults for the Cloudinary image host.
#[derive(Clone, Debug)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder every asset is uploaded into; also the public id prefix.
    pub folder: String,
    /// Base of the REST API, overridable for tests.
    pub api_base: String,
    pub signature_algorithm: SignatureAlgorithm,
}

impl CloudinaryConfig {
    pub fn new(cloud_name: &str, api_key: &str, api_secret: &str) -> Self {
        Self {
            cloud_name: cloud_name.to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            folder: "nongsan-images".to_string(),
            api_base: "https://api.cloudinary.com/v1_1".to_string(),
            signature_algorithm: SignatureAlgorithm::default(),
        }
    }

    /// Whether all three credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.cloud_name.is_empty() && !self.api_key.is_empty() && !self.api_secret.is_empty()
    }

    /// `{api_base}/{cloud_name}/image/{action}`
    pub fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{}",
            self.api_base.trim_end_matches('/'),
            self.cloud_name,
            action
        )
    }
}

impl FromEnv for CloudinaryConfig {
    /// Missing credentials are not an error here; the image store reports them
    /// per request so the API can still serve reads.
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(
            &env_or_default("CLOUDINARY_CLOUD_NAME", ""),
            &env_or_default("CLOUDINARY_API_KEY", ""),
            &env_or_default("CLOUDINARY_API_SECRET", ""),
        );
        config.folder = env_or_default("CLOUDINARY_FOLDER", &config.folder);
        config.api_base = env_or_default("CLOUDINARY_API_BASE", &config.api_base);
        config.signature_algorithm =
            env_parse_or("CLOUDINARY_SIGNATURE_ALGORITHM", SignatureAlgorithm::default())?;
        Ok(config)
    }
}
