use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::error::ConfigError;

static DATA_DIR_NAME: &str = "chipspot";
static CHIPSPOT_DB_NAME: &str = "chipspot_db.sqlite";
static CONFIG_FILE_NAME: &str = "config.json";

// For now this directory structure should be like
// data_dir_path
// |- chipspot
//    |- chipspot_db.sqlite
//    |- config.json

/// The administrator is a configured credential pair, not an account in
/// the identity oracle. A freshly generated config has no administrator
/// until the operator fills this in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub credential: String,
    pub secret: String,
}

impl AdminCredentials {
    /// Plain equality against both configured values. An empty
    /// credential never matches, so a half-filled config cannot grant
    /// administrator to blank logins.
    pub fn matches(&self, credential: &str, secret: &str) -> bool {
        !self.credential.is_empty() && self.credential == credential && self.secret == secret
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChipspotConfig {
    pub(crate) database_path: PathBuf,

    /// `serde(default)` keeps backward compatibility with config.json
    /// files written before an administrator was configured.
    #[serde(default)]
    pub(crate) admin: Option<AdminCredentials>,
}

impl ChipspotConfig {
    /// Creates a new ChipspotConfig pointing at the specified data directory
    fn new(data_dir: PathBuf) -> Self {
        let database_path = data_dir.join(CHIPSPOT_DB_NAME);

        ChipspotConfig {
            database_path,
            admin: None,
        }
    }

    pub fn admin(&self) -> Option<&AdminCredentials> {
        self.admin.as_ref()
    }
}

/// Gets the existing config or initializes a new one if it doesn't exist
pub async fn get_or_init() -> Result<ChipspotConfig, ConfigError> {
    let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;

    let chipspot_dir = data_dir.join(DATA_DIR_NAME);
    let config_path = chipspot_dir.join(CONFIG_FILE_NAME);

    // Create the chipspot directory if it doesn't exist
    fs::create_dir_all(&chipspot_dir).await?;

    // Check if config file exists
    if config_path.exists() {
        // Read and deserialize existing config
        let mut file = fs::File::open(&config_path).await?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;

        let config: ChipspotConfig = serde_json::from_str(&contents)?;
        Ok(config)
    } else {
        // Create new config
        let config = ChipspotConfig::new(chipspot_dir.clone());

        // Serialize and write to file
        let json = serde_json::to_string_pretty(&config)?;
        let mut file = fs::File::create(&config_path).await?;
        file.write_all(json.as_bytes()).await?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_match_is_exact() {
        let admin = AdminCredentials {
            credential: "admin@chipspot.test".to_string(),
            secret: "hunter2".to_string(),
        };

        assert!(admin.matches("admin@chipspot.test", "hunter2"));
        assert!(!admin.matches("admin@chipspot.test", "hunter3"));
        assert!(!admin.matches("someone@chipspot.test", "hunter2"));
    }

    #[test]
    fn test_blank_admin_never_matches() {
        let admin = AdminCredentials {
            credential: String::new(),
            secret: String::new(),
        };

        assert!(!admin.matches("", ""));
    }

    #[test]
    fn test_config_without_admin_field_parses() {
        let json = r#"{ "database_path": "/tmp/chipspot_db.sqlite" }"#;
        let config: ChipspotConfig = serde_json::from_str(json).unwrap();
        assert!(config.admin().is_none());
    }
}
