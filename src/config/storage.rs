//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Locations of the persisted collections
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the collection documents
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Users collection file name
    #[serde(default = "default_users_file")]
    pub users_file: String,

    /// Community posts collection file name
    #[serde(default = "default_posts_file")]
    pub posts_file: String,

    /// Gratitude journal collection file name
    #[serde(default = "default_gratitude_file")]
    pub gratitude_file: String,
}

impl StorageConfig {
    /// Configuration rooted at `data_dir` with default file names
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    pub fn posts_path(&self) -> PathBuf {
        self.data_dir.join(&self.posts_file)
    }

    pub fn gratitude_path(&self) -> PathBuf {
        self.data_dir.join(&self.gratitude_file)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let names = [&self.users_file, &self.posts_file, &self.gratitude_file];
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(ValidationError::InvalidFileNames);
        }
        if names[0] == names[1] || names[0] == names[2] || names[1] == names[2] {
            return Err(ValidationError::InvalidFileNames);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            users_file: default_users_file(),
            posts_file: default_posts_file(),
            gratitude_file: default_gratitude_file(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_users_file() -> String {
    "users.json".to_string()
}

fn default_posts_file() -> String {
    "community_posts.json".to_string()
}

fn default_gratitude_file() -> String {
    "gratitude.json".to_string()
}
