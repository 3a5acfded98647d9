// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Display, Formatter, Result},
          fs::{self},
          path::PathBuf};

use dirs::config_dir;

use super::SettingsErrorCouldNot;
use crate::DEBUG_ANALYTICS_MOD;

pub enum ConfigPaths {
    TopLevelFolderName,
    SettingsFolderName,
}

impl Display for ConfigPaths {
    /// This generates a `to_string()` method used by [`get_settings_folder_path`].
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let path = match self {
            ConfigPaths::TopLevelFolderName => "beacon-analytics",
            ConfigPaths::SettingsFolderName => "settings",
        };
        write!(f, "{path}")
    }
}

/// This is where the settings store keeps its files.
#[must_use]
pub fn get_settings_folder_path(path: PathBuf) -> PathBuf {
    path.join(ConfigPaths::SettingsFolderName.to_string())
}

/// This is where the config folder is.
#[must_use]
pub fn try_get_config_folder_path() -> Option<PathBuf> {
    let home_config_folder_path = config_dir()?;
    let config_file_path =
        home_config_folder_path.join(ConfigPaths::TopLevelFolderName.to_string());
    Some(config_file_path)
}

#[must_use]
pub fn exists() -> bool {
    match try_get_config_folder_path() {
        Some(config_file_path) => config_file_path.exists(),
        None => false,
    }
}

/// Create the config folder if it doesn't exist yet, and return its path.
///
/// # Errors
///
/// Returns an error if the platform has no config folder, or it can't be created.
pub fn create() -> miette::Result<PathBuf> {
    match try_get_config_folder_path() {
        Some(config_folder_path) => {
            let result_create_dir_all = fs::create_dir_all(&config_folder_path);
            match result_create_dir_all {
                Ok(()) => {
                    if DEBUG_ANALYTICS_MOD {
                        // % is Display, ? is Debug.
                        tracing::debug!(
                            message = "Successfully created config folder.",
                            config_folder = ?config_folder_path
                        );
                    }
                    Ok(config_folder_path)
                }
                Err(error) => {
                    // % is Display, ? is Debug.
                    tracing::error!(
                        message = "Could not create config folder.",
                        error = ?error
                    );
                    Err(SettingsErrorCouldNot::CreateStoreFolder {
                        folder_path: config_folder_path.display().to_string(),
                    }
                    .into())
                }
            }
        }
        None => {
            // % is Display, ? is Debug.
            tracing::error!(message = "Could not access config folder.", error = "None");
            Err(SettingsErrorCouldNot::AccessConfigFolder.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_folder_is_nested() {
        let root = PathBuf::from("/tmp/beacon");
        assert_eq!(
            get_settings_folder_path(root),
            PathBuf::from("/tmp/beacon/settings")
        );
    }
}
