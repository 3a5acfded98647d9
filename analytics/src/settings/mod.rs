// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach files.
pub mod config_folder;
pub mod kv_settings_store;
pub mod settings_store;

// Re-export.
pub use kv_settings_store::*;
pub use settings_store::*;
pub use settings_error::*;

pub mod settings_error {
    #[derive(thiserror::Error, Debug, miette::Diagnostic)]
    pub enum SettingsErrorCouldNot {
        #[error("📑 Could not create settings folder: '{folder_path}' on disk")]
        CreateStoreFolder { folder_path: String },

        #[error("📁 Could not access the platform config folder")]
        AccessConfigFolder,

        #[error("📦 Could not open settings bucket: '{bucket_name}'")]
        OpenBucket { bucket_name: String },

        #[error("🔼 Could not read tracking flag from settings")]
        ReadTrackingFlag,

        #[error("🔽 Could not write tracking flag to settings")]
        WriteTrackingFlag,
    }
}
