// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`SettingsStore`] persisted on disk with the [kv] crate.
//!
//! 1. The store lives in a folder, by default `<config_dir>/beacon-analytics/settings`
//!    (see [`super::config_folder`]).
//! 2. The flag is kept in a single [`kv::Bucket`] under [`TRACKING_ENABLED_KEY`].
//! 3. Values are serialized to [Json] before they are saved, and deserialized after they
//!    are loaded.
//!
//! The [kv] crate works well even when several processes open the same folder, so a
//! helper process (eg: a settings screen) can flip the flag for the next launch.

use std::{fmt::{Debug, Formatter},
          path::{Path, PathBuf},
          sync::atomic::{AtomicBool, Ordering}};

use kv::{Config, Json, Store};
use miette::{Context, IntoDiagnostic};

use super::{DEFAULT_TRACKING_ENABLED, SettingsErrorCouldNot, SettingsStore, config_folder};

pub const TRACKING_ENABLED_KEY: &str = "beacon.analytics.tracking";
pub const SETTINGS_BUCKET_NAME: &str = "settings";

/// Convenience type alias for the [`kv::Bucket`] type. Keys are plain strings and values
/// are encoded as [Json].
pub type KVBucket<'a, ValueT> = kv::Bucket<'a, String, Json<ValueT>>;

pub struct KvSettingsStore {
    db_folder_path: PathBuf,
    bucket: KVBucket<'static, bool>,
    // Keeps the database open for as long as the bucket is in use.
    _store: Store,
    default: AtomicBool,
}

impl Debug for KvSettingsStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvSettingsStore")
            .field("db_folder_path", &self.db_folder_path)
            .field("default", &self.default.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl KvSettingsStore {
    /// Create the db folder if it doesn't exist. Otherwise load it from the folder on
    /// disk.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database folder cannot be created
    /// - The store cannot be opened due to I/O errors or permission issues
    /// - The database is corrupted or locked by another process
    #[tracing::instrument(skip_all, fields(db_folder_path = %db_folder_path.as_ref().display()))]
    pub fn open(db_folder_path: impl AsRef<Path>) -> miette::Result<Self> {
        let db_folder_path = db_folder_path.as_ref();
        let folder_path_str = db_folder_path.display().to_string();

        let store = Store::new(Config::new(db_folder_path))
            .into_diagnostic()
            .wrap_err(SettingsErrorCouldNot::CreateStoreFolder {
                folder_path: folder_path_str.clone(),
            })?;

        let bucket: KVBucket<'static, bool> = store
            .bucket(Some(SETTINGS_BUCKET_NAME))
            .into_diagnostic()
            .wrap_err(SettingsErrorCouldNot::OpenBucket {
                bucket_name: SETTINGS_BUCKET_NAME.to_string(),
            })?;

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "📑 Load or create settings store",
            db_folder_path = %folder_path_str
        );

        Ok(Self {
            db_folder_path: db_folder_path.to_path_buf(),
            bucket,
            _store: store,
            default: AtomicBool::new(DEFAULT_TRACKING_ENABLED),
        })
    }

    /// Open the store in the platform config folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the config folder is not available, or the store can't be
    /// opened.
    pub fn open_default() -> miette::Result<Self> {
        let config_folder_path = config_folder::create()?;
        Self::open(config_folder::get_settings_folder_path(config_folder_path))
    }
}

impl SettingsStore for KvSettingsStore {
    fn register_default(&self, enabled: bool) {
        self.default.store(enabled, Ordering::Release);
    }

    fn read_tracking_enabled(&self) -> miette::Result<bool> {
        let maybe_value: Option<Json<bool>> = self
            .bucket
            .get(&TRACKING_ENABLED_KEY.to_string())
            .into_diagnostic()
            .wrap_err(SettingsErrorCouldNot::ReadTrackingFlag)?;

        let stored = maybe_value.is_some();
        let it = match maybe_value {
            Some(Json(value)) => value,
            None => self.default.load(Ordering::Acquire),
        };

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "🔼 Load tracking flag from settings",
            stored = stored,
            value = it
        );

        Ok(it)
    }

    fn write_tracking_enabled(&self, enabled: bool) -> miette::Result<()> {
        self.bucket
            .set(&TRACKING_ENABLED_KEY.to_string(), &Json(enabled))
            .into_diagnostic()
            .wrap_err(SettingsErrorCouldNot::WriteTrackingFlag)?;

        self.bucket
            .flush()
            .into_diagnostic()
            .wrap_err(SettingsErrorCouldNot::WriteTrackingFlag)?;

        // % is Display, ? is Debug.
        tracing::debug!(message = "🔽 Save tracking flag to settings", value = enabled);

        Ok(())
    }
}
