//! Local disk storage backed by the configured root directory.

use std::path::PathBuf;

use url::Url;

use super::{AssetStorage, FilenameCipher};
use crate::config::{AppConfig, StorageConfig};
use crate::error::{AppError, Result};

/// Storage for files kept under a local root and served from a base URL.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    root: PathBuf,
    base_url: Url,
    profile_dir: String,
    verify_exists: bool,
    cipher: FilenameCipher,
}

impl DiskStorage {
    /// Create storage from storage settings and a filename cipher.
    pub fn new(config: &StorageConfig, cipher: FilenameCipher) -> Result<Self> {
        let mut base = config.asset_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            root: config.root.clone(),
            base_url: Url::parse(&base)?,
            profile_dir: config.profile_dir.trim_matches('/').to_string(),
            verify_exists: config.verify_exists,
            cipher,
        })
    }

    /// Create storage from the full application config.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.storage, FilenameCipher::new(&config.security.app_key))
    }

    /// Reverse [`AssetStorage::encrypt_filename`].
    pub fn decrypt_filename(&self, path: &str) -> Result<String> {
        let (dir, name) = split_file_name(path);
        let name = self.cipher.decrypt(name)?;
        Ok(join_file_name(dir, &name))
    }
}

impl AssetStorage for DiskStorage {
    fn profile_photo_path(&self, profile: &str) -> Result<String> {
        let profile = profile.trim_start_matches('/');
        if profile.trim().is_empty() {
            return Err(AppError::invalid_path("Profile reference is empty"));
        }
        check_segments(profile)?;

        let path = format!("{}/{}", self.profile_dir, profile);
        if self.verify_exists && !self.root.join(&path).is_file() {
            return Err(AppError::file_not_found(path));
        }
        Ok(path)
    }

    fn encrypt_filename(&self, path: &str) -> Result<String> {
        let (dir, name) = split_file_name(path);
        if name.is_empty() {
            return Err(AppError::invalid_path(path));
        }
        let name = self.cipher.encrypt(name)?;
        Ok(join_file_name(dir, &name))
    }

    fn asset_url(&self, path: &str) -> Result<String> {
        check_segments(path)?;

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::invalid_path(self.base_url.as_str()))?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url.into())
    }
}

/// Reject backslashes and `.`/`..` segments, including percent-encoded ones.
fn check_segments(path: &str) -> Result<()> {
    if path.contains('\\') {
        return Err(AppError::invalid_path(path));
    }
    for segment in path.split('/') {
        let decoded = urlencoding::decode(segment).map_err(|_| AppError::invalid_path(path))?;
        if matches!(decoded.as_ref(), "." | "..") || decoded.contains('\\') {
            return Err(AppError::invalid_path(path));
        }
    }
    Ok(())
}

/// Split a path into its directory prefix and final segment.
fn split_file_name(path: &str) -> (Option<&str>, &str) {
    match path.rsplit_once('/') {
        Some((dir, name)) => (Some(dir), name),
        None => (None, path),
    }
}

fn join_file_name(dir: Option<&str>, name: &str) -> String {
    match dir {
        Some(dir) => format!("{dir}/{name}"),
        None => name.to_string(),
    }
}
