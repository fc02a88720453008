//! File storage collaborators used when rendering resources.

pub mod crypto;
pub mod disk;

pub use crypto::FilenameCipher;
pub use disk::DiskStorage;

use crate::error::Result;

/// Resolves stored files into servable URLs.
pub trait AssetStorage {
    /// Path of a profile photo relative to the disk root.
    fn profile_photo_path(&self, profile: &str) -> Result<String>;

    /// Obscure the file name component of a stored path.
    fn encrypt_filename(&self, path: &str) -> Result<String>;

    /// Fully qualified URL for a stored path.
    fn asset_url(&self, path: &str) -> Result<String>;
}
