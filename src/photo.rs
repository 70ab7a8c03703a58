//! Replacing a user's picture with a freshly picked photo.
//!
//! The picker is whatever the platform offers; it is reached through
//! `PhotoPicker`. The picked file is copied into a cache directory, read back,
//! and written onto the user record. Every way this can stop short is a
//! `PhotoUpdateOutcome` variant, and none of them touch the stored picture.
//! Only store failures are returned as errors.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::User;
use crate::store::{StoreError, UserStore};

pub const PICKER_TITLE: &str = "Please pick a photo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedPhoto {
    pub file_name: String,
    pub full_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum PickError {
    #[error("photo access permission was not granted")]
    PermissionDenied,
    #[error("photo picking is not supported on this device")]
    Unsupported,
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub trait PhotoPicker {
    /// `Ok(None)` means the user closed the picker without choosing.
    fn pick_photo(&self, title: &str) -> Result<Option<PickedPhoto>, PickError>;
}

/// Picker over a path chosen up front, e.g. on the command line.
pub struct FilePicker {
    path: Option<PathBuf>,
}

impl FilePicker {
    pub fn new(path: Option<PathBuf>) -> FilePicker {
        FilePicker { path }
    }
}

impl PhotoPicker for FilePicker {
    fn pick_photo(&self, _title: &str) -> Result<Option<PickedPhoto>, PickError> {
        let path = match self.path {
            Some(ref path) => path,
            None => return Ok(None),
        };
        let file_name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => return Ok(None),
        };
        Ok(Some(PickedPhoto {
            file_name,
            full_path: path.clone(),
        }))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PhotoUpdateOutcome {
    Updated { bytes: usize },
    PermissionDenied,
    Unsupported,
    NoSelection,
    UserNotFound,
    IoError(String),
}

impl PhotoUpdateOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, PhotoUpdateOutcome::Updated { .. })
    }
}

/// Copies the photo into `cache_dir` and returns the cached copy's contents.
/// A photo picked from the cache itself is read in place.
pub fn cache_photo(photo: &PickedPhoto, cache_dir: &Path) -> io::Result<Vec<u8>> {
    fs::create_dir_all(cache_dir)?;
    let source = fs::canonicalize(&photo.full_path)?;
    let cached = cache_dir.join(&photo.file_name);
    // Copying a file onto itself truncates it before reading.
    let already_cached = match fs::canonicalize(&cached) {
        Ok(existing) => existing == source,
        Err(_) => false,
    };
    if !already_cached {
        fs::copy(&source, &cached)?;
    }
    let bytes = fs::read(&cached)?;
    if bytes.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} is empty", cached.display()),
        ));
    }
    Ok(bytes)
}

/// Overwrites the user's picture. `None` when the user does not exist or
/// vanished before the write landed.
pub fn store_picture<U>(
    users: &U,
    user_id: i32,
    picture: Vec<u8>,
) -> Result<Option<User>, StoreError>
where
    U: UserStore + ?Sized,
{
    let mut user = match users.get_user(user_id)? {
        Some(user) => user,
        None => return Ok(None),
    };
    user.picture = Some(picture);
    if users.update_user(&user)? == 0 {
        return Ok(None);
    }
    Ok(Some(user))
}

pub fn replace_user_picture<P, U>(
    picker: &P,
    cache_dir: &Path,
    users: &U,
    user_id: i32,
) -> Result<PhotoUpdateOutcome, StoreError>
where
    P: PhotoPicker + ?Sized,
    U: UserStore + ?Sized,
{
    let photo = match picker.pick_photo(PICKER_TITLE) {
        Ok(Some(photo)) => photo,
        Ok(None) => {
            warn!("no image has been selected");
            return Ok(PhotoUpdateOutcome::NoSelection);
        }
        Err(PickError::PermissionDenied) => {
            warn!("photo permission not granted");
            return Ok(PhotoUpdateOutcome::PermissionDenied);
        }
        Err(PickError::Unsupported) => {
            warn!("photo picking is not supported");
            return Ok(PhotoUpdateOutcome::Unsupported);
        }
        Err(PickError::Io(err)) => {
            warn!("photo picker failed: {}", err);
            return Ok(PhotoUpdateOutcome::IoError(err.to_string()));
        }
    };

    let picture = match cache_photo(&photo, cache_dir) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("could not cache {}: {}", photo.full_path.display(), err);
            return Ok(PhotoUpdateOutcome::IoError(err.to_string()));
        }
    };

    let bytes = picture.len();
    if store_picture(users, user_id, picture)?.is_none() {
        warn!("user {} does not exist, picture not saved", user_id);
        return Ok(PhotoUpdateOutcome::UserNotFound);
    }
    info!("updated picture of user {} ({} bytes)", user_id, bytes);

    Ok(PhotoUpdateOutcome::Updated { bytes })
}
