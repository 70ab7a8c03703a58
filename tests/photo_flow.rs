use std::fs;
use std::io;
use std::path::PathBuf;

use rstest::rstest;
use tempfile::TempDir;

use encountify::models::User;
use encountify::photo::{
    replace_user_picture, store_picture, FilePicker, PhotoPicker, PhotoUpdateOutcome, PickError,
    PickedPhoto,
};
use encountify::store::{MemoryStore, StoreError, UserStore};

enum FailingPicker {
    Denied,
    Unsupported,
    Broken,
}

impl PhotoPicker for FailingPicker {
    fn pick_photo(&self, _title: &str) -> Result<Option<PickedPhoto>, PickError> {
        match self {
            FailingPicker::Denied => Err(PickError::PermissionDenied),
            FailingPicker::Unsupported => Err(PickError::Unsupported),
            FailingPicker::Broken => Err(PickError::Io(io::Error::new(
                io::ErrorKind::Other,
                "picker crashed",
            ))),
        }
    }
}

/// Finds users but loses them before any write lands.
struct VanishingUsers(MemoryStore);

impl UserStore for VanishingUsers {
    fn get_user(&self, id: i32) -> Result<Option<User>, StoreError> {
        self.0.get_user(id)
    }

    fn update_user(&self, _user: &User) -> Result<u64, StoreError> {
        Ok(0)
    }

    fn insert_user(&self, name: &str, email: &str) -> Result<User, StoreError> {
        self.0.insert_user(name, email)
    }
}

fn store_with_user() -> (MemoryStore, i32) {
    let store = MemoryStore::new();
    let mut user = store.insert_user("Jane Doe", "jane@doe.org").unwrap();
    user.picture = Some(b"old".to_vec());
    store.update_user(&user).unwrap();
    (store, user.id)
}

fn stored_picture(store: &MemoryStore, id: i32) -> Option<Vec<u8>> {
    store.get_user(id).unwrap().unwrap().picture
}

#[test]
fn picked_photo_becomes_the_users_picture() {
    let (store, id) = store_with_user();
    let photos = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    let photo = photos.path().join("cat.jpg");
    fs::write(&photo, b"jpeg bytes").unwrap();

    let picker = FilePicker::new(Some(photo));
    let outcome = replace_user_picture(&picker, cache.path(), &store, id).unwrap();

    assert_eq!(outcome, PhotoUpdateOutcome::Updated { bytes: 10 });
    assert_eq!(stored_picture(&store, id), Some(b"jpeg bytes".to_vec()));
    assert_eq!(fs::read(cache.path().join("cat.jpg")).unwrap(), b"jpeg bytes");
}

#[test]
fn cache_directory_is_created_on_demand() {
    let (store, id) = store_with_user();
    let root = TempDir::new().unwrap();
    let photo = root.path().join("dog.png");
    fs::write(&photo, b"png").unwrap();
    let cache = root.path().join("cache").join("photos");

    let outcome =
        replace_user_picture(&FilePicker::new(Some(photo)), &cache, &store, id).unwrap();

    assert!(outcome.is_updated());
    assert!(cache.join("dog.png").exists());
}

#[rstest]
#[case(FailingPicker::Denied, PhotoUpdateOutcome::PermissionDenied)]
#[case(FailingPicker::Unsupported, PhotoUpdateOutcome::Unsupported)]
#[case(FailingPicker::Broken, PhotoUpdateOutcome::IoError("picker crashed".to_string()))]
fn picker_failures_leave_the_picture_alone(
    #[case] picker: FailingPicker,
    #[case] expected: PhotoUpdateOutcome,
) {
    let (store, id) = store_with_user();
    let cache = TempDir::new().unwrap();

    let outcome = replace_user_picture(&picker, cache.path(), &store, id).unwrap();

    assert_eq!(outcome, expected);
    assert_eq!(stored_picture(&store, id), Some(b"old".to_vec()));
}

#[test]
fn dismissing_the_picker_is_no_selection() {
    let (store, id) = store_with_user();
    let cache = TempDir::new().unwrap();

    let outcome = replace_user_picture(&FilePicker::new(None), cache.path(), &store, id).unwrap();

    assert_eq!(outcome, PhotoUpdateOutcome::NoSelection);
    assert_eq!(stored_picture(&store, id), Some(b"old".to_vec()));
}

#[test]
fn missing_source_file_is_an_io_error() {
    let (store, id) = store_with_user();
    let cache = TempDir::new().unwrap();
    let picker = FilePicker::new(Some(PathBuf::from("/definitely/not/here.jpg")));

    let outcome = replace_user_picture(&picker, cache.path(), &store, id).unwrap();

    assert!(matches!(outcome, PhotoUpdateOutcome::IoError(_)));
    assert_eq!(stored_picture(&store, id), Some(b"old".to_vec()));
}

#[test]
fn unknown_user_is_reported() {
    let store = MemoryStore::new();
    let photos = TempDir::new().unwrap();
    let photo = photos.path().join("cat.jpg");
    fs::write(&photo, b"jpeg").unwrap();
    let cache = TempDir::new().unwrap();

    let outcome =
        replace_user_picture(&FilePicker::new(Some(photo)), cache.path(), &store, 12).unwrap();

    assert_eq!(outcome, PhotoUpdateOutcome::UserNotFound);
}

#[test]
fn photo_picked_from_the_cache_is_read_in_place() {
    let (store, id) = store_with_user();
    let cache = TempDir::new().unwrap();
    let photo = cache.path().join("cat.jpg");
    fs::write(&photo, b"jpeg bytes").unwrap();

    let picker = FilePicker::new(Some(photo.clone()));
    let outcome = replace_user_picture(&picker, cache.path(), &store, id).unwrap();

    assert_eq!(outcome, PhotoUpdateOutcome::Updated { bytes: 10 });
    assert_eq!(stored_picture(&store, id), Some(b"jpeg bytes".to_vec()));
    assert_eq!(fs::read(&photo).unwrap(), b"jpeg bytes");
}

#[test]
fn empty_photo_is_an_io_error() {
    let (store, id) = store_with_user();
    let photos = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    let photo = photos.path().join("blank.jpg");
    fs::write(&photo, b"").unwrap();

    let outcome = replace_user_picture(&FilePicker::new(Some(photo)), cache.path(), &store, id)
        .unwrap();

    assert!(matches!(outcome, PhotoUpdateOutcome::IoError(_)));
    assert_eq!(stored_picture(&store, id), Some(b"old".to_vec()));
}

#[test]
fn user_lost_before_the_write_is_not_updated() {
    let users = VanishingUsers(MemoryStore::new());
    let user = users.insert_user("Jane Doe", "jane@doe.org").unwrap();
    assert_eq!(store_picture(&users, user.id, vec![1, 2, 3]).unwrap(), None);

    let photos = TempDir::new().unwrap();
    let photo = photos.path().join("cat.jpg");
    fs::write(&photo, b"jpeg").unwrap();
    let cache = TempDir::new().unwrap();
    let outcome =
        replace_user_picture(&FilePicker::new(Some(photo)), cache.path(), &users, user.id)
            .unwrap();

    assert_eq!(outcome, PhotoUpdateOutcome::UserNotFound);
}
