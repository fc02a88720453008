//! Unit tests for employee resource rendering.

use std::cell::RefCell;

use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use super::EmployeeView;
use crate::config::StorageConfig;
use crate::error::{AppError, Result};
use crate::models::{CardIdentity, Employee};
use crate::storage::{AssetStorage, DiskStorage, FilenameCipher};

/// Deterministic storage that records every call.
#[derive(Default)]
struct RecordingStorage {
    calls: RefCell<Vec<String>>,
    fail_encrypt: bool,
}

impl AssetStorage for RecordingStorage {
    fn profile_photo_path(&self, profile: &str) -> Result<String> {
        self.calls.borrow_mut().push(format!("path:{profile}"));
        Ok(format!("EMPLOYEE/PROFILE/{profile}"))
    }

    fn encrypt_filename(&self, path: &str) -> Result<String> {
        self.calls.borrow_mut().push(format!("encrypt:{path}"));
        if self.fail_encrypt {
            return Err(AppError::encryption("key unavailable"));
        }
        Ok(format!("enc({path})"))
    }

    fn asset_url(&self, path: &str) -> Result<String> {
        self.calls.borrow_mut().push(format!("url:{path}"));
        Ok(format!("https://app.test/storage/{path}"))
    }
}

fn employee() -> Employee {
    let mut employee = Employee::new(
        12,
        Uuid::parse_str("6f1c1c1e-8a53-4c1f-9a55-0c4b1f3d2e10").unwrap(),
        "Budi Santoso",
    );
    employee.hired_at = NaiveDate::from_ymd_opt(2020, 6, 1);
    employee.user_id = Some(99);
    employee.status = Some("active".to_string());
    employee.card_identity = Some([(CardIdentity::Nip, "19870101".to_string())].into());
    employee.people = Some(json!({"id": 5, "name": "Budi Santoso"}));
    employee.profession = Some(json!({"id": 2, "name": "Pharmacist"}));
    employee.created_at = Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
    employee
}

#[test]
fn test_absent_profile_skips_storage() {
    let storage = RecordingStorage::default();
    let view = EmployeeView::from_record(&employee(), "public", &storage).unwrap();

    assert_eq!(view.profile, None);
    assert!(storage.calls.borrow().is_empty());
}

#[test]
fn test_blank_profile_skips_storage() {
    let storage = RecordingStorage::default();
    let mut record = employee();
    record.profile = Some(String::new());

    let view = EmployeeView::from_record(&record, "public", &storage).unwrap();
    assert_eq!(view.profile, None);
    assert!(storage.calls.borrow().is_empty());
}

#[test]
fn test_public_disk_encrypts_filename() {
    let storage = RecordingStorage::default();
    let mut record = employee();
    record.profile = Some("photo1.jpg".to_string());

    let view = EmployeeView::from_record(&record, "public", &storage).unwrap();

    assert_eq!(
        view.profile.as_deref(),
        Some("https://app.test/storage/enc(EMPLOYEE/PROFILE/photo1.jpg)")
    );
    assert_eq!(
        *storage.calls.borrow(),
        [
            "path:photo1.jpg",
            "encrypt:EMPLOYEE/PROFILE/photo1.jpg",
            "url:enc(EMPLOYEE/PROFILE/photo1.jpg)",
        ]
    );
}

#[test]
fn test_private_disk_skips_encryption() {
    let storage = RecordingStorage::default();
    let mut record = employee();
    record.profile = Some("photo1.jpg".to_string());

    let view = EmployeeView::from_record(&record, "s3", &storage).unwrap();

    assert_eq!(
        view.profile.as_deref(),
        Some("https://app.test/storage/EMPLOYEE/PROFILE/photo1.jpg")
    );
    assert_eq!(
        *storage.calls.borrow(),
        ["path:photo1.jpg", "url:EMPLOYEE/PROFILE/photo1.jpg"]
    );
}

#[test]
fn test_storage_error_propagates() {
    let storage = RecordingStorage {
        fail_encrypt: true,
        ..RecordingStorage::default()
    };
    let mut record = employee();
    record.profile = Some("photo1.jpg".to_string());

    let result = EmployeeView::from_record(&record, "public", &storage);
    assert!(matches!(result, Err(AppError::Encryption(msg)) if msg == "key unavailable"));
    assert_eq!(storage.calls.borrow().len(), 2);
}

#[test]
fn test_sign_pass_through() {
    let storage = RecordingStorage::default();
    let mut record = employee();

    let view = EmployeeView::from_record(&record, "public", &storage).unwrap();
    assert_eq!(view.to_map().unwrap()["sign"], Value::Null);

    record.sign = Some("abc".to_string());
    let view = EmployeeView::from_record(&record, "public", &storage).unwrap();
    assert_eq!(view.to_map().unwrap()["sign"], "abc");
}

#[test]
fn test_output_keys_and_order() {
    let storage = RecordingStorage::default();
    let minimal = Employee::new(1, Uuid::nil(), "A");

    for record in [employee(), minimal] {
        let map = EmployeeView::from_record(&record, "public", &storage).unwrap().to_map().unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, EmployeeView::FIELDS);
    }
}

#[test]
fn test_json_body() {
    let storage = RecordingStorage::default();
    let view = EmployeeView::from_record(&employee(), "s3", &storage).unwrap();

    assert_eq!(
        serde_json::to_value(&view).unwrap(),
        json!({
            "id": 12,
            "uuid": "6f1c1c1e-8a53-4c1f-9a55-0c4b1f3d2e10",
            "name": "Budi Santoso",
            "hired_at": "2020-06-01",
            "user_id": 99,
            "card_identity": {"nip": "19870101"},
            "people": {"id": 5, "name": "Budi Santoso"},
            "status": "active",
            "profile": null,
            "sign": null,
            "profession": {"id": 2, "name": "Pharmacist"},
            "occupation": null,
            "current_attendence": null,
            "created_at": "2024-01-02T03:04:05Z",
            "updated_at": null
        })
    );
}

#[test]
fn test_collection_stops_at_first_error() {
    let storage = RecordingStorage {
        fail_encrypt: true,
        ..RecordingStorage::default()
    };

    let views = EmployeeView::collection(&[employee(), employee()], "public", &storage).unwrap();
    assert_eq!(views.len(), 2);

    let mut failing = employee();
    failing.profile = Some("photo1.jpg".to_string());
    let mut next = employee();
    next.profile = Some("photo2.jpg".to_string());

    let result = EmployeeView::collection(&[failing, next], "public", &storage);
    assert!(matches!(result, Err(AppError::Encryption(_))));
    assert_eq!(
        *storage.calls.borrow(),
        ["path:photo1.jpg", "encrypt:EMPLOYEE/PROFILE/photo1.jpg"]
    );
}

#[test]
fn test_profile_reference_passed_unchanged() {
    let storage = RecordingStorage::default();
    let mut record = employee();
    record.profile = Some(" photo 1.jpg".to_string());

    EmployeeView::from_record(&record, "s3", &storage).unwrap();
    assert_eq!(storage.calls.borrow()[0], "path: photo 1.jpg");
}

#[test]
fn test_disk_storage_keeps_url_inside_profile_dir() {
    let storage = DiskStorage::new(&StorageConfig::default(), FilenameCipher::new("app-key")).unwrap();

    for profile in ["%2e%2e/%2e%2e/secret.txt", "..\\..\\secret.txt"] {
        let mut record = employee();
        record.profile = Some(profile.to_string());
        let result = EmployeeView::from_record(&record, "s3", &storage);
        assert!(matches!(result, Err(AppError::InvalidPath(_))), "{profile:?} should be rejected");
    }

    let mut record = employee();
    record.profile = Some("a?x=1.jpg".to_string());
    let view = EmployeeView::from_record(&record, "s3", &storage).unwrap();
    assert_eq!(
        view.profile.as_deref(),
        Some("http://localhost/storage/EMPLOYEE/PROFILE/a%3Fx=1.jpg")
    );
}

#[test]
fn test_disk_storage_public_url_decrypts() {
    let storage = DiskStorage::new(
        &StorageConfig {
            asset_url: "https://app.test/storage/".to_string(),
            ..StorageConfig::default()
        },
        FilenameCipher::new("app-key"),
    )
    .unwrap();
    let mut record = employee();
    record.profile = Some("photo1.jpg".to_string());

    let url = EmployeeView::from_record(&record, "public", &storage)
        .unwrap()
        .profile
        .unwrap();
    let path = url.strip_prefix("https://app.test/storage/").unwrap();

    assert!(path.starts_with("EMPLOYEE/PROFILE/"));
    assert_eq!(storage.decrypt_filename(path).unwrap(), "EMPLOYEE/PROFILE/photo1.jpg");

    let url = EmployeeView::from_record(&record, "local", &storage)
        .unwrap()
        .profile
        .unwrap();
    assert_eq!(url, "https://app.test/storage/EMPLOYEE/PROFILE/photo1.jpg");
}
