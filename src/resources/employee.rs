//! Employee API resource.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::PUBLIC_DISK;
use crate::error::{AppError, Result};
use crate::models::{CardIdentities, Employee};
use crate::storage::AssetStorage;

/// Employee as returned by the API.
///
/// Field order is the response key order. `profile` and `sign` serialize as
/// `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeView {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub hired_at: Option<NaiveDate>,
    pub user_id: Option<i64>,
    pub card_identity: Option<CardIdentities>,
    pub people: Option<Value>,
    pub status: Option<String>,
    /// Servable URL of the profile photo.
    pub profile: Option<String>,
    pub sign: Option<String>,
    pub profession: Option<Value>,
    pub occupation: Option<Value>,
    pub current_attendence: Option<Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl EmployeeView {
    /// Response keys in order.
    pub const FIELDS: [&'static str; 15] = [
        "id",
        "uuid",
        "name",
        "hired_at",
        "user_id",
        "card_identity",
        "people",
        "status",
        "profile",
        "sign",
        "profession",
        "occupation",
        "current_attendence",
        "created_at",
        "updated_at",
    ];

    /// Render an employee record.
    ///
    /// `disk` is the configured default disk. Errors from `storage` are
    /// returned unchanged.
    pub fn from_record<S: AssetStorage + ?Sized>(employee: &Employee, disk: &str, storage: &S) -> Result<Self> {
        let profile = match employee.profile_ref() {
            Some(profile) => Some(profile_url(profile, disk, storage)?),
            None => None,
        };

        Ok(Self {
            id: employee.id,
            uuid: employee.uuid,
            name: employee.name.clone(),
            hired_at: employee.hired_at,
            user_id: employee.user_id,
            card_identity: employee.card_identity.clone(),
            people: employee.people.clone(),
            status: employee.status.clone(),
            profile,
            sign: employee.sign.clone(),
            profession: employee.profession.clone(),
            occupation: employee.occupation.clone(),
            current_attendence: employee.current_attendence.clone(),
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        })
    }

    /// Render a list of employee records, stopping at the first failure.
    pub fn collection<S: AssetStorage + ?Sized>(employees: &[Employee], disk: &str, storage: &S) -> Result<Vec<Self>> {
        employees
            .iter()
            .map(|employee| Self::from_record(employee, disk, storage))
            .collect()
    }

    /// Response body as an ordered JSON object.
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(AppError::Json(<serde_json::Error as serde::ser::Error>::custom(format!(
                "expected object, got {other}"
            )))),
        }
    }
}

/// Build the servable URL for a profile photo.
///
/// File names on the public disk are encrypted so the stored name is not
/// exposed. Other disks already require authenticated access.
fn profile_url<S: AssetStorage + ?Sized>(profile: &str, disk: &str, storage: &S) -> Result<String> {
    let mut path = storage.profile_photo_path(profile)?;
    if disk == PUBLIC_DISK {
        tracing::debug!(disk, "Encrypting profile photo filename");
        path = storage.encrypt_filename(&path)?;
    }
    storage.asset_url(&path)
}
