//! Employee record as read from the application's data layer.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::CardIdentity;

/// Identity document numbers keyed by card type.
pub type CardIdentities = BTreeMap<CardIdentity, String>;

/// Employee record with its cached nested data.
///
/// Nested sub-records are owned by other modules and carried as opaque JSON.
/// Each accepts its `prop_` prefixed source name when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub hired_at: Option<NaiveDate>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    /// Stored profile photo reference.
    #[serde(default)]
    pub profile: Option<String>,
    /// Stored signature reference.
    #[serde(default)]
    pub sign: Option<String>,
    #[serde(default, alias = "prop_card_identity")]
    pub card_identity: Option<CardIdentities>,
    #[serde(default, alias = "prop_people")]
    pub people: Option<Value>,
    #[serde(default, alias = "prop_profession")]
    pub profession: Option<Value>,
    #[serde(default, alias = "prop_occupation")]
    pub occupation: Option<Value>,
    #[serde(default, alias = "prop_current_attendence")]
    pub current_attendence: Option<Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Employee {
    /// Create a record with only the identifying fields set.
    pub fn new(id: i64, uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            uuid,
            name: name.into(),
            hired_at: None,
            user_id: None,
            status: None,
            profile: None,
            sign: None,
            card_identity: None,
            people: None,
            profession: None,
            occupation: None,
            current_attendence: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Profile photo reference, if one is actually set.
    ///
    /// Blank references count as absent. Others are returned unchanged.
    pub fn profile_ref(&self) -> Option<&str> {
        self.profile.as_deref().filter(|p| !p.trim().is_empty())
    }
}
