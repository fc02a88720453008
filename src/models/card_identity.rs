//! Identity document types attached to an employee record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Kind of government or employer issued identity document.
///
/// Serialized as its lowercase token, which is also the storage value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardIdentity {
    /// Surat Izin Praktik (practice license).
    Sip,
    /// Surat Izin Kerja (work permit).
    Sik,
    /// Nomor Induk Pegawai (employee number).
    Nip,
    /// Surat Tanda Registrasi (registration certificate).
    Str,
    /// BPJS Ketenagakerjaan (employment social insurance).
    BpjsKetenagakerjaan,
}

impl CardIdentity {
    /// All card identity types in declaration order.
    pub const ALL: [CardIdentity; 5] = [
        CardIdentity::Sip,
        CardIdentity::Sik,
        CardIdentity::Nip,
        CardIdentity::Str,
        CardIdentity::BpjsKetenagakerjaan,
    ];

    /// Storage token for this card type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardIdentity::Sip => "sip",
            CardIdentity::Sik => "sik",
            CardIdentity::Nip => "nip",
            CardIdentity::Str => "str",
            CardIdentity::BpjsKetenagakerjaan => "bpjs_ketenagakerjaan",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            CardIdentity::Sip => "SIP",
            CardIdentity::Sik => "SIK",
            CardIdentity::Nip => "NIP",
            CardIdentity::Str => "STR",
            CardIdentity::BpjsKetenagakerjaan => "BPJS Ketenagakerjaan",
        }
    }
}

impl fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardIdentity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|card| card.as_str() == s)
            .ok_or_else(|| AppError::InvalidCardIdentity(s.to_string()))
    }
}

impl TryFrom<&str> for CardIdentity {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
