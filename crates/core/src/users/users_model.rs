//! User domain models.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::blobs::Cid;
use crate::errors::{Error, Result, ValidationError};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+@.+\..+").expect("email pattern compiles"));

/// Domain model representing a stored user document.
///
/// `goals_cid` is the goals snapshot log: each entry names one complete goal
/// list and only the last entry is current. `transactions_cid` is read from
/// its first entry only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    pub otp: String,
    pub otp_expiry: NaiveDateTime,
    pub is_verified: bool,
    pub banks_count: i32,
    pub banks: Vec<serde_json::Value>,
    #[serde(rename = "goalsCID")]
    pub goals_cid: Vec<Cid>,
    #[serde(rename = "transactionsCID")]
    pub transactions_cid: Vec<Cid>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    /// Head of the goals snapshot log.
    pub fn latest_goals_cid(&self) -> Option<&Cid> {
        self.goals_cid.last()
    }

    pub fn genesis_transactions_cid(&self) -> Option<&Cid> {
        self.transactions_cid.first()
    }

    /// Records `cid` as the new head of the goals log.
    pub fn append_goals_snapshot(&mut self, cid: Cid) {
        self.goals_cid.push(cid);
    }
}

/// Input model for registering a user. The password arrives already hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Trims the username and checks the shape of every field.
    pub fn validate(mut self) -> Result<Self> {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_string();
        if self.username.is_empty() {
            return Err(invalid("Username is required"));
        }
        if self.email.is_empty() {
            return Err(invalid("Email is required"));
        }
        if !EMAIL_PATTERN.is_match(&self.email) {
            return Err(invalid("Please use a valid email address"));
        }
        if self.password_hash.is_empty() {
            return Err(invalid("Password is required"));
        }
        Ok(self)
    }
}

fn invalid(message: &str) -> Error {
    Error::Validation(ValidationError::InvalidInput(message.to_string()))
}

/// User record as exposed to clients: credentials and OTP state removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub username: String,
    pub email: String,
    pub is_verified: bool,
    pub banks_count: i32,
    pub banks: Vec<serde_json::Value>,
    #[serde(rename = "goalsCID")]
    pub goals_cid: Vec<Cid>,
    #[serde(rename = "transactionsCID")]
    pub transactions_cid: Vec<Cid>,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            is_verified: user.is_verified,
            banks_count: user.banks_count,
            banks: user.banks,
            goals_cid: user.goals_cid,
            transactions_cid: user.transactions_cid,
            created_at: user.created_at,
        }
    }
}
