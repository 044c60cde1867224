//! Database models for user documents.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use spendly_core::users::User;

/// Row form of a user document. List-valued fields are JSON text.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(primary_key(username))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub otp: String,
    pub otp_expiry: NaiveDateTime,
    pub is_verified: bool,
    pub banks_count: i32,
    pub banks: String,
    pub goals_cid: String,
    pub transactions_cid: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<UserDB> for User {
    type Error = StorageError;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        Ok(Self {
            username: db.username,
            email: db.email,
            password_hash: db.password_hash,
            otp: db.otp,
            otp_expiry: db.otp_expiry,
            is_verified: db.is_verified,
            banks_count: db.banks_count,
            banks: serde_json::from_str(&db.banks)?,
            goals_cid: serde_json::from_str(&db.goals_cid)?,
            transactions_cid: serde_json::from_str(&db.transactions_cid)?,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl TryFrom<&User> for UserDB {
    type Error = StorageError;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        Ok(Self {
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            otp: user.otp.clone(),
            otp_expiry: user.otp_expiry,
            is_verified: user.is_verified,
            banks_count: user.banks_count,
            banks: serde_json::to_string(&user.banks)?,
            goals_cid: serde_json::to_string(&user.goals_cid)?,
            transactions_cid: serde_json::to_string(&user.transactions_cid)?,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}
