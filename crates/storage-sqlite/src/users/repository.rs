use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use spendly_core::errors::{Error, Result};
use spendly_core::users::{NewUser, User, UserRepositoryTrait};

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .find(username)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(User::try_from).transpose()?)
    }

    async fn insert(&self, new_user: NewUser) -> Result<User> {
        let now = Utc::now().naive_utc();
        let row = UserDB {
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            otp: String::new(),
            otp_expiry: now,
            is_verified: false,
            banks_count: 0,
            banks: "[]".to_string(),
            goals_cid: "[]".to_string(),
            transactions_cid: "[]".to_string(),
            created_at: now,
            updated_at: now,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let inserted = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn);
                match inserted {
                    Ok(db) => Ok(User::try_from(db)?),
                    Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Err(
                        Error::Duplicate("A user with this username or email already exists".into()),
                    ),
                    Err(e) => Err(StorageError::from(e).into()),
                }
            })
            .await
    }

    async fn save(&self, user: User) -> Result<User> {
        let mut row = UserDB::try_from(&user)?;
        row.updated_at = Utc::now().naive_utc();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let updated = diesel::update(users::table.find(row.username.clone()))
                    .set(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                match updated {
                    Some(db) => Ok(User::try_from(db)?),
                    None => Err(Error::NotFound("User not found".to_string())),
                }
            })
            .await
    }
}
