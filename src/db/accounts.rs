use crate::db::models::Account;
use crate::error::{AppError, AppResult};
use sqlx::SqlitePool;

pub async fn create_account(
    pool: &SqlitePool,
    username: &str,
    display_name: &str,
    password_hash: &str,
) -> AppResult<Account> {
    let account = Account::new(
        username.to_string(),
        display_name.to_string(),
        password_hash.to_string(),
    );

    sqlx::query(
        "INSERT INTO accounts (id, username, display_name, password_hash, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&account.id)
    .bind(&account.username)
    .bind(&account.display_name)
    .bind(&account.password_hash)
    .bind(&account.created_at)
    .bind(&account.updated_at)
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::BadRequest(format!("Username '{}' is already taken", username))
        }
        _ => AppError::Database(e),
    })?;

    Ok(account)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> AppResult<Account> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound(format!("Account '{}' not found", username)),
            _ => AppError::Database(e),
        })?;

    Ok(account)
}

pub async fn find_by_id(pool: &SqlitePool, account_id: &str) -> AppResult<Account> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = ?")
        .bind(account_id)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                AppError::NotFound(format!("Account with id '{}' not found", account_id))
            }
            _ => AppError::Database(e),
        })?;

    Ok(account)
}
