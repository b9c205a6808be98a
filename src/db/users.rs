use crate::db::backend::{DbResult, Executor, Param};
use crate::db::models::User;

pub fn count(db: &mut dyn Executor) -> DbResult<i64> {
    db.query_one("SELECT COUNT(*) FROM users", &[])?.int(0)
}

pub fn insert(db: &mut dyn Executor, username: &str, password_hash: &str) -> DbResult<i64> {
    db.query_one(
        "INSERT INTO users (username, password) VALUES ($1, $2) RETURNING id",
        &[Param::Text(username), Param::Text(password_hash)],
    )?
    .int(0)
}

pub fn find_by_username(db: &mut dyn Executor, username: &str) -> DbResult<Option<User>> {
    let row = db.query_opt(
        "SELECT id, username, password FROM users WHERE username = $1",
        &[Param::Text(username)],
    )?;
    row.map(|row| {
        Ok(User {
            id: row.int(0)?,
            username: row.text(1)?,
            password: row.text(2)?,
        })
    })
    .transpose()
}
