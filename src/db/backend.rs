//! The two engines the site can run on. SQLite is the default; a
//! `postgresql://` URL selects PostgreSQL.
//!
//! Queries are written once with `$n` placeholders, which both engines
//! accept, and rows come back as owned [`Value`]s so the query modules never
//! touch driver types.

use std::error::Error as StdError;

use bytes::BytesMut;
use postgres::types::{to_sql_checked, IsNull, ToSql as PgToSql, Type};
use postgres::{GenericClient, NoTls};
use r2d2::{Pool, PooledConnection};
use r2d2_postgres::PostgresConnectionManager;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::{ToSqlOutput, ValueRef};

pub type SqlitePool = Pool<SqliteConnectionManager>;
pub type PgPool = Pool<PostgresConnectionManager<NoTls>>;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("postgres: {0}")]
    Postgres(#[from] postgres::Error),

    #[error("connection pool: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("query returned no rows")]
    NoRows,

    #[error("column {index} is not {expected}")]
    Column { index: usize, expected: &'static str },

    #[error("database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    pub fn migrations(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Backend::Sqlite => super::SQLITE_MIGRATIONS,
            Backend::Postgres => super::POSTGRES_MIGRATIONS,
        }
    }
}

// -- Parameters and rows --

/// A bound query parameter.
#[derive(Debug, Clone, Copy)]
pub enum Param<'a> {
    Int(i64),
    Text(&'a str),
    Bool(bool),
}

impl rusqlite::ToSql for Param<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match *self {
            Param::Int(v) => ToSqlOutput::from(v),
            Param::Text(v) => ToSqlOutput::from(v),
            Param::Bool(v) => ToSqlOutput::from(v),
        })
    }
}

impl PgToSql for Param<'_> {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        match self {
            Param::Int(v) => PgToSql::to_sql(v, ty, out),
            Param::Text(v) => PgToSql::to_sql(v, ty, out),
            Param::Bool(v) => PgToSql::to_sql(v, ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        <i64 as PgToSql>::accepts(ty)
            || <&str as PgToSql>::accepts(ty)
            || <bool as PgToSql>::accepts(ty)
    }

    to_sql_checked!();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
    Bool(bool),
}

/// One result row, columns in `SELECT` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row(Vec<Value>);

impl Row {
    pub fn int(&self, index: usize) -> DbResult<i64> {
        match self.0.get(index) {
            Some(Value::Int(v)) => Ok(*v),
            _ => Err(DbError::Column {
                index,
                expected: "an integer",
            }),
        }
    }

    pub fn text(&self, index: usize) -> DbResult<String> {
        match self.0.get(index) {
            Some(Value::Text(v)) => Ok(v.clone()),
            _ => Err(DbError::Column {
                index,
                expected: "text",
            }),
        }
    }

    /// SQLite has no boolean type and stores flags as 0/1.
    pub fn flag(&self, index: usize) -> DbResult<bool> {
        match self.0.get(index) {
            Some(Value::Bool(v)) => Ok(*v),
            Some(Value::Int(v)) => Ok(*v != 0),
            _ => Err(DbError::Column {
                index,
                expected: "a boolean",
            }),
        }
    }
}

// -- Executor --

/// A connection or an open transaction on either engine.
pub trait Executor {
    fn execute(&mut self, sql: &str, params: &[Param<'_>]) -> DbResult<u64>;

    fn query(&mut self, sql: &str, params: &[Param<'_>]) -> DbResult<Vec<Row>>;

    /// Several `;`-separated statements without parameters.
    fn execute_batch(&mut self, sql: &str) -> DbResult<()>;

    fn query_opt(&mut self, sql: &str, params: &[Param<'_>]) -> DbResult<Option<Row>> {
        Ok(self.query(sql, params)?.into_iter().next())
    }

    fn query_one(&mut self, sql: &str, params: &[Param<'_>]) -> DbResult<Row> {
        self.query_opt(sql, params)?.ok_or(DbError::NoRows)
    }
}

fn sqlite_execute(conn: &rusqlite::Connection, sql: &str, params: &[Param<'_>]) -> DbResult<u64> {
    let changed = conn.execute(sql, rusqlite::params_from_iter(params.iter()))?;
    Ok(changed as u64)
}

fn sqlite_query(
    conn: &rusqlite::Connection,
    sql: &str,
    params: &[Param<'_>],
) -> DbResult<Vec<Row>> {
    let mut stmt = conn.prepare(sql)?;
    let columns = stmt.column_count();
    let mut rows = stmt.query(rusqlite::params_from_iter(params.iter()))?;

    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(columns);
        for index in 0..columns {
            values.push(match row.get_ref(index)? {
                ValueRef::Null => Value::Null,
                ValueRef::Integer(v) => Value::Int(v),
                ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
                ValueRef::Real(_) | ValueRef::Blob(_) => {
                    return Err(DbError::Column {
                        index,
                        expected: "an integer or text",
                    })
                }
            });
        }
        out.push(Row(values));
    }
    Ok(out)
}

impl Executor for rusqlite::Connection {
    fn execute(&mut self, sql: &str, params: &[Param<'_>]) -> DbResult<u64> {
        sqlite_execute(self, sql, params)
    }

    fn query(&mut self, sql: &str, params: &[Param<'_>]) -> DbResult<Vec<Row>> {
        sqlite_query(self, sql, params)
    }

    fn execute_batch(&mut self, sql: &str) -> DbResult<()> {
        Ok(rusqlite::Connection::execute_batch(self, sql)?)
    }
}

impl Executor for rusqlite::Transaction<'_> {
    fn execute(&mut self, sql: &str, params: &[Param<'_>]) -> DbResult<u64> {
        sqlite_execute(self, sql, params)
    }

    fn query(&mut self, sql: &str, params: &[Param<'_>]) -> DbResult<Vec<Row>> {
        sqlite_query(self, sql, params)
    }

    fn execute_batch(&mut self, sql: &str) -> DbResult<()> {
        Ok(rusqlite::Connection::execute_batch(self, sql)?)
    }
}

fn pg_params<'a>(params: &'a [Param<'_>]) -> Vec<&'a (dyn PgToSql + Sync)> {
    params.iter().map(|p| p as &(dyn PgToSql + Sync)).collect()
}

fn pg_row(row: &postgres::Row) -> DbResult<Row> {
    let text_types = [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME];

    let mut values = Vec::with_capacity(row.len());
    for (index, column) in row.columns().iter().enumerate() {
        let ty = column.type_();
        let value = if *ty == Type::INT8 {
            row.try_get::<_, Option<i64>>(index)?.map(Value::Int)
        } else if *ty == Type::INT4 {
            row.try_get::<_, Option<i32>>(index)?
                .map(|v| Value::Int(v.into()))
        } else if *ty == Type::BOOL {
            row.try_get::<_, Option<bool>>(index)?.map(Value::Bool)
        } else if text_types.contains(ty) {
            row.try_get::<_, Option<String>>(index)?.map(Value::Text)
        } else {
            return Err(DbError::Column {
                index,
                expected: "an integer, boolean or text",
            });
        };
        values.push(value.unwrap_or(Value::Null));
    }
    Ok(Row(values))
}

fn pg_execute<C: GenericClient>(client: &mut C, sql: &str, params: &[Param<'_>]) -> DbResult<u64> {
    Ok(client.execute(sql, &pg_params(params))?)
}

fn pg_query<C: GenericClient>(
    client: &mut C,
    sql: &str,
    params: &[Param<'_>],
) -> DbResult<Vec<Row>> {
    client.query(sql, &pg_params(params))?.iter().map(pg_row).collect()
}

impl Executor for postgres::Client {
    fn execute(&mut self, sql: &str, params: &[Param<'_>]) -> DbResult<u64> {
        pg_execute(self, sql, params)
    }

    fn query(&mut self, sql: &str, params: &[Param<'_>]) -> DbResult<Vec<Row>> {
        pg_query(self, sql, params)
    }

    fn execute_batch(&mut self, sql: &str) -> DbResult<()> {
        Ok(GenericClient::batch_execute(self, sql)?)
    }
}

impl Executor for postgres::Transaction<'_> {
    fn execute(&mut self, sql: &str, params: &[Param<'_>]) -> DbResult<u64> {
        pg_execute(self, sql, params)
    }

    fn query(&mut self, sql: &str, params: &[Param<'_>]) -> DbResult<Vec<Row>> {
        pg_query(self, sql, params)
    }

    fn execute_batch(&mut self, sql: &str) -> DbResult<()> {
        Ok(GenericClient::batch_execute(self, sql)?)
    }
}

// -- Pool --

/// A connection checked out of a [`DbPool`].
pub enum DbConn {
    Sqlite(PooledConnection<SqliteConnectionManager>),
    Postgres(PooledConnection<PostgresConnectionManager<NoTls>>),
}

impl DbConn {
    pub fn backend(&self) -> Backend {
        match self {
            DbConn::Sqlite(_) => Backend::Sqlite,
            DbConn::Postgres(_) => Backend::Postgres,
        }
    }

    /// Run `f` inside one transaction, committed only when it returns `Ok`.
    pub fn transaction<T, E>(
        &mut self,
        f: impl FnOnce(&mut dyn Executor) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<DbError>,
    {
        match self {
            DbConn::Sqlite(conn) => {
                let mut tx = conn.transaction().map_err(DbError::from)?;
                let value = f(&mut tx)?;
                tx.commit().map_err(DbError::from)?;
                Ok(value)
            }
            DbConn::Postgres(client) => {
                let mut tx = client.transaction().map_err(DbError::from)?;
                let value = f(&mut tx)?;
                tx.commit().map_err(DbError::from)?;
                Ok(value)
            }
        }
    }
}

impl Executor for DbConn {
    fn execute(&mut self, sql: &str, params: &[Param<'_>]) -> DbResult<u64> {
        match self {
            DbConn::Sqlite(conn) => sqlite_execute(conn, sql, params),
            DbConn::Postgres(client) => pg_execute(&mut **client, sql, params),
        }
    }

    fn query(&mut self, sql: &str, params: &[Param<'_>]) -> DbResult<Vec<Row>> {
        match self {
            DbConn::Sqlite(conn) => sqlite_query(conn, sql, params),
            DbConn::Postgres(client) => pg_query(&mut **client, sql, params),
        }
    }

    fn execute_batch(&mut self, sql: &str) -> DbResult<()> {
        match self {
            DbConn::Sqlite(conn) => Ok(conn.execute_batch(sql)?),
            DbConn::Postgres(client) => Ok(client.batch_execute(sql)?),
        }
    }
}

/// Connection pool for whichever engine the config selected.
#[derive(Clone)]
pub enum DbPool {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

impl DbPool {
    pub fn backend(&self) -> Backend {
        match self {
            DbPool::Sqlite(_) => Backend::Sqlite,
            DbPool::Postgres(_) => Backend::Postgres,
        }
    }

    /// Check out a connection, blocking until one is free.
    pub fn get(&self) -> DbResult<DbConn> {
        Ok(match self {
            DbPool::Sqlite(pool) => DbConn::Sqlite(pool.get()?),
            DbPool::Postgres(pool) => DbConn::Postgres(pool.get()?),
        })
    }

    /// Run `f` with a pooled connection on the blocking thread pool.
    ///
    /// The synchronous `postgres` client drives its own runtime and must not
    /// be called from an async worker thread.
    pub async fn interact<T, F>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&mut DbConn) -> DbResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[test]
    fn dollar_placeholders_bind_in_sqlite() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();
        let row = conn
            .query_one(
                "SELECT $1, $2, $3, NULL",
                &[Param::Int(7), Param::Text("seven"), Param::Bool(true)],
            )
            .unwrap();
        assert_eq!(row.int(0).unwrap(), 7);
        assert_eq!(row.text(1).unwrap(), "seven");
        assert!(row.flag(2).unwrap());
        assert!(row.int(3).is_err());
        assert!(row.text(9).is_err());
    }

    #[test]
    fn query_one_without_rows_is_an_error() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();
        let err = conn
            .query_one("SELECT id FROM users WHERE username = $1", &[Param::Text("nobody")])
            .unwrap_err();
        assert!(matches!(err, DbError::NoRows));
    }

    #[test]
    fn failed_transaction_is_rolled_back() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();

        let result: DbResult<()> = conn.transaction(|tx| {
            tx.execute(
                "INSERT INTO coaches (name, title, photo_url) VALUES ($1, $2, $3)",
                &[Param::Text("A"), Param::Text("B"), Param::Text("C")],
            )?;
            Err(DbError::NoRows)
        });
        assert!(result.is_err());

        let count = conn
            .query_one("SELECT COUNT(*) FROM coaches", &[])
            .unwrap()
            .int(0)
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn interact_runs_on_a_pooled_connection() {
        let pool = test_pool();
        let backend = pool.interact(|conn| Ok(conn.backend())).await.unwrap();
        assert_eq!(backend, Backend::Sqlite);
    }
}
