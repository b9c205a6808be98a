//! Queries for the three content tables. Every function runs a single
//! statement against the executor it is given, so callers decide whether
//! it is part of a larger transaction.

use crate::db::backend::{DbResult, Executor, Param, Row};
use crate::db::models::{Coach, NewCoach, NewPrice, NewWorkout, Price, Workout};

fn inserted_id(db: &mut dyn Executor, sql: &str, params: &[Param<'_>]) -> DbResult<i64> {
    db.query_one(sql, params)?.int(0)
}

// -- Workouts --

fn workout_from_row(row: &Row) -> DbResult<Workout> {
    Ok(Workout {
        id: row.int(0)?,
        day: row.text(1)?,
        day_order: row.int(2)?,
        time: row.text(3)?,
        class_name: row.text(4)?,
        coach: row.text(5)?,
    })
}

/// All workouts in calendar order, then by start time.
pub fn list_workouts(db: &mut dyn Executor) -> DbResult<Vec<Workout>> {
    db.query(
        "SELECT id, day, day_order, time, class_name, coach FROM workouts
         ORDER BY day_order, time, id",
        &[],
    )?
    .iter()
    .map(workout_from_row)
    .collect()
}

pub fn insert_workout(db: &mut dyn Executor, workout: &NewWorkout) -> DbResult<i64> {
    inserted_id(
        db,
        "INSERT INTO workouts (day, day_order, time, class_name, coach)
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
        &[
            Param::Text(workout.day.label),
            Param::Int(workout.day.order),
            Param::Text(&workout.time),
            Param::Text(&workout.class_name),
            Param::Text(&workout.coach),
        ],
    )
}

/// Returns `false` when no workout has that id.
pub fn delete_workout(db: &mut dyn Executor, id: i64) -> DbResult<bool> {
    let rows = db.execute("DELETE FROM workouts WHERE id = $1", &[Param::Int(id)])?;
    Ok(rows > 0)
}

// -- Prices --

pub fn list_prices(db: &mut dyn Executor) -> DbResult<Vec<Price>> {
    db.query(
        "SELECT id, title, cost, frequency, features, is_featured FROM prices ORDER BY id",
        &[],
    )?
    .iter()
    .map(|row| {
        Ok(Price {
            id: row.int(0)?,
            title: row.text(1)?,
            cost: row.text(2)?,
            frequency: row.text(3)?,
            features: row.text(4)?,
            is_featured: row.flag(5)?,
        })
    })
    .collect()
}

pub fn insert_price(db: &mut dyn Executor, price: &NewPrice) -> DbResult<i64> {
    inserted_id(
        db,
        "INSERT INTO prices (title, cost, frequency, features, is_featured)
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
        &[
            Param::Text(&price.title),
            Param::Text(&price.cost),
            Param::Text(&price.frequency),
            Param::Text(&price.features),
            Param::Bool(price.is_featured),
        ],
    )
}

pub fn delete_price(db: &mut dyn Executor, id: i64) -> DbResult<bool> {
    let rows = db.execute("DELETE FROM prices WHERE id = $1", &[Param::Int(id)])?;
    Ok(rows > 0)
}

// -- Coaches --

pub fn list_coaches(db: &mut dyn Executor) -> DbResult<Vec<Coach>> {
    db.query("SELECT id, name, title, photo_url FROM coaches ORDER BY id", &[])?
        .iter()
        .map(|row| {
            Ok(Coach {
                id: row.int(0)?,
                name: row.text(1)?,
                title: row.text(2)?,
                photo_url: row.text(3)?,
            })
        })
        .collect()
}

pub fn insert_coach(db: &mut dyn Executor, coach: &NewCoach) -> DbResult<i64> {
    inserted_id(
        db,
        "INSERT INTO coaches (name, title, photo_url) VALUES ($1, $2, $3) RETURNING id",
        &[
            Param::Text(&coach.name),
            Param::Text(&coach.title),
            Param::Text(&coach.photo_url),
        ],
    )
}

pub fn delete_coach(db: &mut dyn Executor, id: i64) -> DbResult<bool> {
    let rows = db.execute("DELETE FROM coaches WHERE id = $1", &[Param::Int(id)])?;
    Ok(rows > 0)
}
