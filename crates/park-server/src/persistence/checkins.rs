//! Check-in persistence operations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use park_core::checkin::ValidCheckIn;
use park_core::models::{CheckIn, CheckInTarget, GeoPoint};
use serde::Serialize;
use sqlx::{Sqlite, SqlitePool};

use super::{from_db_timestamp, to_db_timestamp};

/// Result of a checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    CheckedOut(DateTime<Utc>),
    AlreadyCheckedOut,
    NotFound,
}

/// One row of a visitor's check-in history.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInHistoryEntry {
    pub checkin_id: i64,
    pub username: String,
    pub facility_id: Option<i64>,
    pub facility_name: Option<String>,
    pub trail_id: Option<i64>,
    pub trail_name: Option<String>,
    pub activity_type: String,
    pub party_size: u32,
    pub notes: Option<String>,
    pub checkin_time: DateTime<Utc>,
    pub checkout_time: Option<DateTime<Utc>>,
}

/// Look up a user by name, creating it on first use.
async fn find_or_create_user(tx: &mut sqlx::Transaction<'_, Sqlite>, username: &str) -> Result<i64> {
    sqlx::query(
        "INSERT INTO users (username, email) VALUES (?1, ?2) ON CONFLICT(username) DO NOTHING",
    )
    .bind(username)
    .bind(format!("{}@parkuser.com", username))
    .execute(&mut **tx)
    .await?;

    let (user_id,): (i64,) = sqlx::query_as("SELECT user_id FROM users WHERE username = ?1")
        .bind(username)
        .fetch_one(&mut **tx)
        .await?;

    Ok(user_id)
}

/// Persist a validated check-in created at `checkin_time` and return its ID.
pub async fn create_checkin(
    pool: &SqlitePool,
    checkin: &ValidCheckIn,
    checkin_time: DateTime<Utc>,
) -> Result<i64> {
    let mut tx = pool.begin().await?;
    let user_id = find_or_create_user(&mut tx, &checkin.user_name).await?;

    let result = sqlx::query(
        r#"
        INSERT INTO user_checkins
            (user_id, facility_id, trail_id, activity_type, party_size, notes, checkin_lat, checkin_lon, checkin_time)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )
    .bind(user_id)
    .bind(checkin.target.facility_id())
    .bind(checkin.target.trail_id())
    .bind(&checkin.activity_type)
    .bind(i64::from(checkin.party_size))
    .bind(&checkin.notes)
    .bind(checkin.location.map(|p| p.lat()))
    .bind(checkin.location.map(|p| p.lon()))
    .bind(to_db_timestamp(checkin_time))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(result.last_insert_rowid())
}

/// Close an open check-in. A check-in can only be checked out once.
pub async fn checkout(pool: &SqlitePool, checkin_id: i64, at: DateTime<Utc>) -> Result<CheckoutOutcome> {
    let result = sqlx::query(
        "UPDATE user_checkins SET checkout_time = ?2 WHERE checkin_id = ?1 AND checkout_time IS NULL",
    )
    .bind(checkin_id)
    .bind(to_db_timestamp(at))
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        return Ok(CheckoutOutcome::CheckedOut(at));
    }

    let existing: Option<(Option<String>,)> =
        sqlx::query_as("SELECT checkout_time FROM user_checkins WHERE checkin_id = ?1")
            .bind(checkin_id)
            .fetch_optional(pool)
            .await?;

    match existing {
        None => Ok(CheckoutOutcome::NotFound),
        Some((Some(_),)) => Ok(CheckoutOutcome::AlreadyCheckedOut),
        // The conditional UPDATE matched nothing, so the row cannot still be open.
        Some((None,)) => anyhow::bail!("check-in {} could not be checked out", checkin_id),
    }
}

/// Facility check-ins that have not been checked out, in ID order. Pass a
/// `facility_id` to restrict to one facility.
pub async fn open_facility_checkins(pool: &SqlitePool, facility_id: Option<i64>) -> Result<Vec<CheckIn>> {
    let rows = sqlx::query_as::<_, CheckInRow>(
        r#"
        SELECT checkin_id, user_id, facility_id, trail_id, activity_type, party_size, notes,
               checkin_lat, checkin_lon, checkin_time, checkout_time
        FROM user_checkins
        WHERE facility_id IS NOT NULL
        AND (?1 IS NULL OR facility_id = ?1)
        AND checkout_time IS NULL
        ORDER BY checkin_id
        "#,
    )
    .bind(facility_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
}

/// Most recent check-ins for a user, newest first.
pub async fn user_history(pool: &SqlitePool, username: &str, limit: u32) -> Result<Vec<CheckInHistoryEntry>> {
    let rows = sqlx::query_as::<_, HistoryRow>(
        r#"
        SELECT
            uc.checkin_id,
            u.username,
            uc.facility_id,
            f.name AS facility_name,
            uc.trail_id,
            t.name AS trail_name,
            uc.activity_type,
            uc.party_size,
            uc.notes,
            uc.checkin_time,
            uc.checkout_time
        FROM user_checkins uc
        JOIN users u ON uc.user_id = u.user_id
        LEFT JOIN facilities f ON uc.facility_id = f.facility_id
        LEFT JOIN trails t ON uc.trail_id = t.trail_id
        WHERE u.username = ?1
        ORDER BY uc.checkin_time DESC, uc.checkin_id DESC
        LIMIT ?2
        "#,
    )
    .bind(username)
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
}

// Internal row types for SQLx
#[derive(sqlx::FromRow)]
struct CheckInRow {
    checkin_id: i64,
    user_id: i64,
    facility_id: Option<i64>,
    trail_id: Option<i64>,
    activity_type: String,
    party_size: i64,
    notes: Option<String>,
    checkin_lat: Option<f64>,
    checkin_lon: Option<f64>,
    checkin_time: String,
    checkout_time: Option<String>,
}

impl TryFrom<CheckInRow> for CheckIn {
    type Error = anyhow::Error;

    fn try_from(row: CheckInRow) -> Result<Self> {
        let target = match (row.facility_id, row.trail_id) {
            (Some(id), None) => CheckInTarget::Facility(id),
            (None, Some(id)) => CheckInTarget::Trail(id),
            _ => anyhow::bail!("check-in {} must reference exactly one target", row.checkin_id),
        };

        Ok(CheckIn {
            checkin_id: row.checkin_id,
            user_id: row.user_id,
            target,
            activity_type: row.activity_type,
            party_size: u32::try_from(row.party_size)?,
            notes: row.notes,
            location: row.checkin_lat.zip(row.checkin_lon).map(|(lat, lon)| GeoPoint::new(lat, lon)),
            checkin_time: from_db_timestamp(&row.checkin_time)?,
            checkout_time: row
                .checkout_time
                .as_deref()
                .map(from_db_timestamp)
                .transpose()?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    checkin_id: i64,
    username: String,
    facility_id: Option<i64>,
    facility_name: Option<String>,
    trail_id: Option<i64>,
    trail_name: Option<String>,
    activity_type: String,
    party_size: i64,
    notes: Option<String>,
    checkin_time: String,
    checkout_time: Option<String>,
}

impl TryFrom<HistoryRow> for CheckInHistoryEntry {
    type Error = anyhow::Error;

    fn try_from(row: HistoryRow) -> Result<Self> {
        Ok(CheckInHistoryEntry {
            checkin_id: row.checkin_id,
            username: row.username,
            facility_id: row.facility_id,
            facility_name: row.facility_name,
            trail_id: row.trail_id,
            trail_name: row.trail_name,
            activity_type: row.activity_type,
            party_size: u32::try_from(row.party_size)?,
            notes: row.notes,
            checkin_time: from_db_timestamp(&row.checkin_time)?,
            checkout_time: row
                .checkout_time
                .as_deref()
                .map(from_db_timestamp)
                .transpose()?,
        })
    }
}
