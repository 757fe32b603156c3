use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{error, instrument, warn};

use crate::error::Result;
use crate::model::{EventItem, ProPointsPage, ScheduleDay};

/// Outcome of persisting one batch. On success,
/// `inserted + skipped` equals the candidate batch size.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PersistReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Persist events, skipping natural-key duplicates.
///
/// The whole batch runs in one transaction; a transaction-level failure
/// rolls everything back, logs, and yields an empty report; it never
/// raises to the caller.
#[instrument(skip_all, fields(candidates = events.len()))]
pub async fn save_events(pool: &SqlitePool, events: &[EventItem]) -> PersistReport {
    match try_save_events(pool, events).await {
        Ok(report) => report,
        Err(err) => {
            error!(%err, "failed to persist events; batch rolled back");
            PersistReport::default()
        }
    }
}

async fn try_save_events(pool: &SqlitePool, events: &[EventItem]) -> Result<PersistReport> {
    let mut report = PersistReport::default();
    let mut tx = pool.begin().await?;

    for event in events {
        if let Err(err) = event.validate() {
            warn!(%err, "skipping invalid event record");
            report.skipped += 1;
            continue;
        }
        if exists_event(&mut tx, &event.tournament_id).await? {
            report.skipped += 1;
            continue;
        }
        sqlx::query(
            "INSERT INTO events (tournament_id, url, name, type, category) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&event.tournament_id)
        .bind(&event.url)
        .bind(&event.name)
        .bind(&event.kind)
        .bind(&event.category)
        .execute(&mut *tx)
        .await?;
        report.inserted += 1;
    }

    tx.commit().await?;
    Ok(report)
}

async fn exists_event(tx: &mut Transaction<'_, Sqlite>, tournament_id: &str) -> Result<bool> {
    let existing = sqlx::query("SELECT 1 FROM events WHERE tournament_id = ?")
        .bind(tournament_id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(existing.is_some())
}

/// Persist schedule days and their slots.
///
/// The day row is fetched-or-created by date; a slot is skipped when its
/// `(schedule_id, tournament_id)` pair already exists. The report counts
/// slots, the actual records.
#[instrument(skip_all, fields(days = days.len()))]
pub async fn save_schedule(pool: &SqlitePool, days: &[ScheduleDay]) -> PersistReport {
    match try_save_schedule(pool, days).await {
        Ok(report) => report,
        Err(err) => {
            error!(%err, "failed to persist schedule; batch rolled back");
            PersistReport::default()
        }
    }
}

async fn try_save_schedule(pool: &SqlitePool, days: &[ScheduleDay]) -> Result<PersistReport> {
    let mut report = PersistReport::default();
    let mut tx = pool.begin().await?;

    for day in days {
        let date = day.date.to_string();
        let schedule_id = match sqlx::query_as::<_, (i64,)>(
            "SELECT id FROM schedules WHERE date = ?",
        )
        .bind(&date)
        .fetch_optional(&mut *tx)
        .await?
        {
            Some((id,)) => id,
            None => sqlx::query("INSERT INTO schedules (date) VALUES (?)")
                .bind(&date)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid(),
        };

        for slot in &day.tournaments {
            if let Err(err) = slot.validate() {
                warn!(%err, date, "skipping invalid schedule slot");
                report.skipped += 1;
                continue;
            }
            let existing = sqlx::query(
                "SELECT 1 FROM schedule_slots WHERE schedule_id = ? AND tournament_id = ?",
            )
            .bind(schedule_id)
            .bind(&slot.tournament_id)
            .fetch_optional(&mut *tx)
            .await?;
            if existing.is_some() {
                report.skipped += 1;
                continue;
            }
            sqlx::query(
                "INSERT INTO schedule_slots (schedule_id, tournament_id, url, time, name, region) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(schedule_id)
            .bind(&slot.tournament_id)
            .bind(&slot.url)
            .bind(&slot.time)
            .bind(&slot.name)
            .bind(slot.region.to_string())
            .execute(&mut *tx)
            .await?;
            report.inserted += 1;
        }
    }

    tx.commit().await?;
    Ok(report)
}

/// Persist a pro points page: players, seeding rules and the meta row.
///
/// Player rows carry no duplicate check; every scrape appends a full
/// fresh copy.
#[instrument(skip_all, fields(players = page.players.len()))]
pub async fn save_pro_points(pool: &SqlitePool, page: &ProPointsPage) -> PersistReport {
    match try_save_pro_points(pool, page).await {
        Ok(report) => report,
        Err(err) => {
            error!(%err, "failed to persist pro points; batch rolled back");
            PersistReport::default()
        }
    }
}

async fn try_save_pro_points(pool: &SqlitePool, page: &ProPointsPage) -> Result<PersistReport> {
    let mut report = PersistReport::default();
    let mut tx = pool.begin().await?;

    for player in &page.players {
        if let Err(err) = player.validate() {
            warn!(%err, "skipping invalid pro points row");
            report.skipped += 1;
            continue;
        }
        sqlx::query(
            "INSERT INTO pro_points_players \
             (rank, nickname, main_char, total_points, demacia_cup_total, \
              bilgewater_cup_total, shurima_cup_total, tournament_id, url) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(player.rank)
        .bind(&player.nickname)
        .bind(&player.main_char)
        .bind(player.total_points)
        .bind(player.demacia_cup_total)
        .bind(player.bilgewater_cup_total)
        .bind(player.shurima_cup_total)
        .bind(&player.tournament_id)
        .bind(&player.url)
        .execute(&mut *tx)
        .await?;
        report.inserted += 1;
    }

    for rule in &page.seeding.rules {
        sqlx::query("INSERT INTO pro_points_seeding (title, description) VALUES (?, ?)")
            .bind(&rule.title)
            .bind(&rule.description)
            .execute(&mut *tx)
            .await?;
        report.inserted += 1;
    }

    sqlx::query("INSERT INTO pro_points_meta (about, seeding_description) VALUES (?, ?)")
        .bind(&page.about)
        .bind(&page.seeding.description)
        .execute(&mut *tx)
        .await?;
    report.inserted += 1;

    tx.commit().await?;
    Ok(report)
}
