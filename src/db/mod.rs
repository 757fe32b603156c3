pub mod store;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::Result;

/// Relational schema, idempotent. The tournaments/games/lobbies/scores
/// tables model the richer competitive structure and are not yet fed by a
/// scraper; ladder standings land in artifacts until their persistence is
/// wired up.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tournament_id TEXT NOT NULL UNIQUE,
    url TEXT NOT NULL,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    category TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS schedules (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS schedule_slots (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    schedule_id INTEGER NOT NULL REFERENCES schedules(id),
    tournament_id TEXT NOT NULL,
    url TEXT NOT NULL,
    time TEXT NOT NULL,
    name TEXT NOT NULL,
    region TEXT NOT NULL,
    UNIQUE(schedule_id, tournament_id)
);

CREATE TABLE IF NOT EXISTS tournaments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tournament_id TEXT NOT NULL UNIQUE,
    url TEXT,
    name TEXT,
    status TEXT,
    type TEXT,
    region TEXT,
    start_date TEXT,
    end_date TEXT,
    overview TEXT,
    stream_url TEXT
);

CREATE TABLE IF NOT EXISTS games (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tournament_id TEXT NOT NULL,
    day INTEGER NOT NULL,
    number INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS lobbies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id INTEGER NOT NULL REFERENCES games(id),
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS scores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    lobby_id INTEGER NOT NULL REFERENCES lobbies(id),
    player TEXT NOT NULL,
    placement INTEGER NOT NULL,
    points INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS pro_points_players (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    rank INTEGER NOT NULL,
    nickname TEXT NOT NULL,
    main_char TEXT NOT NULL,
    total_points INTEGER NOT NULL DEFAULT 0,
    demacia_cup_total INTEGER NOT NULL DEFAULT 0,
    bilgewater_cup_total INTEGER NOT NULL DEFAULT 0,
    shurima_cup_total INTEGER NOT NULL DEFAULT 0,
    tournament_id TEXT NOT NULL,
    url TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_pro_points_players_tournament
    ON pro_points_players(tournament_id);

CREATE TABLE IF NOT EXISTS pro_points_seeding (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pro_points_meta (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    about TEXT,
    seeding_description TEXT
);

CREATE TABLE IF NOT EXISTS ladder_standings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    rank INTEGER NOT NULL,
    player TEXT NOT NULL,
    weekly_points TEXT NOT NULL,
    url TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS regions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL UNIQUE
);

INSERT OR IGNORE INTO regions (code) VALUES ('APAC'), ('AMER'), ('EMEA');
"#;

/// Open a connection pool against `database_url`, creating the database
/// file if it does not exist yet.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Create every table the scrapers (and their eventual consumers) rely on.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA_SQL).execute(pool).await?;
    Ok(())
}
