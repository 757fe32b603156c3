use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ctft_scraper::db::{self, store};
use ctft_scraper::{Config, CtftClient, CtftError};

#[derive(Parser)]
#[command(
    name = "ctft-scraper",
    about = "Scrape competitive TFT esports data from competetft.com",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database schema.
    InitDb,
    /// Run one scraper and print what it found.
    Run {
        #[command(subcommand)]
        target: Target,
    },
    /// Run one scraper and persist its output.
    Save {
        #[command(subcommand)]
        target: Target,
    },
    /// Run every scraper and persist everything that is wired up.
    All,
}

#[derive(Subcommand, Clone)]
enum Target {
    /// The tournaments listing.
    Events,
    /// The schedule page.
    Schedule,
    /// One tournament's detail and participants pages.
    Tournament { tournament_id: String },
    /// The pro points standings.
    ProPoints,
    /// The ladder standings.
    Ladder,
}

#[tokio::main]
async fn main() -> Result<(), CtftError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let client = CtftClient::new(config.clone());

    match cli.command {
        Command::InitDb => {
            let pool = db::connect(config.database_url()?).await?;
            db::init_schema(&pool).await?;
            println!("Database tables created successfully.");
        }
        Command::Run { target } => run_target(&client, target).await,
        Command::Save { target } => {
            let pool = db::connect(config.database_url()?).await?;
            save_target(&client, &pool, target).await;
        }
        Command::All => {
            let pool = db::connect(config.database_url()?).await?;
            let summary = client.scrape_all().await;

            let events = store::save_events(&pool, &summary.events).await;
            println!(
                "events: {} inserted, {} skipped",
                events.inserted, events.skipped
            );

            let schedule = store::save_schedule(&pool, &summary.schedule).await;
            println!(
                "schedule slots: {} inserted, {} skipped",
                schedule.inserted, schedule.skipped
            );

            let pro_points = store::save_pro_points(&pool, &summary.pro_points).await;
            println!(
                "pro points rows: {} inserted, {} skipped",
                pro_points.inserted, pro_points.skipped
            );

            println!(
                "scraped {} tournaments and {} ladder standings (artifacts only)",
                summary.tournaments.len(),
                summary.ladder.standings.len()
            );
        }
    }

    Ok(())
}

async fn run_target(client: &CtftClient, target: Target) {
    match target {
        Target::Events => {
            let events = client.scrape_events().await;
            println!("Scraped {} events", events.len());
        }
        Target::Schedule => {
            let days = client.scrape_schedule().await;
            let slots: usize = days.iter().map(|d| d.tournaments.len()).sum();
            println!("Scraped {} schedule days ({slots} slots)", days.len());
        }
        Target::Tournament { tournament_id } => {
            match client.scrape_tournament(&tournament_id).await {
                Some(detail) => println!(
                    "Scraped tournament {} ({} participants)",
                    detail.tournament_id,
                    detail.participants.len()
                ),
                None => println!("No data for tournament {tournament_id}"),
            }
        }
        Target::ProPoints => {
            let page = client.scrape_pro_points().await;
            println!("Scraped {} pro points rows", page.players.len());
        }
        Target::Ladder => {
            let page = client.scrape_ladder().await;
            println!("Scraped {} ladder standings", page.standings.len());
        }
    }
}

async fn save_target(client: &CtftClient, pool: &sqlx::SqlitePool, target: Target) {
    match target {
        Target::Events => {
            let events = client.scrape_events().await;
            let report = store::save_events(pool, &events).await;
            println!(
                "Inserted {} events, skipped {}",
                report.inserted, report.skipped
            );
        }
        Target::Schedule => {
            let days = client.scrape_schedule().await;
            let report = store::save_schedule(pool, &days).await;
            println!(
                "Inserted {} schedule slots, skipped {}",
                report.inserted, report.skipped
            );
        }
        Target::ProPoints => {
            let page = client.scrape_pro_points().await;
            let report = store::save_pro_points(pool, &page).await;
            println!(
                "Inserted {} pro points rows, skipped {}",
                report.inserted, report.skipped
            );
        }
        Target::Tournament { tournament_id } => {
            // Tournament details live in JSON artifacts; the richer tables
            // are not fed by this scraper yet.
            match client.scrape_tournament(&tournament_id).await {
                Some(detail) => println!(
                    "Saved tournament {} artifact ({} participants)",
                    detail.tournament_id,
                    detail.participants.len()
                ),
                None => println!("No data for tournament {tournament_id}"),
            }
        }
        Target::Ladder => {
            // Ladder standings are not wired to persistence; artifact only.
            let page = client.scrape_ladder().await;
            println!(
                "Saved ladder artifact ({} standings)",
                page.standings.len()
            );
        }
    }
}
