use tracing::{instrument, warn};

use crate::config::Config;
use crate::fetch::{self, fetch_with_retries, RETRY_ATTEMPTS, RETRY_DELAY};
use crate::model::{EventItem, LadderPage, ProPointsPage, ScheduleDay, TournamentDetail};
use crate::scraper::{self, Html};
use crate::storage::ArtifactStore;

/// The main entry point for scraping competetft.com.
///
/// One method per logical scrape target; each owns its own page-render
/// session, retries with a fixed delay, and degrades to an empty result
/// rather than failing the run.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// use ctft_scraper::{Config, CtftClient};
///
/// let client = CtftClient::new(Config::from_env());
/// let events = client.scrape_events().await;
/// println!("Found {} events", events.len());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CtftClient {
    config: Config,
    artifacts: ArtifactStore,
}

/// Everything one full pipeline run produced.
#[derive(Debug, Default)]
pub struct ScrapeSummary {
    pub events: Vec<EventItem>,
    pub schedule: Vec<ScheduleDay>,
    pub tournaments: Vec<TournamentDetail>,
    pub pro_points: ProPointsPage,
    pub ladder: LadderPage,
}

impl CtftClient {
    pub fn new(config: Config) -> Self {
        let artifacts = ArtifactStore::new(config.data_dir.clone());
        Self::with_artifacts(config, artifacts)
    }

    /// Use a caller-supplied artifact store instead of the configured
    /// data directory.
    pub fn with_artifacts(config: Config, artifacts: ArtifactStore) -> Self {
        Self { config, artifacts }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scrape the tournaments listing. Empty on retry exhaustion.
    #[instrument(skip(self))]
    pub async fn scrape_events(&self) -> Vec<EventItem> {
        let url = self.config.events_url();
        let base_url = self.config.base_url.clone();
        let events = fetch_with_retries("events", RETRY_ATTEMPTS, RETRY_DELAY, || {
            let url = url.clone();
            let base_url = base_url.clone();
            async move {
                let html = fetch::render_page(&url).await?;
                let document = Html::parse_document(&html);
                scraper::events::parse_events(&document, &base_url)
            }
        })
        .await
        .unwrap_or_default();

        self.write_artifact("events.json", &events);
        events
    }

    /// Scrape the schedule page. Empty on retry exhaustion.
    #[instrument(skip(self))]
    pub async fn scrape_schedule(&self) -> Vec<ScheduleDay> {
        let url = self.config.schedule_url();
        let base_url = self.config.base_url.clone();
        let days = fetch_with_retries("schedule", RETRY_ATTEMPTS, RETRY_DELAY, || {
            let url = url.clone();
            let base_url = base_url.clone();
            async move {
                let html = fetch::render_page(&url).await?;
                let document = Html::parse_document(&html);
                scraper::schedule::parse_schedule(&document, &base_url)
            }
        })
        .await
        .unwrap_or_default();

        self.write_artifact("schedule.json", &days);
        days
    }

    /// Scrape one tournament: the overview page, then the participants
    /// page, merged into a single record via the per-tournament artifact.
    ///
    /// `None` only when both phases came back empty.
    #[instrument(skip(self))]
    pub async fn scrape_tournament(&self, tournament_id: &str) -> Option<TournamentDetail> {
        let label = format!("tournament:{tournament_id}");
        let url = self.config.tournament_overview_url(tournament_id);
        let mut record = fetch_with_retries(&label, RETRY_ATTEMPTS, RETRY_DELAY, || {
            let url = url.clone();
            let tournament_id = tournament_id.to_string();
            async move {
                let html = fetch::render_page(&url).await?;
                let document = Html::parse_document(&html);
                scraper::tournament::parse_tournament_detail(&document, &tournament_id, &url)
            }
        })
        .await;

        if let Some(detail) = &record {
            if let Err(err) = self.artifacts.save_tournament(detail) {
                warn!(%err, tournament_id, "failed to write tournament artifact");
            }
        }

        let participants_label = format!("participants:{tournament_id}");
        let participants_url = self.config.tournament_participants_url(tournament_id);
        let participants =
            fetch_with_retries(&participants_label, RETRY_ATTEMPTS, RETRY_DELAY, || {
                let url = participants_url.clone();
                async move {
                    let html = fetch::render_page(&url).await?;
                    let document = Html::parse_document(&html);
                    scraper::tournament::parse_participants(&document)
                }
            })
            .await;

        if let Some(participants) = participants {
            match self
                .artifacts
                .merge_participants(tournament_id, participants.clone())
            {
                Ok(merged) => record = Some(merged),
                Err(err) => {
                    warn!(%err, tournament_id, "failed to merge participants artifact");
                    if let Some(detail) = record.as_mut() {
                        detail.participants = participants;
                    }
                }
            }
        }

        record
    }

    /// Scrape the pro points page. Default-empty on retry exhaustion.
    #[instrument(skip(self))]
    pub async fn scrape_pro_points(&self) -> ProPointsPage {
        let url = self.config.pro_points_url();
        let base_url = self.config.base_url.clone();
        let page = fetch_with_retries("pro_points", RETRY_ATTEMPTS, RETRY_DELAY, || {
            let url = url.clone();
            let base_url = base_url.clone();
            async move {
                let html = fetch::render_page(&url).await?;
                let document = Html::parse_document(&html);
                scraper::pro_points::parse_pro_points(&document, &base_url)
            }
        })
        .await
        .unwrap_or_default();

        self.write_artifact("pro_points.json", &page);
        page
    }

    /// Scrape the ladder page. Default-empty on retry exhaustion.
    #[instrument(skip(self))]
    pub async fn scrape_ladder(&self) -> LadderPage {
        let url = self.config.ladder_url();
        let page = fetch_with_retries("ladder", RETRY_ATTEMPTS, RETRY_DELAY, || {
            let url = url.clone();
            async move {
                let html = fetch::render_page(&url).await?;
                let document = Html::parse_document(&html);
                scraper::ladder::parse_ladder(&document, &url)
            }
        })
        .await
        .unwrap_or_default();

        self.write_artifact("ladder.json", &page);
        page
    }

    /// Run every scrape target.
    ///
    /// Events go first, since their ids seed the per-tournament sessions;
    /// every remaining target then runs as its own task. The coordinator
    /// waits for all of them, and a session exhausting its retries
    /// contributes its empty value without cancelling the siblings.
    #[instrument(skip(self))]
    pub async fn scrape_all(&self) -> ScrapeSummary {
        let events = self.scrape_events().await;

        let schedule_client = self.clone();
        let schedule_task = tokio::spawn(async move { schedule_client.scrape_schedule().await });

        let pro_points_client = self.clone();
        let pro_points_task =
            tokio::spawn(async move { pro_points_client.scrape_pro_points().await });

        let ladder_client = self.clone();
        let ladder_task = tokio::spawn(async move { ladder_client.scrape_ladder().await });

        let mut tournament_tasks = Vec::new();
        for event in &events {
            let client = self.clone();
            let tournament_id = event.tournament_id.clone();
            tournament_tasks
                .push(tokio::spawn(
                    async move { client.scrape_tournament(&tournament_id).await },
                ));
        }

        let schedule = schedule_task.await.unwrap_or_default();
        let pro_points = pro_points_task.await.unwrap_or_default();
        let ladder = ladder_task.await.unwrap_or_default();

        let mut tournaments = Vec::new();
        for task in tournament_tasks {
            if let Ok(Some(detail)) = task.await {
                tournaments.push(detail);
            }
        }

        ScrapeSummary {
            events,
            schedule,
            tournaments,
            pro_points,
            ladder,
        }
    }

    fn write_artifact<T: serde::Serialize>(&self, name: &str, value: &T) {
        if let Err(err) = self.artifacts.save_json(name, value) {
            warn!(%err, name, "failed to write artifact");
        }
    }
}
