use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deadline_tracker::config::AppConfig;
use deadline_tracker::notify::LogNotificationSink;
use deadline_tracker::services::{ReminderScheduler, ScanService};
use deadline_tracker::source::DirectorySource;
use deadline_tracker::store::JsonCourseStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "deadline_tracker=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;
    info!(
        "store: {}, reports: {}",
        config.store_path.display(),
        config.report_dir.display()
    );

    let mut store = JsonCourseStore::new(&config.store_path);
    let source = DirectorySource::new(&config.report_dir);

    let outcome = ScanService::new(&mut store, &source).scan_all()?;
    info!(
        "{} courses tracked, {} sources skipped",
        outcome.courses.len(),
        outcome.stats.sources_skipped
    );

    let now = chrono::Local::now().naive_local();
    let mut sink = LogNotificationSink::new();
    ReminderScheduler::new(&mut sink).schedule_all(&outcome.courses, now);

    Ok(())
}
