use serde::Serialize;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::Course;
use crate::models::course::distinct_categories;
use crate::report::{self, dto::ParsedReport};
use crate::services::reconcile::{self, ReconcileStats};
use crate::source::DocumentSource;
use crate::store::{self, CourseStore};

pub struct ScanService<'a> {
    store: &'a mut dyn CourseStore,
    source: &'a dyn DocumentSource,
}

#[derive(Debug, Default, Serialize)]
pub struct ScanStats {
    pub sources_processed: usize,
    pub sources_skipped: usize,
    pub courses_created: usize,
    pub courses_updated: usize,
    pub deadlines_inserted: usize,
    pub deadlines_refreshed: usize,
    pub deadlines_unchanged: usize,
    pub rows_skipped: usize,
    pub unparsable_dates: usize,
}

impl ScanStats {
    fn record(&mut self, merged: &ReconcileStats, report: &ParsedReport) {
        self.sources_processed += 1;
        if merged.course_created {
            self.courses_created += 1;
        } else {
            self.courses_updated += 1;
        }
        self.deadlines_inserted += merged.deadlines_inserted;
        self.deadlines_refreshed += merged.deadlines_refreshed;
        self.deadlines_unchanged += merged.deadlines_unchanged;
        self.rows_skipped += report.skipped_rows();
        self.unparsable_dates += report
            .issues
            .iter()
            .filter(|i| matches!(i, report::dto::ParseIssue::UnparsableDueDate { .. }))
            .count();
    }
}

#[derive(Debug)]
pub struct ScanOutcome {
    /// The collection as last committed to the store.
    pub courses: Vec<Course>,
    pub stats: ScanStats,
}

impl<'a> ScanService<'a> {
    pub fn new(store: &'a mut dyn CourseStore, source: &'a dyn DocumentSource) -> Self {
        Self { store, source }
    }

    pub fn scan_all(&mut self) -> Result<ScanOutcome, AppError> {
        let names = self.source.names()?;
        self.scan(&names)
    }

    /// Runs parse → reconcile → save for each page in order.
    ///
    /// Each page is merged into a copy of the committed collection and the
    /// copy replaces it only once the store accepted it. A page that is
    /// missing, malformed or headerless is skipped; a store failure aborts
    /// the scan with everything committed so far left in place.
    pub fn scan(&mut self, names: &[String]) -> Result<ScanOutcome, AppError> {
        info!("Starting scan of {} report pages...", names.len());
        let mut courses = self.store.load()?;
        let mut stats = ScanStats::default();

        for name in names {
            info!("Processing {}", name);
            let report = match self
                .source
                .fetch(name)
                .and_then(|html| report::parse_report(name, &html))
            {
                Ok(report) => report,
                Err(e) => {
                    warn!("Skipping {}: {}", name, e);
                    stats.sources_skipped += 1;
                    continue;
                }
            };

            let mut working = courses.clone();
            let Some(merged) = reconcile::reconcile(&mut working, &report) else {
                warn!("Skipping {}: no course header", name);
                stats.sources_skipped += 1;
                continue;
            };
            store::sort_by_period(&mut working);

            self.store.save(&working)?;
            courses = working;
            stats.record(&merged, &report);
        }

        info!("Distinct deadline types after scan: {:?}", distinct_categories(&courses));
        info!("Scan completed: {:?}", stats);
        Ok(ScanOutcome { courses, stats })
    }
}
