use std::sync::Arc;

use crate::core::error::Result;
use crate::features::reports::models::{Report, ReportAction, ReportStatus};
use crate::features::reports::services::ReportStore;
use crate::shared::constants::QUEUE_PAGE_SIZE;

/// One page of the moderation queue plus the metadata the admin UI needs to
/// build pagination links itself
#[derive(Debug)]
pub struct QueuePage {
    pub rows: Vec<Report>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
}

/// Filtered, paginated operator-facing view over all reports, and the entry
/// point for operator status transitions
pub struct QueueService {
    store: Arc<dyn ReportStore>,
}

impl QueueService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// Fetch one page of the queue. Pages are 1-based and clamped; a page
    /// past the end yields empty rows, never an error.
    pub async fn list(&self, filter: Option<ReportStatus>, page: i64) -> Result<QueuePage> {
        let current_page = page.max(1);
        let offset = (current_page - 1) * QUEUE_PAGE_SIZE;

        let total_count = self.store.count(filter).await?;
        let total_pages = ((total_count + QUEUE_PAGE_SIZE - 1) / QUEUE_PAGE_SIZE).max(1);

        let rows = self.store.fetch(filter, QUEUE_PAGE_SIZE, offset).await?;

        Ok(QueuePage {
            rows,
            current_page,
            total_pages,
            total_count,
        })
    }

    /// Apply an operator action to a report.
    ///
    /// Actions overwrite the status unconditionally from any state. A missing
    /// id is a silent no-op: the queue simply shows no change.
    pub async fn transition(&self, id: i64, action: ReportAction) -> Result<()> {
        let found = self.store.update_status(id, action.target_status()).await?;

        if found {
            tracing::info!("Report {} -> {}", id, action.target_status());
        } else {
            tracing::debug!("Transition on missing report {} ignored", id);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryReportStore;

    async fn seeded(n: usize) -> (Arc<InMemoryReportStore>, QueueService) {
        let store = Arc::new(InMemoryReportStore::new());
        for i in 0..n {
            store
                .insert((i + 1) as i64, &format!("https://site/{}", i + 1), None)
                .await
                .unwrap();
        }
        let service = QueueService::new(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_empty_queue_is_one_empty_page() {
        let (_, service) = seeded(0).await;

        let page = service.list(None, 1).await.unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 0);
    }

    #[tokio::test]
    async fn test_150_new_reports_span_two_pages() {
        let (_, service) = seeded(150).await;

        let first = service.list(Some(ReportStatus::New), 1).await.unwrap();
        assert_eq!(first.rows.len(), 100);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.total_count, 150);

        let second = service.list(Some(ReportStatus::New), 2).await.unwrap();
        assert_eq!(second.rows.len(), 50);
        assert_eq!(second.total_count, 150);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty_not_an_error() {
        let (_, service) = seeded(3).await;

        let page = service.list(None, 9).await.unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.current_page, 9);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 3);
    }

    #[tokio::test]
    async fn test_page_below_one_is_clamped() {
        let (_, service) = seeded(5).await;

        let page = service.list(None, 0).await.unwrap();
        assert_eq!(page.current_page, 1);
        assert_eq!(page.rows.len(), 5);

        let page = service.list(None, -2).await.unwrap();
        assert_eq!(page.current_page, 1);
    }

    #[tokio::test]
    async fn test_count_matches_rows_across_all_pages_per_filter() {
        let (store, service) = seeded(130).await;

        // Spread statuses around
        for id in 1..=40 {
            store
                .update_status(id, ReportStatus::Resolved)
                .await
                .unwrap();
        }
        for id in 41..=55 {
            store
                .update_status(id, ReportStatus::Ignored)
                .await
                .unwrap();
        }

        for filter in [
            None,
            Some(ReportStatus::New),
            Some(ReportStatus::Resolved),
            Some(ReportStatus::Ignored),
        ] {
            let total = store.count(filter).await.unwrap();
            let mut seen = 0i64;
            let mut page = 1;
            loop {
                let result = service.list(filter, page).await.unwrap();
                if result.rows.is_empty() {
                    break;
                }
                seen += result.rows.len() as i64;
                page += 1;
            }
            assert_eq!(seen, total, "filter {:?}", filter);
        }
    }

    #[tokio::test]
    async fn test_rows_ordered_most_recent_first() {
        let (_, service) = seeded(10).await;

        let page = service.list(None, 1).await.unwrap();
        for pair in page.rows.windows(2) {
            assert!(
                (pair[0].created_at, pair[0].id) >= (pair[1].created_at, pair[1].id),
                "rows must be ordered by created_at desc, id desc"
            );
        }
    }

    #[tokio::test]
    async fn test_transitions_converge_to_last_action() {
        let (store, service) = seeded(1).await;

        // Any sequence of actions lands on the last action's target
        let sequences: &[(&[ReportAction], ReportStatus)] = &[
            (&[ReportAction::Resolve], ReportStatus::Resolved),
            (&[ReportAction::Resolve, ReportAction::Resolve], ReportStatus::Resolved),
            (
                &[ReportAction::Ignore, ReportAction::Reopen],
                ReportStatus::New,
            ),
            (
                &[ReportAction::Resolve, ReportAction::Ignore],
                ReportStatus::Ignored,
            ),
            (
                &[
                    ReportAction::Ignore,
                    ReportAction::Resolve,
                    ReportAction::Reopen,
                    ReportAction::Resolve,
                ],
                ReportStatus::Resolved,
            ),
        ];

        for (actions, expected) in sequences {
            for action in *actions {
                service.transition(1, *action).await.unwrap();
            }
            assert_eq!(store.status_of(1), Some(*expected));
        }
    }

    #[tokio::test]
    async fn test_transition_on_missing_report_is_a_noop() {
        let (store, service) = seeded(2).await;

        service.transition(999, ReportAction::Resolve).await.unwrap();

        assert_eq!(store.row_count(), 2);
        assert_eq!(store.status_of(1), Some(ReportStatus::New));
        assert_eq!(store.status_of(2), Some(ReportStatus::New));
    }
}
