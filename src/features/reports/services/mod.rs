mod queue_service;
mod report_store;
mod submission_service;

pub use queue_service::{QueuePage, QueueService};
pub use report_store::{PgReportStore, ReportStore};
pub use submission_service::SubmissionService;
