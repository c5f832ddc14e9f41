mod report;

pub use report::{Report, ReportAction, ReportStatus};
