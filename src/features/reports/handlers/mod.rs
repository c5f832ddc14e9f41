pub mod report_handler;

pub use report_handler::{list_report_queue, submit_report, transition_report, ReportState};
