mod report_dto;

pub use report_dto::{
    ReportQueueDto, ReportQueueQuery, ReportRowDto, SubmitReportDto, TransitionReportDto,
};
