pub mod content;
pub mod notifications;
pub mod reports;
