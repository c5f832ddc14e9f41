pub mod clients;
pub mod services;

pub use clients::{HttpMailer, Mailer};
pub use services::Notifier;
