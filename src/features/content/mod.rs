mod client;

pub use client::{ContentProvider, SiteContentClient, MISSING_POST_TITLE};
