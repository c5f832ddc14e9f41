/// Fixed page size for the moderation queue
pub const QUEUE_PAGE_SIZE: i64 = 100;
