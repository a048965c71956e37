//! User-facing notification model for the corner notice shelf.
//!
//! Every effect failure funnels into a notice here instead of leaving errors
//! in the console alone; successes announce themselves the same way and are
//! expired by the runtime after [`NOTICE_TTL_MS`].

/// Most notices kept on the shelf at once; older entries drop off first.
pub const NOTICE_SHELF_LIMIT: usize = 4;

/// How long success notices stay up before the runtime auto-dismisses them.
/// Error notices stay until dismissed or pushed off the shelf.
pub const NOTICE_TTL_MS: i32 = 4_000;

/// Severity of one notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One notification on the shelf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Reducer-assigned id, unique for the lifetime of the page.
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}
