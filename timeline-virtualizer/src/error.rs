use alloc::string::String;

/// Reasons an item is considered malformed.
///
/// Malformed items never abort layout or rendering: heights and grouping degrade to a
/// best-effort value, and the error is only reported for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("item has no id; identity falls back to its position")]
    MissingId,
    #[error("item has no timestamp; it is laid out without a date label")]
    MissingTimestamp,
    #[error("item timestamp {0:?} is not a recognised date; grouping compares the raw value")]
    InvalidTimestamp(String),
}
