use {
    crate::constants::{ISO8601_COMPACT_DATE_FORMAT, ISO8601_COMPACT_FORMAT},
    chrono::{DateTime, NaiveDate, Utc},
};

/// Format a timestamp as `YYYYMMDD'T'HHMMSS'Z'`, the form used by `x-amz-date`.
pub(crate) fn format_amz_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(ISO8601_COMPACT_FORMAT).to_string()
}

/// Format a date as `YYYYMMDD`, the form used in the credential scope.
pub(crate) fn format_scope_date(date: NaiveDate) -> String {
    date.format(ISO8601_COMPACT_DATE_FORMAT).to_string()
}
