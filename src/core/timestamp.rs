//! Locale-aware timestamp rendering
//!
//! Sinks render the date and the time of day following a locale tag such as
//! `en-GB` or `en_US`. Only a fixed table of numeric layouts is supported;
//! unknown tags fall back to ISO 8601 style.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt;

/// Date and time layouts for one locale
///
/// # Examples
///
/// ```
/// use multisink_logger::core::LocaleFormat;
/// use chrono::{TimeZone, Utc};
///
/// let format = LocaleFormat::parse("en-GB");
/// let instant = Utc.with_ymd_and_hms(2026, 10, 19, 14, 5, 9).unwrap();
/// assert_eq!(format.format_date(&instant), "19/10/2026");
/// assert_eq!(format.format_time(&instant), "14:05:09");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFormat {
    tag: String,
    date_pattern: &'static str,
    time_pattern: &'static str,
    known: bool,
}

const ISO_DATE: &str = "%Y-%m-%d";
const H24_TIME: &str = "%H:%M:%S";

impl LocaleFormat {
    /// Resolve a locale tag. Matching is case-insensitive and accepts both
    /// `-` and `_` as separators; a bare language picks its main region.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let normalized = tag.trim().replace('_', "-").to_lowercase();
        let mut parts = normalized.split('-');
        let language = parts.next().unwrap_or_default();
        let region = parts.next().unwrap_or_default();

        let layout = match (language, region) {
            ("en", "us") | ("en", "ph") => Some(("%-m/%-d/%Y", "%-I:%M:%S %p")),
            ("en", "ca") | ("sv", _) | ("lt", _) => Some((ISO_DATE, H24_TIME)),
            ("en", _) => Some(("%d/%m/%Y", H24_TIME)),
            ("de", _) | ("ru", _) | ("pl", _) | ("fi", _) | ("nb", _) => {
                Some(("%d.%m.%Y", H24_TIME))
            }
            ("fr", _) | ("es", _) | ("it", _) | ("pt", _) => Some(("%d/%m/%Y", H24_TIME)),
            ("nl", _) => Some(("%d-%m-%Y", H24_TIME)),
            ("ja", _) | ("zh", _) => Some(("%Y/%m/%d", H24_TIME)),
            _ => None,
        };

        let (date_pattern, time_pattern, known) = match layout {
            Some((date, time)) => (date, time, true),
            None => (ISO_DATE, H24_TIME, false),
        };

        Self {
            tag: tag.to_string(),
            date_pattern,
            time_pattern,
            known,
        }
    }

    /// The tag this format was resolved from.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether the tag matched the locale table (otherwise ISO layout is used).
    pub fn is_known(&self) -> bool {
        self.known
    }

    #[must_use]
    pub fn format_date<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        datetime.format(self.date_pattern).to_string()
    }

    #[must_use]
    pub fn format_time<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        datetime.format(self.time_pattern).to_string()
    }

    /// Date and time of a record instant in the process's local time zone.
    #[must_use]
    pub fn format_local_date_time(&self, instant: &DateTime<Utc>) -> (String, String) {
        let local = instant.with_timezone(&Local);
        (self.format_date(&local), self.format_time(&local))
    }
}

impl Default for LocaleFormat {
    fn default() -> Self {
        Self::parse("en-GB")
    }
}
