use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Rendered for dates that could not be parsed.
pub const INVALID_DATE: &str = "NaN-NaN-NaN NaN:NaN";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// `YYYY-MM-DD HH:mm` in the timestamp's own zone.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(DATE_FORMAT).to_string()
}

/// Parses and renders in local time.
///
/// RFC 3339 and bare dates (taken as UTC midnight) are absolute; a date-time
/// without an offset is read as local time.
pub fn format_date_str(text: &str) -> String {
    match parse_date(text.trim()) {
        Some(date) => format_date(&date),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_date(text: &str) -> Option<DateTime<Local>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Local));
    }
    if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        let midnight = day.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

/// Mainland mobile number: 11 digits, `1` then `3`..`9`.
pub fn validate_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 11
        && bytes.iter().all(u8::is_ascii_digit)
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1])
}

/// Two decimals with halves rounded away from zero; `{:.2}` alone rounds
/// exact binary ties to even.
pub fn format_price(price: f64) -> String {
    format!("¥{:.2}", (price * 100.0).round() / 100.0)
}

/// Reads the leading number like a lenient float parse; `¥NaN` when there is none.
pub fn format_price_str(price: &str) -> String {
    format_price(leading_number(price).unwrap_or(f64::NAN))
}

fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    (1..=end)
        .rev()
        .find_map(|len| text[..len].parse::<f64>().ok())
}
