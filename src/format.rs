//! Display Formatting
//!
//! Small helpers shared by table cells.

use chrono::NaiveDate;

/// Render a backend date (ISO `YYYY-MM-DD`, possibly with a time suffix)
/// as `DD.MM.YYYY`. Unparseable input is shown as-is.
pub fn format_date(raw: &str) -> String {
    let day = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Render an amount as `$12.34`.
pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_plain_iso_dates() {
        assert_eq!(format_date("2024-03-05"), "05.03.2024");
    }

    #[test]
    fn formats_dates_with_time_suffix() {
        assert_eq!(format_date("2024-03-05T10:30:00.000Z"), "05.03.2024");
    }

    #[test]
    fn passes_through_unparseable_dates() {
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn formats_money_with_two_decimals() {
        assert_eq!(format_money(3.0), "$3.00");
        assert_eq!(format_money(1234.567), "$1234.57");
    }
}
