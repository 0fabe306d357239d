use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config;

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

fn app_time_zone() -> Tz {
    config::current_time_zone()
}

pub fn now_in_app_tz() -> DateTime<Tz> {
    Utc::now().with_timezone(&app_time_zone())
}

pub fn today_in_app_tz() -> NaiveDate {
    now_in_app_tz().date_naive()
}

/// `7 mar 2026, 08:00` in the given zone.
pub fn format_datetime_es_in(value: &DateTime<Utc>, tz: &Tz) -> String {
    let local = value.with_timezone(tz);
    let month = MONTHS_ES[local.month0() as usize];
    format!(
        "{} {} {}, {}",
        local.format("%-d"),
        month,
        local.format("%Y"),
        local.format("%H:%M")
    )
}

pub fn format_datetime_es(value: &DateTime<Utc>) -> String {
    format_datetime_es_in(value, &app_time_zone())
}

/// Combines `<input type=date>` and `<input type=time>` values into a UTC instant.
pub fn local_inputs_to_utc_in(date: &str, time: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()?;
    let naive = NaiveDateTime::new(date, time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(value) => Some(value.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

pub fn local_inputs_to_utc(date: &str, time: &str) -> Option<DateTime<Utc>> {
    local_inputs_to_utc_in(date, time, &app_time_zone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_spanish_month_names() {
        let value: DateTime<Utc> = "2026-03-07T13:05:00Z".parse().unwrap();
        assert_eq!(
            format_datetime_es_in(&value, &chrono_tz::America::Bogota),
            "7 mar 2026, 08:05"
        );
        assert_eq!(format_datetime_es_in(&value, &chrono_tz::UTC), "7 mar 2026, 13:05");
    }

    #[test]
    fn converts_local_inputs_to_utc() {
        let value = local_inputs_to_utc_in("2026-03-07", "08:00", &chrono_tz::America::Bogota)
            .unwrap();
        assert_eq!(value.to_rfc3339(), "2026-03-07T13:00:00+00:00");
    }

    #[test]
    fn rejects_incomplete_inputs() {
        assert!(local_inputs_to_utc_in("", "08:00", &chrono_tz::UTC).is_none());
        assert!(local_inputs_to_utc_in("2026-03-07", "", &chrono_tz::UTC).is_none());
        assert!(local_inputs_to_utc_in("07/03/2026", "8", &chrono_tz::UTC).is_none());
    }
}
