use chrono::prelude::*;
use chrono_tz::Tz;

/// Parses dates of the form `YYYY-MM-DD` (zero padding optional)
pub fn is_valid_date(datestr: &str) -> anyhow::Result<(i32, u32, u32)> {
    let dates = datestr.trim().split('-').collect::<Vec<_>>();
    if dates.len() != 3 {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }
    let (year, month, day) = match (
        dates[0].parse::<i32>(),
        dates[1].parse::<u32>(),
        dates[2].parse::<u32>(),
    ) {
        (Ok(year), Ok(month), Ok(day)) => (year, month, day),
        _ => return Err(anyhow::Error::msg(datestr.to_string())),
    };

    if !(1970..=2100).contains(&year) || !(1..=12).contains(&month) {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }

    let month_length = get_month_length(year, month);

    if day < 1 || day > month_length {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }

    Ok((year, month, day))
}

/// Parses a time of day of the form `HH:MM` or `HH:MM:SS`
pub fn is_valid_time(timestr: &str) -> anyhow::Result<(u32, u32, u32)> {
    let parts = timestr.trim().split(':').collect::<Vec<_>>();
    if parts.len() != 2 && parts.len() != 3 {
        return Err(anyhow::Error::msg(timestr.to_string()));
    }
    let mut values = Vec::with_capacity(3);
    for part in &parts {
        match part.parse::<u32>() {
            Ok(v) => values.push(v),
            Err(_) => return Err(anyhow::Error::msg(timestr.to_string())),
        }
    }
    let (hours, minutes) = (values[0], values[1]);
    let seconds = values.get(2).copied().unwrap_or(0);
    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(anyhow::Error::msg(timestr.to_string()));
    }

    Ok((hours, minutes, seconds))
}

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn get_month_length(year: i32, month: u32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Timestamp in millis of a wall clock date and time in the given timezone.
/// Times skipped by a DST transition are rejected, ambiguous ones resolve
/// to the earliest instant.
pub fn local_datetime_to_millis(datestr: &str, timestr: &str, tz: &Tz) -> anyhow::Result<i64> {
    let (year, month, day) = is_valid_date(datestr)?;
    let (hours, minutes, seconds) = is_valid_time(timestr)?;

    tz.with_ymd_and_hms(year, month, day, hours, minutes, seconds)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| anyhow::anyhow!("{} {} does not exist in {}", datestr, timestr, tz))
}

pub fn format_timestamp(timestamp_millis: i64, tz: &Tz) -> String {
    match tz.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M %Z").to_string(),
        None => timestamp_millis.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_accepts_valid_dates() {
        let valid_dates = vec![
            "2018-1-1",
            "2025-12-31",
            "2020-1-12",
            "2020-2-29",
            "2020-02-2",
            "2020-02-02",
            "2025-06-01",
        ];

        for date in &valid_dates {
            assert!(is_valid_date(date).is_ok());
        }
    }

    #[test]
    fn it_rejects_invalid_dates() {
        let invalid_dates = vec![
            "2018--1-1",
            "2020-1-32",
            "2021-2-29",
            "2020-0-1",
            "2020-1-0",
            "01/06/2025",
            "",
        ];

        for date in &invalid_dates {
            assert!(is_valid_date(date).is_err());
        }
    }

    #[test]
    fn it_parses_times() {
        assert_eq!(is_valid_time("09:00").unwrap(), (9, 0, 0));
        assert_eq!(is_valid_time("23:59:30").unwrap(), (23, 59, 30));
        assert!(is_valid_time("24:00").is_err());
        assert!(is_valid_time("9").is_err());
        assert!(is_valid_time("nine:00").is_err());
    }

    #[test]
    fn it_converts_local_datetime() {
        let utc = local_datetime_to_millis("2025-06-01", "09:00", &Tz::UTC).unwrap();
        assert_eq!(
            utc,
            Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0)
                .unwrap()
                .timestamp_millis()
        );

        // Oslo is UTC+2 in June
        let oslo =
            local_datetime_to_millis("2025-06-01", "09:00", &chrono_tz::Europe::Oslo).unwrap();
        assert_eq!(utc - oslo, 2 * 60 * 60 * 1000);

        // Skipped by the spring DST transition
        assert!(
            local_datetime_to_millis("2025-03-30", "02:30", &chrono_tz::Europe::Oslo).is_err()
        );
    }

    #[test]
    fn it_formats_timestamps() {
        let ts = Utc
            .with_ymd_and_hms(2025, 6, 1, 9, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(format_timestamp(ts, &Tz::UTC), "2025-06-01 09:00 UTC");
    }
}
