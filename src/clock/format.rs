//! Label formatting

/// Format seconds as `HH:MM:SS`
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = (total_secs % 3600) % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format seconds as `MM:SS`; minutes are not wrapped into hours
pub fn format_ms(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(7), "00:00:07");
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(86399), "23:59:59");
    }

    #[test]
    fn formats_minutes_past_the_hour() {
        assert_eq!(format_ms(0), "00:00");
        assert_eq!(format_ms(125), "02:05");
        assert_eq!(format_ms(3725), "62:05");
    }
}
