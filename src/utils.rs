use chrono::{DateTime, NaiveDateTime, SecondsFormat};

use crate::{
    models::pediatricians::{GENRE_FEMALE, GENRE_MALE},
    protocol::{ApiError, ApiResult},
};

pub fn assert_genre_str(genre: &str) -> ApiResult<()> {
    if genre != GENRE_MALE && genre != GENRE_FEMALE {
        return Err(ApiError::bad_request(format!(
            "genre: \"{}\" is not a valid choice.",
            genre
        )));
    }
    Ok(())
}

/// Parses an RFC 3339 timestamp (offset or trailing `Z`) into naive UTC.
pub fn parse_time_str<S: AsRef<str>>(field: &str, s: S) -> ApiResult<NaiveDateTime> {
    DateTime::parse_from_rfc3339(s.as_ref().trim())
        .map(|t| t.naive_utc())
        .map_err(|_| {
            ApiError::bad_request(format!(
                "{}: Datetime has wrong format. Use YYYY-MM-DDThh:mm[:ss[.uuuuuu]]+HH:MM or Z.",
                field
            ))
        })
}

pub fn parse_required_time(field: &str, s: Option<String>) -> ApiResult<NaiveDateTime> {
    match s {
        Some(s) if !s.trim().is_empty() => parse_time_str(field, s),
        _ => Err(ApiError::required(field)),
    }
}

pub fn format_time_str(time: &NaiveDateTime) -> String {
    time.and_utc().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn format_date_str(time: &NaiveDateTime) -> String {
    time.format("%Y-%m-%d").to_string()
}

pub fn format_hour_str(time: &NaiveDateTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Lowercases the domain part only; the local part may be case sensitive.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_offset_and_zulu_times_to_utc() {
        let zulu = parse_time_str("time_start", "2024-03-01T09:30:00Z").unwrap();
        let offset = parse_time_str("time_start", "2024-03-01T03:30:00-06:00").unwrap();
        assert_eq!(zulu, offset);
        assert_eq!(
            zulu,
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn rejects_garbage_and_missing_times() {
        assert!(matches!(
            parse_time_str("time_start", "yesterday"),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            parse_required_time("time_finish", Some("".to_string())),
            Err(ApiError::BadRequest(msg)) if msg.starts_with("time_finish")
        ));
        assert!(parse_required_time("time_finish", None).is_err());
    }

    #[test]
    fn formatted_time_parses_back() {
        let t = parse_time_str("t", "2024-03-01T09:30:00.250Z").unwrap();
        let s = format_time_str(&t);
        assert_eq!(s, "2024-03-01T09:30:00.250000Z");
        assert_eq!(parse_time_str("t", s).unwrap(), t);
    }

    #[test]
    fn email_domain_is_lowercased() {
        assert_eq!(
            normalize_email("alfonsorodrigo12@GMAIL.COM"),
            "alfonsorodrigo12@gmail.com"
        );
        assert_eq!(normalize_email("Mixed.Case@Example.org"), "Mixed.Case@example.org");
    }

    #[test]
    fn genre_accepts_only_known_codes() {
        assert!(assert_genre_str("M").is_ok());
        assert!(assert_genre_str("F").is_ok());
        assert!(assert_genre_str("X").is_err());
    }
}
