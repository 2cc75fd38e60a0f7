#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    pool: web::Data<DbPool>,
                    config: web::Data<Config>,
                    info: web::Json<$request>
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](pool, config, info).await {
                        Ok(response) => response,
                        Err(err) => {
                            tracing::debug!(endpoint = $url, error = %err, "request failed");
                            $response::err(err)
                        }
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

use anyhow::{bail, Context};
use blake2::{Blake2b, Digest};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

const TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses a timestamp into studio wall-clock time. Timestamps carrying an
/// offset (`Z`, `+02:00`) are converted; bare ones are taken as wall clock.
pub fn parse_time_str<S: AsRef<str>>(s: S, studio: &FixedOffset) -> anyhow::Result<NaiveDateTime> {
    let s = s.as_ref().trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(studio).naive_local());
    }
    NaiveDateTime::parse_from_str(s, TIME_FMT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .with_context(|| format!("Wrong time format '{}'", s))
}

pub fn parse_date_str<S: AsRef<str>>(s: S) -> anyhow::Result<NaiveDate> {
    let s = s.as_ref().trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Wrong date format '{}'", s))
}

/// `date` plus `HH:MM` as entered in the booking form.
pub fn parse_date_clock(date: &str, clock: &str) -> anyhow::Result<NaiveDateTime> {
    let day = parse_date_str(date)?;
    let time = NaiveTime::parse_from_str(clock.trim(), "%H:%M")
        .with_context(|| format!("Wrong time format '{}'", clock))?;
    Ok(day.and_time(time))
}

pub fn format_time_str(time: &NaiveDateTime) -> String {
    format!("{}", time.format(TIME_FMT))
}

/// Bounds of one day, `[00:00, next 00:00)`.
pub fn day_bounds(day: NaiveDate) -> anyhow::Result<(NaiveDateTime, NaiveDateTime)> {
    let start = day.and_time(NaiveTime::MIN);
    let next = day.succ_opt().context("Date out of range")?;
    Ok((start, next.and_time(NaiveTime::MIN)))
}

pub fn hash_password(password: &str) -> String {
    format!("{:x}", Blake2b::digest(password.as_bytes()))
}

pub fn check_password(password: &str) -> anyhow::Result<()> {
    if password.chars().count() < 6 {
        bail!("Password must have at least 6 characters");
    }
    Ok(())
}

pub fn check_email(email: &str) -> anyhow::Result<()> {
    let mut parts = email.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(user), Some(domain)) if !user.is_empty() && domain.contains('.') => Ok(()),
        _ => bail!("Invalid email"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn offsets_convert_to_studio_clock() {
        let athens = FixedOffset::east_opt(3 * 3600).unwrap();
        let t = parse_time_str("2024-05-17T07:30:00Z", &athens).unwrap();
        assert_eq!(t, day().and_hms_opt(10, 30, 0).unwrap());
        let t = parse_time_str("2024-05-17T10:30:00+03:00", &athens).unwrap();
        assert_eq!(t, day().and_hms_opt(10, 30, 0).unwrap());
    }

    #[test]
    fn bare_timestamps_are_wall_clock() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            parse_time_str("2024-05-17T10:30", &utc).unwrap(),
            day().and_hms_opt(10, 30, 0).unwrap()
        );
        assert!(parse_time_str("17/05/2024 10:30", &utc).is_err());
        assert_eq!(
            format_time_str(&day().and_hms_opt(9, 5, 0).unwrap()),
            "2024-05-17T09:05:00"
        );
    }

    #[test]
    fn form_date_and_clock() {
        assert_eq!(
            parse_date_clock("2024-05-17", "14:15").unwrap(),
            day().and_hms_opt(14, 15, 0).unwrap()
        );
        assert!(parse_date_clock("2024-05-17", "25:00").is_err());
        let (start, end) = day_bounds(day()).unwrap();
        assert_eq!(end.signed_duration_since(start).num_hours(), 24);
    }

    #[test]
    fn credentials() {
        assert!(check_password("12345").is_err());
        assert!(check_password("123456").is_ok());
        assert!(check_email("ink@studio.gr").is_ok());
        assert!(check_email("ink.studio.gr").is_err());
        assert!(check_email("@studio.gr").is_err());
        assert_eq!(hash_password("secret"), hash_password("secret"));
        assert_ne!(hash_password("secret"), hash_password("Secret"));
    }
}
