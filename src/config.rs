use anyhow::Context;
use chrono::FixedOffset;

use crate::schedule::{layout::DEFAULT_PIXELS_PER_HOUR, studio::STUDIO_CHAIRS};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub studio_capacity: u32,
    /// Offset of the studio wall clock; incoming timestamps with another
    /// offset are converted to it.
    pub studio_offset: FixedOffset,
    pub grid_window_start_hour: u32,
    pub grid_pixels_per_hour: f64,
    pub session_ttl_secs: i64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} is not valid", key)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL not found")?;
        let offset_minutes: i32 = env_or("STUDIO_UTC_OFFSET_MINUTES", 0)?;
        let studio_offset =
            FixedOffset::east_opt(offset_minutes * 60).context("STUDIO_UTC_OFFSET_MINUTES out of range")?;
        let grid_window_start_hour = env_or("GRID_WINDOW_START_HOUR", 0)?;
        if grid_window_start_hour > 23 {
            anyhow::bail!("GRID_WINDOW_START_HOUR must be below 24");
        }

        Ok(Self {
            database_url,
            bind_addr: env_or("BIND_ADDR", "127.0.0.1:8080".to_string())?,
            studio_capacity: env_or("STUDIO_CAPACITY", STUDIO_CHAIRS)?,
            studio_offset,
            grid_window_start_hour,
            grid_pixels_per_hour: env_or("GRID_PIXELS_PER_HOUR", DEFAULT_PIXELS_PER_HOUR)?,
            session_ttl_secs: env_or("SESSION_TTL_SECS", 3600)?,
        })
    }
}
