use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use tenure_core::AppError;
use tenure_domain::BucketWidth;
use tenure_infrastructure::DEFAULT_GRANT_LOG_DELIMITER;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub events_path: PathBuf,
    pub events_delimiter: u8,
    pub bucket_width: BucketWidth,
    pub horizon: Option<DateTime<Utc>>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = lookup("API_PORT")
            .map(|value| {
                value
                    .parse::<u16>()
                    .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))
            })
            .transpose()?
            .unwrap_or(8080);

        let events_path = lookup("ACCESS_EVENTS_PATH")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from("./data/input.csv"), PathBuf::from);

        let events_delimiter = match lookup("ACCESS_EVENTS_DELIMITER") {
            None => DEFAULT_GRANT_LOG_DELIMITER,
            Some(value) => match value.as_bytes() {
                [delimiter] if delimiter.is_ascii() => *delimiter,
                _ => {
                    return Err(AppError::Validation(format!(
                        "ACCESS_EVENTS_DELIMITER must be a single ASCII character, got '{value}'"
                    )));
                }
            },
        };

        let bucket_width = match lookup("INDEX_BUCKET_HOURS") {
            None => BucketWidth::DAY,
            Some(value) => {
                let hours = value.parse::<u32>().map_err(|error| {
                    AppError::Validation(format!("invalid INDEX_BUCKET_HOURS: {error}"))
                })?;
                BucketWidth::from_hours(hours)?
            }
        };

        let horizon = lookup("ACCESS_HORIZON")
            .filter(|value| !value.trim().is_empty())
            .map(|value| {
                DateTime::parse_from_rfc3339(value.trim())
                    .map(|horizon| horizon.with_timezone(&Utc))
                    .map_err(|error| {
                        AppError::Validation(format!("invalid ACCESS_HORIZON: {error}"))
                    })
            })
            .transpose()?;

        Ok(Self {
            api_host,
            api_port,
            events_path,
            events_delimiter,
            bucket_width,
            horizon,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{TimeZone, Utc};
    use tenure_core::AppError;
    use tenure_domain::BucketWidth;

    use super::ApiConfig;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() -> Result<(), AppError> {
        let config = config_from(&[])?;

        assert_eq!(config.api_port, 8080);
        assert_eq!(config.events_delimiter, b'|');
        assert_eq!(config.bucket_width, BucketWidth::DAY);
        assert!(config.horizon.is_none());
        assert_eq!(config.socket_address()?.to_string(), "127.0.0.1:8080");
        Ok(())
    }

    #[test]
    fn reads_overrides() -> Result<(), AppError> {
        let config = config_from(&[
            ("API_PORT", "3001"),
            ("ACCESS_EVENTS_DELIMITER", ","),
            ("INDEX_BUCKET_HOURS", "1"),
            ("ACCESS_HORIZON", "2021-01-05T00:00:00Z"),
        ])?;

        assert_eq!(config.api_port, 3001);
        assert_eq!(config.events_delimiter, b',');
        assert_eq!(config.bucket_width, BucketWidth::HOUR);
        assert_eq!(
            config.horizon,
            Utc.with_ymd_and_hms(2021, 1, 5, 0, 0, 0).single()
        );
        Ok(())
    }

    #[test]
    fn rejects_multi_character_delimiter() {
        assert!(config_from(&[("ACCESS_EVENTS_DELIMITER", "||")]).is_err());
    }

    #[test]
    fn rejects_zero_bucket_hours() {
        assert!(config_from(&[("INDEX_BUCKET_HOURS", "0")]).is_err());
    }

    #[test]
    fn rejects_unparseable_horizon() {
        assert!(config_from(&[("ACCESS_HORIZON", "tomorrow")]).is_err());
    }
}
