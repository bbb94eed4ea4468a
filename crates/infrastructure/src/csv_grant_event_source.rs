use std::path::PathBuf;

use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord, Trim};
use tenure_application::GrantEventSource;
use tenure_core::{AppError, AppResult};
use tenure_domain::{GrantEvent, GrantHistory, group_grant_events_by_user, parse_event_timestamp};
use tracing::info;

/// Default field delimiter of grant log files.
pub const DEFAULT_GRANT_LOG_DELIMITER: u8 = b'|';

/// Grant event source reading a delimited log file.
///
/// The first row is a header. Each following row holds, in order, the event
/// timestamp, the grantor, the user and the granted role.
#[derive(Debug, Clone)]
pub struct CsvGrantEventSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvGrantEventSource {
    /// Creates a source for the file at `path` split on `delimiter`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, delimiter: u8) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }

    fn parse_events(&self, contents: &[u8]) -> AppResult<Vec<GrantEvent>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(contents);

        let mut events = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|error| {
                AppError::Validation(format!(
                    "malformed grant log '{}': {error}",
                    self.path.display()
                ))
            })?;
            events.push(self.parse_record(&record)?);
        }

        Ok(events)
    }

    fn parse_record(&self, record: &StringRecord) -> AppResult<GrantEvent> {
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or_default();
        let field = |index: usize, name: &str| {
            record.get(index).ok_or_else(|| {
                AppError::Validation(format!(
                    "grant log '{}' line {line} is missing the {name} field",
                    self.path.display()
                ))
            })
        };

        let occurred_at = parse_event_timestamp(field(0, "timestamp")?).map_err(|error| {
            AppError::Validation(format!(
                "grant log '{}' line {line}: {error}",
                self.path.display()
            ))
        })?;

        GrantEvent::new(
            field(2, "user")?,
            field(1, "grantor")?,
            field(3, "role")?,
            occurred_at,
        )
        .map_err(|error| {
            AppError::Validation(format!(
                "grant log '{}' line {line}: {error}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl GrantEventSource for CsvGrantEventSource {
    async fn load_grant_history(&self) -> AppResult<GrantHistory> {
        let contents = tokio::fs::read(&self.path).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to read grant log '{}': {error}",
                self.path.display()
            ))
        })?;

        let events = self.parse_events(&contents)?;
        let event_count = events.len();
        let history = group_grant_events_by_user(events);

        info!(
            path = %self.path.display(),
            events = event_count,
            users = history.len(),
            "loaded grant log"
        );

        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::{TimeZone, Utc};
    use tenure_application::GrantEventSource;
    use tenure_core::{AppError, AppResult};

    use super::{CsvGrantEventSource, DEFAULT_GRANT_LOG_DELIMITER};

    fn grant_log(contents: &str) -> AppResult<tempfile::NamedTempFile> {
        let mut file = tempfile::NamedTempFile::new()
            .map_err(|error| AppError::Internal(error.to_string()))?;
        file.write_all(contents.as_bytes())
            .map_err(|error| AppError::Internal(error.to_string()))?;
        Ok(file)
    }

    #[tokio::test]
    async fn reads_rows_grouped_by_user() -> AppResult<()> {
        let file = grant_log(
            "timestamp|grantor|user|role\n\
             1/1/2021 10:00:00|bob|alice|admin\n\
             1/2/2021 09:00:00|bob|dave|viewer\n\
             1/3/2021 08:00:00|carol|alice|editor\n",
        )?;
        let source = CsvGrantEventSource::new(file.path(), DEFAULT_GRANT_LOG_DELIMITER);

        let history = source.load_grant_history().await?;

        assert_eq!(history.len(), 2);
        let alice = history.get("alice").cloned().unwrap_or_default();
        assert_eq!(alice.len(), 2);
        assert_eq!(alice[0].grantor().as_str(), "bob");
        assert_eq!(alice[0].role().as_str(), "admin");
        assert_eq!(
            Utc.with_ymd_and_hms(2021, 1, 3, 8, 0, 0).single(),
            Some(alice[1].occurred_at())
        );
        assert_eq!(alice[1].role().as_str(), "editor");
        Ok(())
    }

    #[tokio::test]
    async fn trims_whitespace_around_fields() -> AppResult<()> {
        let file = grant_log("timestamp,grantor,user,role\n 1/1/2021 10:00:00 , bob , alice , admin \n")?;
        let source = CsvGrantEventSource::new(file.path(), b',');

        let history = source.load_grant_history().await?;

        let alice = history.get("alice").cloned().unwrap_or_default();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].role().as_str(), "admin");
        Ok(())
    }

    #[tokio::test]
    async fn rejects_unparseable_timestamp() -> AppResult<()> {
        let file = grant_log("timestamp|grantor|user|role\n2021-01-01|bob|alice|admin\n")?;
        let source = CsvGrantEventSource::new(file.path(), DEFAULT_GRANT_LOG_DELIMITER);

        let result = source.load_grant_history().await;

        assert!(matches!(
            result,
            Err(AppError::Validation(message)) if message.contains("line 2")
        ));
        Ok(())
    }

    #[tokio::test]
    async fn rejects_rows_with_missing_fields() -> AppResult<()> {
        let file = grant_log("timestamp|grantor|user|role\n1/1/2021 10:00:00|bob|alice\n")?;
        let source = CsvGrantEventSource::new(file.path(), DEFAULT_GRANT_LOG_DELIMITER);

        assert!(matches!(
            source.load_grant_history().await,
            Err(AppError::Validation(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_is_an_internal_error() {
        let source = CsvGrantEventSource::new(
            "/nonexistent/tenure/grant-log.csv",
            DEFAULT_GRANT_LOG_DELIMITER,
        );

        assert!(matches!(
            source.load_grant_history().await,
            Err(AppError::Internal(_))
        ));
    }
}
