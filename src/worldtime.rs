// Module containing response data structures for the world time API
mod response;

use crate::clock::parse_utc_offset;
use crate::error::AppError;
use tracing::{debug, error, info};

// API endpoint for the WorldTimeAPI timezone service
const WORLDTIME_ENDPOINT: &str = "https://worldtimeapi.org/api/timezone";

/// One server-reported point-in-time reading of a timezone's civil clock.
///
/// Fetched once per clock card activation and never mutated; a timezone
/// change produces a fresh snapshot instead.
#[derive(Debug, Clone)]
pub struct TimeSnapshot {
    /// ISO instant with embedded UTC offset (e.g., "2024-01-01T10:00:00+05:30")
    pub iso_datetime: String,
    /// Signed UTC offset in minutes; zero when the API omits or mangles it
    pub utc_offset_minutes: i32,
    /// Weekday name as reported by the API
    pub day_of_week: String,
    /// Whether daylight saving time is in effect
    pub is_dst: bool,
    /// Timezone abbreviation (e.g., "IST")
    pub abbreviation: String,
    /// IP address the API saw the request from
    pub source_ip: String,
}

impl From<response::TimeRecord> for TimeSnapshot {
    fn from(record: response::TimeRecord) -> Self {
        Self {
            iso_datetime: record.datetime,
            utc_offset_minutes: parse_utc_offset(&record.utc_offset),
            day_of_week: record.day_of_week.into_name(),
            is_dst: record.dst,
            abbreviation: record.abbreviation,
            source_ip: record.client_ip,
        }
    }
}

/// Fetches the current time snapshot for a timezone identifier.
///
/// Called once per clock card activation; the card keeps time locally from
/// then on. Errors are scoped to the requesting card.
pub async fn fetch_snapshot(timezone_id: &str) -> Result<TimeSnapshot, AppError> {
    info!("Fetching time snapshot for timezone: {}", timezone_id);

    let url = format!("{}/{}", WORLDTIME_ENDPOINT, timezone_id);

    let client = reqwest::Client::new();
    let response = client.get(&url).send().await?;

    if response.status().is_success() {
        let record: response::TimeRecord = response.json().await?;
        debug!("Time snapshot fetched successfully: {:?}", record);
        Ok(TimeSnapshot::from(record))
    } else {
        error!("Failed to fetch time snapshot: {}", response.status());
        Err(AppError::ApiRequestFailed(format!(
            "Failed to fetch time snapshot: {}",
            response.status()
        )))
    }
}
