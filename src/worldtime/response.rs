/// Response structure for the WorldTimeAPI timezone endpoint
/// Represents the JSON object returned by worldtimeapi.org/api/timezone/{id}.
/// Everything except the datetime is optional; absent fields take defaults so
/// a sparse response still seeds a clock.
#[derive(serde::Deserialize, Debug)]
pub struct TimeRecord {
    /// ISO instant string with embedded UTC offset
    pub datetime: String,
    /// Signed "±HH:MM" UTC offset
    #[serde(default)]
    pub utc_offset: String,
    /// Weekday, reported either by name or as an index (0 = Sunday)
    #[serde(default)]
    pub day_of_week: DayOfWeek,
    /// Daylight saving time flag
    #[serde(default)]
    pub dst: bool,
    /// Timezone abbreviation
    #[serde(default)]
    pub abbreviation: String,
    /// Requesting client's IP address as seen by the API
    #[serde(default)]
    pub client_ip: String,
}

/// Weekday field; some deployments report a name, others a 0-based index.
#[derive(serde::Deserialize, Debug, Default)]
#[serde(untagged)]
pub enum DayOfWeek {
    #[default]
    Missing,
    Name(String),
    Index(u8),
}

impl DayOfWeek {
    pub fn into_name(self) -> String {
        match self {
            DayOfWeek::Missing => String::new(),
            DayOfWeek::Name(name) => name,
            DayOfWeek::Index(index) => match index {
                0 => "Sunday",
                1 => "Monday",
                2 => "Tuesday",
                3 => "Wednesday",
                4 => "Thursday",
                5 => "Friday",
                6 => "Saturday",
                _ => "",
            }
            .to_string(),
        }
    }
}
