// Module containing response data structures for the country search API
mod response;

use crate::error::AppError;
use tracing::{debug, error, info};

// API endpoint for the Rest Countries name-search service
const COUNTRIES_ENDPOINT: &str = "https://restcountries.com/v3.1/name";

// Shown when a country record carries no usable flag image
const FLAG_PLACEHOLDER: &str = "https://placehold.co/320x213?text=flag";

/// A country matched by the search, reduced to what the clock viewer needs.
/// Immutable once built from the API response.
#[derive(Debug, Clone)]
pub struct Country {
    /// Common English name (e.g., "India")
    pub common_name: String,
    /// ISO 3166-1 alpha-2 code, unique per country (e.g., "IN")
    pub code: String,
    /// Timezone identifiers, in the order the API reports them
    pub timezone_ids: Vec<String>,
    /// Flag image URL; a placeholder when the API provides none
    pub flag_image_url: String,
}

impl From<response::CountryRecord> for Country {
    fn from(record: response::CountryRecord) -> Self {
        let flag_image_url = record
            .flags
            .png
            .or(record.flags.svg)
            .unwrap_or_else(|| FLAG_PLACEHOLDER.to_string());
        Self {
            common_name: record.name.common,
            code: record.cca2,
            timezone_ids: record.timezones,
            flag_image_url,
        }
    }
}

/// Searches countries by name using the Rest Countries API.
///
/// An empty or whitespace-only name short-circuits to an empty result without
/// touching the network. A non-success status or transport error is returned
/// as an error, never as a partial result.
pub async fn search_countries(name: &str) -> Result<Vec<Country>, AppError> {
    let name = name.trim();
    if name.is_empty() {
        debug!("Empty search query, skipping country lookup");
        return Ok(Vec::new());
    }

    info!("Searching countries by name: {}", name);

    let url = search_url(name)?;

    let client = reqwest::Client::new();
    let response = client.get(url).send().await?;

    if response.status().is_success() {
        let records: Vec<response::CountryRecord> = response.json().await?;
        debug!("Country search returned {} result(s)", records.len());
        Ok(records.into_iter().map(Country::from).collect())
    } else {
        error!("Failed to fetch countries: {}", response.status());
        Err(AppError::ApiRequestFailed(format!(
            "Failed to fetch countries: {}",
            response.status()
        )))
    }
}

/// Builds the search URL with the name percent-encoded as a path segment, so
/// URL-significant characters in a typed query (`#`, `?`, `/`) stay part of
/// the name instead of rewriting the request.
fn search_url(name: &str) -> Result<reqwest::Url, AppError> {
    let mut url = reqwest::Url::parse(COUNTRIES_ENDPOINT)
        .map_err(|err| AppError::ApiRequestFailed(format!("Bad countries endpoint: {}", err)))?;
    url.path_segments_mut()
        .map_err(|_| AppError::ApiRequestFailed("Bad countries endpoint".to_string()))?
        .push(name);
    url.query_pairs_mut()
        .append_pair("fields", "name,cca2,timezones,flags");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_query_short_circuits_without_network() {
        assert!(search_countries("").await.unwrap().is_empty());
        assert!(search_countries("   ").await.unwrap().is_empty());
    }

    #[test]
    fn plain_name_builds_expected_url() {
        let url = search_url("india").unwrap();
        assert_eq!(
            url.as_str(),
            "https://restcountries.com/v3.1/name/india?fields=name%2Ccca2%2Ctimezones%2Cflags"
        );
    }

    #[test]
    fn url_significant_characters_stay_inside_the_name() {
        let url = search_url("india#x").unwrap();
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), Some("fields=name%2Ccca2%2Ctimezones%2Cflags"));
        assert!(url.path().ends_with("/india%23x"), "path: {}", url.path());

        let url = search_url("a?b&c/d e").unwrap();
        assert_eq!(url.query(), Some("fields=name%2Ccca2%2Ctimezones%2Cflags"));
        assert!(
            url.path().ends_with("/a%3Fb&c%2Fd%20e"),
            "path: {}",
            url.path()
        );
    }

    #[test]
    fn converts_api_records_preserving_timezone_order() {
        let json = r#"[{
            "name": { "common": "India" },
            "cca2": "IN",
            "timezones": ["Asia/Kolkata"],
            "flags": { "png": "https://flagcdn.com/w320/in.png" }
        }]"#;
        let records: Vec<response::CountryRecord> = serde_json::from_str(json).unwrap();
        let countries: Vec<Country> = records.into_iter().map(Country::from).collect();

        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].common_name, "India");
        assert_eq!(countries[0].code, "IN");
        assert_eq!(countries[0].timezone_ids, vec!["Asia/Kolkata"]);
        assert_eq!(countries[0].flag_image_url, "https://flagcdn.com/w320/in.png");
    }

    #[test]
    fn missing_flag_defaults_to_placeholder() {
        let json = r#"[{
            "name": { "common": "Atlantis" },
            "cca2": "AT",
            "timezones": ["UTC"],
            "flags": {}
        }]"#;
        let records: Vec<response::CountryRecord> = serde_json::from_str(json).unwrap();
        let country = Country::from(records.into_iter().next().unwrap());

        assert_eq!(country.flag_image_url, super::FLAG_PLACEHOLDER);
    }

    #[test]
    fn svg_flag_used_when_png_is_absent() {
        let json = r#"[{
            "name": { "common": "France" },
            "cca2": "FR",
            "timezones": ["Europe/Paris"],
            "flags": { "svg": "https://flagcdn.com/fr.svg" }
        }]"#;
        let records: Vec<response::CountryRecord> = serde_json::from_str(json).unwrap();
        let country = Country::from(records.into_iter().next().unwrap());

        assert_eq!(country.flag_image_url, "https://flagcdn.com/fr.svg");
    }
}
