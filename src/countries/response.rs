/// Response structure for the Rest Countries name-search endpoint
/// Represents one element of the JSON array returned by
/// restcountries.com/v3.1/name/{name}?fields=name,cca2,timezones,flags
#[derive(serde::Deserialize, Debug)]
pub struct CountryRecord {
    /// Country name variants
    pub name: CountryName,
    /// ISO 3166-1 alpha-2 code (e.g., "IN")
    pub cca2: String,
    /// Timezone identifiers the country spans
    #[serde(default)]
    pub timezones: Vec<String>,
    /// Flag image URLs
    #[serde(default)]
    pub flags: Flags,
}

/// Name variants for a country; only the common form is used
#[derive(serde::Deserialize, Debug)]
pub struct CountryName {
    /// Common English name (e.g., "India")
    pub common: String,
}

/// Flag image URLs; either field may be absent
#[derive(serde::Deserialize, Debug, Default)]
pub struct Flags {
    /// PNG flag image URL
    pub png: Option<String>,
    /// SVG flag image URL
    pub svg: Option<String>,
}
