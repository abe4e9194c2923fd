//! Data models for Dirble API responses
//!
//! Every structure mirrors a JSON resource of the Dirble v2 API. Wire names
//! are kept as the API sends them (`created_at`, `currentsong_reverse`,
//! `Station_id` on streams but `station_id` on songs, ...), so a value decoded
//! here can be serialized back to the same shape.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` as the type's default value
///
/// The live API sends `null` for many text fields (description, website)
/// that are documented as strings.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<FixedOffset>> {
    value.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}

// ============================================================================
// Shared field groups
// ============================================================================

/// Creation / update pair carried by most Dirble resources
///
/// Values are kept verbatim as sent by the API; use [`Timestamps::created`]
/// and [`Timestamps::updated`] to get parsed dates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timestamps {
    /// Creation date (ISO 8601)
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update date (ISO 8601)
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Timestamps {
    /// Parsed creation date, if present and well-formed
    pub fn created(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.created_at.as_deref())
    }

    /// Parsed update date, if present and well-formed
    pub fn updated(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.updated_at.as_deref())
    }
}

/// Value whose JSON type changes between API responses (number or string)
///
/// Whole numbers decode as [`FlexibleValue::Integer`]; numbers with a
/// fractional part (`1.5`) as [`FlexibleValue::Float`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FlexibleValue {
    /// Sent as a JSON number
    Integer(i64),
    /// Sent as a JSON number with a fractional part
    Float(f64),
    /// Sent as a JSON string
    Text(String),
}

impl FlexibleValue {
    /// Integer view of the value, parsing the string form when needed
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FlexibleValue::Integer(n) => Some(*n),
            FlexibleValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            FlexibleValue::Float(_) => None,
            FlexibleValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Floating point view of the value, parsing the string form when needed
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FlexibleValue::Integer(n) => Some(*n as f64),
            FlexibleValue::Float(f) => Some(*f),
            FlexibleValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for FlexibleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlexibleValue::Integer(n) => write!(f, "{}", n),
            FlexibleValue::Float(x) => write!(f, "{}", x),
            FlexibleValue::Text(s) => f.write_str(s),
        }
    }
}

/// Thumbnail of a station image
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Thumb {
    /// Thumbnail URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Station image
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    /// Full size image URL
    #[serde(default)]
    pub url: Option<String>,
    /// Thumbnail
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumb: Thumb,
}

impl Image {
    /// Thumbnail URL, if any
    pub fn thumb_url(&self) -> Option<&str> {
        self.thumb.url.as_deref()
    }
}

// ============================================================================
// Stations
// ============================================================================

/// Station as returned by list endpoints (`stations`, `stations/{id}/similar`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StationSummary {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// ISO 3166 country code
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    /// Acceptance flag/count
    #[serde(default, deserialize_with = "null_as_default")]
    pub accepted: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub added: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub website: String,
    /// Current song, "title - artist" reversed
    #[serde(default, rename = "currentsong_reverse")]
    pub current_song_reverse: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: Image,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(
        default,
        rename = "disablesongchecks",
        alias = "disable_song_checks",
        deserialize_with = "null_as_default"
    )]
    pub disable_song_checks: bool,
}

/// Full station, including its streams, categories and recent songs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accepted: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub added: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: Image,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    #[serde(default, deserialize_with = "null_as_default")]
    pub streams: Vec<Stream>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub station_songs: Vec<StationSong>,
}

impl Station {
    /// Highest bitrate stream that has not timed out
    pub fn best_stream(&self) -> Option<&Stream> {
        self.streams
            .iter()
            .filter(|s| !s.timedout)
            .max_by_key(|s| s.bitrate)
    }

    /// URLs of every stream of the station
    pub fn stream_urls(&self) -> impl Iterator<Item = &str> {
        self.streams.iter().map(|s| s.stream.as_str())
    }
}

/// A stream endpoint of a station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stream {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    /// Stream URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub stream: String,
    /// Bitrate in kbps
    #[serde(default, deserialize_with = "null_as_default")]
    pub bitrate: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_type: String,
    /// Last check status reported by the directory
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: i32,
    #[serde(default, rename = "Station_id", deserialize_with = "null_as_default")]
    pub station_id: u64,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timedout: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emptycounter: u32,
}

/// A song that played on a station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StationSong {
    /// Song identifier (a string, unlike every other Dirble id)
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// ISO week of the play
    #[serde(default, deserialize_with = "null_as_default")]
    pub week: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub station_id: u64,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
}

// ============================================================================
// Categories
// ============================================================================

/// A station category (genre)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub urlid: Option<FlexibleValue>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    /// Slash separated ids of the parent categories
    #[serde(default, deserialize_with = "null_as_default")]
    pub ancestry: String,
    #[serde(default)]
    pub position: Option<FlexibleValue>,
}

impl Category {
    /// Ids of the ancestors listed in `ancestry`, root first
    pub fn ancestor_ids(&self) -> Vec<u64> {
        self.ancestry
            .split('/')
            .filter_map(|part| part.trim().parse().ok())
            .collect()
    }

    /// True for top level categories
    pub fn is_primary(&self) -> bool {
        self.ancestry.trim().is_empty()
    }
}

/// A category with its direct children
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTree {
    #[serde(flatten)]
    pub category: Category,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Category>,
}

impl CategoryTree {
    /// Find a direct child by its slug
    pub fn child_by_slug(&self, slug: &str) -> Option<&Category> {
        self.children.iter().find(|c| c.slug == slug)
    }
}

// ============================================================================
// Geography
// ============================================================================

/// A country known by the directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub continent_id: u64,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

/// A continent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Continent {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub legacy_id: Option<u64>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

// ============================================================================
// Collections
// ============================================================================

pub type Stations = Vec<StationSummary>;
pub type StationSongs = Vec<StationSong>;
pub type Categories = Vec<Category>;
pub type CategoryStations = Vec<Station>;
pub type CountryStations = Vec<Station>;
pub type SearchResults = Vec<Station>;
pub type Countries = Vec<Country>;
pub type Continents = Vec<Continent>;
