//! Movie catalogue data model
//!
//! Wire shapes of the list endpoint plus the filter selection types shared by
//! the facet deriver, the filter state and the HTTP API.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Label used for the "no year filter" sentinel
pub const ALL_YEARS: &str = "All Years";

/// Label used for the "no genre filter" sentinel
pub const ALL_GENRES: &str = "All Genres";

/// One catalogue entry as served by the list endpoint
///
/// `image` is empty until enrichment fills it with a poster URL or the
/// placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieItem {
    pub name: String,
    pub production_year: i32,
    pub genre: String,
    pub synopsis_short: String,
    /// Full synopsis; may contain HTML markup
    pub synopsis: String,
    #[serde(default)]
    pub image: String,
}

/// Error body the list endpoint returns instead of a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieFetchError {
    pub message: String,
}

/// Position of a movie in the fetched array
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub usize);

impl MovieId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Year dimension of a filter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl YearFilter {
    /// Parse free-form year input
    ///
    /// Blank text, the sentinel label and anything non-numeric mean "no year
    /// filter". Bad input never produces an error.
    pub fn parse_lenient(text: &str) -> Self {
        match text.trim().parse::<i32>() {
            Ok(year) => YearFilter::Year(year),
            Err(_) => YearFilter::All,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, YearFilter::All)
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => f.write_str(ALL_YEARS),
            YearFilter::Year(year) => write!(f, "{}", year),
        }
    }
}

impl Serialize for YearFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            YearFilter::All => serializer.serialize_str(ALL_YEARS),
            YearFilter::Year(year) => serializer.serialize_i32(*year),
        }
    }
}

/// Wire shapes accepted for a year; anything unrecognised lands in `Other`
#[derive(Deserialize)]
#[serde(untagged)]
enum YearRepr {
    Number(i32),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for YearFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match YearRepr::deserialize(deserializer)? {
            YearRepr::Number(year) => YearFilter::Year(year),
            YearRepr::Float(value) => whole_year(value).map_or(YearFilter::All, YearFilter::Year),
            YearRepr::Text(text) => YearFilter::parse_lenient(&text),
            YearRepr::Other(_) => YearFilter::All,
        })
    }
}

/// `2000.0` is a year, `2000.5` and out-of-range values are not
fn whole_year(value: f64) -> Option<i32> {
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (value.fract() == 0.0 && in_range).then_some(value as i32)
}

/// Genre dimension of a filter selection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Genre(String),
}

impl GenreFilter {
    /// Map a select-box label to a filter
    ///
    /// Only the exact sentinel label means "all". Any other text, including
    /// blank or padded labels, is a genre compared verbatim.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_GENRES {
            GenreFilter::All
        } else {
            GenreFilter::Genre(label.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, GenreFilter::All)
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => f.write_str(ALL_GENRES),
            GenreFilter::Genre(genre) => f.write_str(genre),
        }
    }
}

impl Serialize for GenreFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GenreFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(GenreFilter::from_label(&label))
    }
}

/// Currently selected year and genre; both default to their sentinel
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub year: YearFilter,
    pub genre: GenreFilter,
}

impl FilterSelection {
    pub fn new(year: YearFilter, genre: GenreFilter) -> Self {
        Self { year, genre }
    }

    /// Predicate applied per movie; the two dimensions are independent
    pub fn matches(&self, movie: &MovieItem) -> bool {
        let year_ok = match self.year {
            YearFilter::All => true,
            YearFilter::Year(year) => movie.production_year == year,
        };
        let genre_ok = match &self.genre {
            GenreFilter::All => true,
            GenreFilter::Genre(genre) => movie.genre == *genre,
        };
        year_ok && genre_ok
    }
}
