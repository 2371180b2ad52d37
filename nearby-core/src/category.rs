//! Place categories and their OpenStreetMap query tags.
//!
//! The enum offers compile-time safety for category lookups. Each category
//! maps to exactly one [`QueryTag`] understood by the Overpass API, and to a
//! [`CategoryDisplay`] descriptor that presentation layers can use without
//! dispatching over icon sets themselves.
//!
//! # Examples
//! ```
//! use nearby_core::{Category, tag_for};
//!
//! assert_eq!(Category::Park.as_str(), "park");
//! assert_eq!(Category::Sports.query_tag().value, "pitch");
//! assert!(tag_for("Museum").is_none());
//! ```

use thiserror::Error;

/// Icon shown for places whose category has no dedicated descriptor.
pub const DEFAULT_ICON: &str = "location_on";

/// A user-facing place category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Category {
    /// Public parks (`leisure=park`).
    Park,
    /// Hospitals (`amenity=hospital`).
    Hospital,
    /// Restaurants (`amenity=restaurant`).
    Restaurant,
    /// Schools (`amenity=school`).
    School,
    /// Sports pitches (`leisure=pitch`).
    Sports,
    /// Cafés (`amenity=cafe`).
    Cafe,
    /// Libraries (`amenity=library`).
    Library,
    /// Banks (`amenity=bank`).
    Bank,
}

/// Key/value pair understood by the geospatial data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QueryTag {
    /// OpenStreetMap tag key, e.g. `amenity`.
    pub key: &'static str,
    /// OpenStreetMap tag value, e.g. `cafe`.
    pub value: &'static str,
}

/// Presentation hints for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDisplay {
    /// Material icon name.
    pub icon: &'static str,
    /// Plural heading used in pickers and list titles.
    pub heading: &'static str,
}

/// Error returned when parsing an unknown category label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{label}'")]
pub struct UnknownCategory {
    /// The label that failed to parse.
    pub label: String,
}

impl Category {
    /// Every supported category in picker order.
    pub const ALL: [Self; 8] = [
        Self::Park,
        Self::Sports,
        Self::Library,
        Self::Cafe,
        Self::Restaurant,
        Self::School,
        Self::Hospital,
        Self::Bank,
    ];

    /// Return the category as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Park => "park",
            Self::Hospital => "hospital",
            Self::Restaurant => "restaurant",
            Self::School => "school",
            Self::Sports => "sports",
            Self::Cafe => "cafe",
            Self::Library => "library",
            Self::Bank => "bank",
        }
    }

    /// Return the Overpass tag that selects features of this category.
    #[must_use]
    pub const fn query_tag(self) -> QueryTag {
        let (key, value) = match self {
            Self::Park => ("leisure", "park"),
            Self::Hospital => ("amenity", "hospital"),
            Self::Restaurant => ("amenity", "restaurant"),
            Self::School => ("amenity", "school"),
            Self::Sports => ("leisure", "pitch"),
            Self::Cafe => ("amenity", "cafe"),
            Self::Library => ("amenity", "library"),
            Self::Bank => ("amenity", "bank"),
        };
        QueryTag { key, value }
    }

    /// Return the presentation descriptor for this category.
    ///
    /// # Examples
    /// ```
    /// use nearby_core::Category;
    ///
    /// assert_eq!(Category::Cafe.display().heading, "Cafés");
    /// assert_eq!(Category::Bank.display().icon, "account_balance");
    /// ```
    #[must_use]
    pub const fn display(self) -> CategoryDisplay {
        let (icon, heading) = match self {
            Self::Park => ("park", "Parks"),
            Self::Sports => ("sports_soccer", "Sports Fields"),
            Self::Library => ("local_library", "Libraries"),
            Self::Cafe => ("local_cafe", "Cafés"),
            Self::Restaurant => ("restaurant", "Restaurants"),
            Self::School => ("school", "Schools"),
            Self::Hospital => ("local_hospital", "Hospitals"),
            Self::Bank => ("account_balance", "Banks"),
        };
        CategoryDisplay { icon, heading }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategory {
                label: s.to_owned(),
            })
    }
}

/// Look up the query tag for a category label, ignoring ASCII case.
///
/// Returns `None` for labels outside the supported set. Callers must not
/// contact the data source in that case.
#[must_use]
pub fn tag_for(label: &str) -> Option<QueryTag> {
    label.parse::<Category>().ok().map(Category::query_tag)
}
