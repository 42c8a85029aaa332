use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Row as it appears in the source CSV. Columns are matched by name, so
/// their order in the file does not matter. Integer columns are kept as text
/// here and parsed by the loader, which can then report row and column.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Review_ID")]
    pub review_id: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Year_Month")]
    pub year_month: String,
    #[serde(rename = "Reviewer_Location")]
    pub reviewer_location: String,
    #[serde(rename = "Branch")]
    pub branch: String,
}

/// One visitor review. Built once by the loader and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i64,
    /// Expected 1-5, but passed through unchecked.
    pub rating: i64,
    /// `YYYY-MM`.
    pub period: String,
    pub location: String,
    pub park: String,
}

impl Review {
    pub fn new(
        id: i64,
        rating: i64,
        period: impl Into<String>,
        location: impl Into<String>,
        park: impl Into<String>,
    ) -> Self {
        Review {
            id,
            rating,
            period: period.into(),
            location: location.into(),
            park: park.into(),
        }
    }

    pub fn is_positive(&self) -> bool {
        self.rating >= 4
    }

    pub fn park_matches(&self, park: &str) -> bool {
        self.park.to_lowercase() == park.to_lowercase()
    }

    pub fn location_contains(&self, needle: &str) -> bool {
        self.location.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Per-park aggregate used by the export layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkSummary {
    pub reviews: usize,
    pub positive: usize,
    pub avg: f64,
    pub countries: usize,
}

/// Flattened `ParkSummary` with its park name, in the fixed tabular column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
pub struct SummaryRow {
    #[serde(rename = "Park")]
    #[tabled(rename = "Park")]
    pub park: String,
    pub reviews: usize,
    pub positive: usize,
    pub avg: f64,
    pub countries: usize,
}

impl SummaryRow {
    pub fn new(park: &str, summary: &ParkSummary) -> Self {
        SummaryRow {
            park: park.to_string(),
            reviews: summary.reviews,
            positive: summary.positive,
            avg: summary.avg,
            countries: summary.countries,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyAverage {
    pub month: &'static str,
    /// 0.0 when the month has no reviews.
    pub average: f64,
}

#[derive(Debug, Clone, Tabled)]
pub struct LocationAverageRow {
    #[tabled(rename = "Location")]
    pub location: String,
    #[tabled(rename = "Avg")]
    pub avg: String,
}
