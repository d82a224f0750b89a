use crate::money::{Money, format_hundredths};
use crate::timestamp;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// An average rating in hundredths (`4.50` is `450`).
///
/// Serialized as a JSON number so clients read it like any other rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AverageRating(i64);

impl AverageRating {
    /// Average of `sum` over `count` ratings, rounded half-up to hundredths.
    ///
    /// Returns `None` when there are no ratings.
    #[must_use]
    pub fn from_totals(sum: u64, count: u64) -> Option<Self> {
        if count == 0 {
            return None;
        }
        let scaled = u128::from(sum) * 100;
        let count = u128::from(count);
        let rounded = (scaled + count / 2) / count;
        i64::try_from(rounded).ok().map(Self)
    }

    /// The value in hundredths.
    #[must_use]
    pub const fn hundredths(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AverageRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hundredths(self.0))
    }
}

impl Serialize for AverageRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Going through text keeps the conversion free of float arithmetic.
        let value: f64 = format_hundredths(self.0)
            .parse()
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_f64(value)
    }
}

/// Query of `GET /analytics/revenue`.
///
/// `date` selects one whole UTC day and takes precedence over the range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RevenueQuery {
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Response of `GET /analytics/revenue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueReport {
    pub total_revenue: Money,
    pub order_count: u64,
    pub date: Option<NaiveDate>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Query of `GET /analytics/popular-dishes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PopularQuery {
    #[serde(default = "PopularQuery::default_limit")]
    pub limit: usize,
}

impl PopularQuery {
    pub const DEFAULT_LIMIT: usize = 10;

    fn default_limit() -> usize {
        Self::DEFAULT_LIMIT
    }
}

impl Default for PopularQuery {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// One row of `GET /analytics/popular-dishes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularDish {
    pub sandwich_id: u64,
    pub sandwich_name: String,
    /// Number of order lines naming this sandwich.
    pub order_count: u64,
    /// Sum of quantities across those lines.
    pub total_quantity: u64,
}

/// Query of `GET /analytics/complaints`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ComplaintQuery {
    /// Highest average rating still counted as a complaint.
    #[serde(default = "ComplaintQuery::default_min_rating")]
    pub min_rating: u8,
}

impl ComplaintQuery {
    pub const DEFAULT_MIN_RATING: u8 = 2;

    fn default_min_rating() -> u8 {
        Self::DEFAULT_MIN_RATING
    }
}

impl Default for ComplaintQuery {
    fn default() -> Self {
        Self {
            min_rating: Self::DEFAULT_MIN_RATING,
        }
    }
}

/// One row of `GET /analytics/complaints`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Complaint {
    pub sandwich_id: u64,
    pub sandwich_name: String,
    pub average_rating: AverageRating,
    pub review_count: u64,
}

/// Response of `GET /analytics/dish-ratings/{sandwich_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DishRatings {
    pub sandwich_id: u64,
    pub sandwich_name: String,
    pub average_rating: Option<AverageRating>,
    pub review_count: u64,
    pub min_rating: Option<u8>,
    pub max_rating: Option<u8>,
}
