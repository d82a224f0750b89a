//! Read-only aggregations over orders and reviews.
//!
//! Every report runs in a single read transaction, so it sees one
//! consistent snapshot even while orders are being placed.

use crate::error::{Result, ShopError};
use crate::model::{Order, OrderDetail, Review, Sandwich};
use crate::money::Money;
use crate::schema::{
    AverageRating, Complaint, DateRange, DishRatings, PopularDish, RevenueQuery, RevenueReport,
};
use crate::storage::Store;
use crate::storage::tables::{ORDER_DETAILS, ORDERS, REVIEWS, SANDWICHES, fetch, fetch_all};
use crate::timestamp;
use std::collections::BTreeMap;

/// Running totals of the ratings for one sandwich.
#[derive(Debug, Clone, Copy)]
struct Tally {
    sum: u64,
    count: u64,
    min: u8,
    max: u8,
}

impl Tally {
    fn new(rating: u8) -> Self {
        Self {
            sum: u64::from(rating),
            count: 1,
            min: rating,
            max: rating,
        }
    }

    fn add(&mut self, rating: u8) {
        self.sum = self.sum.saturating_add(u64::from(rating));
        self.count = self.count.saturating_add(1);
        self.min = self.min.min(rating);
        self.max = self.max.max(rating);
    }
}

fn tally_by_sandwich(reviews: &[Review]) -> BTreeMap<u64, Tally> {
    let mut tallies: BTreeMap<u64, Tally> = BTreeMap::new();
    for review in reviews {
        tallies
            .entry(review.sandwich_id)
            .and_modify(|tally| tally.add(review.rating))
            .or_insert_with(|| Tally::new(review.rating));
    }
    tallies
}

impl Store {
    /// Revenue over one UTC day or an inclusive timestamp range.
    pub fn revenue(&self, query: &RevenueQuery) -> Result<RevenueReport> {
        let day = query.date.map(|at| at.date_naive());
        let range = match day {
            Some(date) => {
                let (start, end) = timestamp::day_bounds(date);
                // `day_bounds` is half-open; `DateRange` is inclusive.
                DateRange {
                    start_date: Some(start),
                    end_date: Some(end - chrono::Duration::nanoseconds(1)),
                }
            }
            None => DateRange {
                start_date: query.start_date,
                end_date: query.end_date,
            },
        };

        let orders: Vec<Order> = {
            let txn = self.read()?;
            fetch_all(&txn.open_table(ORDERS)?)?
        };
        let mut total_revenue = Money::ZERO;
        let mut order_count = 0_u64;
        for order in orders.iter().filter(|order| range.contains(order.order_date)) {
            total_revenue = total_revenue
                .checked_add(order.total_price)
                .ok_or_else(|| ShopError::Validation(String::from("revenue total is too large")))?;
            order_count += 1;
        }

        Ok(RevenueReport {
            total_revenue,
            order_count,
            date: day,
            start_date: if day.is_some() { None } else { query.start_date },
            end_date: if day.is_some() { None } else { query.end_date },
        })
    }

    /// The most ordered sandwiches, by number of order lines.
    pub fn popular_dishes(&self, limit: usize) -> Result<Vec<PopularDish>> {
        let txn = self.read()?;
        let details: Vec<OrderDetail> = fetch_all(&txn.open_table(ORDER_DETAILS)?)?;
        let sandwiches = txn.open_table(SANDWICHES)?;

        let mut counts: BTreeMap<u64, (u64, u64)> = BTreeMap::new();
        for detail in &details {
            let entry = counts.entry(detail.sandwich_id).or_insert((0, 0));
            entry.0 += 1;
            entry.1 = entry.1.saturating_add(detail.amount);
        }

        let mut dishes = Vec::with_capacity(counts.len());
        for (sandwich_id, (order_count, total_quantity)) in counts {
            let Some(sandwich) = fetch::<Sandwich>(&sandwiches, sandwich_id)? else {
                continue;
            };
            dishes.push(PopularDish {
                sandwich_id,
                sandwich_name: sandwich.sandwich_name,
                order_count,
                total_quantity,
            });
        }
        // BTreeMap iteration already gives ascending ids; the sort is stable.
        dishes.sort_by(|a, b| b.order_count.cmp(&a.order_count));
        dishes.truncate(limit);
        Ok(dishes)
    }

    /// Sandwiches whose average rating is at most `min_rating`.
    pub fn complaints(&self, min_rating: u8) -> Result<Vec<Complaint>> {
        let txn = self.read()?;
        let reviews: Vec<Review> = fetch_all(&txn.open_table(REVIEWS)?)?;
        let sandwiches = txn.open_table(SANDWICHES)?;

        let mut complaints = Vec::new();
        for (sandwich_id, tally) in tally_by_sandwich(&reviews) {
            if tally.sum > u64::from(min_rating).saturating_mul(tally.count) {
                continue;
            }
            let Some(sandwich) = fetch::<Sandwich>(&sandwiches, sandwich_id)? else {
                continue;
            };
            let Some(average_rating) = AverageRating::from_totals(tally.sum, tally.count) else {
                continue;
            };
            complaints.push(Complaint {
                sandwich_id,
                sandwich_name: sandwich.sandwich_name,
                average_rating,
                review_count: tally.count,
            });
        }
        Ok(complaints)
    }

    /// Rating summary for one sandwich.
    pub fn dish_ratings(&self, sandwich_id: u64) -> Result<DishRatings> {
        let txn = self.read()?;
        let sandwich: Sandwich = fetch(&txn.open_table(SANDWICHES)?, sandwich_id)?
            .ok_or_else(|| ShopError::NotFound(String::from("Sandwich not found")))?;

        let mut reviews: Vec<Review> = fetch_all(&txn.open_table(REVIEWS)?)?;
        reviews.retain(|review| review.sandwich_id == sandwich_id);
        let tally = tally_by_sandwich(&reviews).remove(&sandwich_id);

        Ok(DishRatings {
            sandwich_id,
            sandwich_name: sandwich.sandwich_name,
            average_rating: tally.and_then(|t| AverageRating::from_totals(t.sum, t.count)),
            review_count: tally.map_or(0, |t| t.count),
            min_rating: tally.map(|t| t.min),
            max_rating: tally.map(|t| t.max),
        })
    }
}
