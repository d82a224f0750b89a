//! Customer reviews of sandwiches.

use super::optional_text;
use crate::error::{Result, ShopError};
use crate::model::{Order, Review, Sandwich};
use crate::schema::{ReviewCreate, ReviewFilter, ReviewResponse, ReviewUpdate};
use crate::storage::Store;
use crate::storage::tables::{
    ORDERS, REVIEWS, SANDWICHES, fetch, fetch_all, fetch_required, next_id, put, take,
};
use chrono::Utc;
use redb::ReadableTable;
use std::collections::BTreeMap;

const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

fn require_rating(rating: u8) -> Result<u8> {
    if !RATING_RANGE.contains(&rating) {
        return Err(ShopError::Validation(String::from(
            "rating must be between 1 and 5",
        )));
    }
    Ok(rating)
}

fn embed(
    sandwiches: &impl ReadableTable<u64, &'static [u8]>,
    review: Review,
) -> Result<ReviewResponse> {
    let sandwich: Option<Sandwich> = fetch(sandwiches, review.sandwich_id)?;
    Ok(ReviewResponse { review, sandwich })
}

impl Store {
    pub fn create_review(&self, request: ReviewCreate) -> Result<ReviewResponse> {
        let rating = require_rating(request.rating)?;

        let txn = self.write()?;
        let response = {
            let order: Option<Order> = fetch(&txn.open_table(ORDERS)?, request.order_id)?;
            if order.is_none() {
                return Err(ShopError::NotFound(format!(
                    "Order ID {} not found",
                    request.order_id
                )));
            }
            let sandwich: Sandwich = fetch(&txn.open_table(SANDWICHES)?, request.sandwich_id)?
                .ok_or_else(|| {
                    ShopError::NotFound(format!("Sandwich ID {} not found", request.sandwich_id))
                })?;

            let review = Review {
                id: next_id(&txn, REVIEWS)?,
                order_id: request.order_id,
                sandwich_id: request.sandwich_id,
                rating,
                review_text: optional_text(request.review_text),
                created_at: Utc::now(),
            };
            put(&mut txn.open_table(REVIEWS)?, &review)?;
            ReviewResponse {
                review,
                sandwich: Some(sandwich),
            }
        };
        txn.commit()?;

        tracing::debug!(
            id = response.review.id,
            sandwich_id = response.review.sandwich_id,
            rating = response.review.rating,
            "created review"
        );
        Ok(response)
    }

    pub fn list_reviews(&self, filter: &ReviewFilter) -> Result<Vec<ReviewResponse>> {
        let txn = self.read()?;
        let mut reviews: Vec<Review> = fetch_all(&txn.open_table(REVIEWS)?)?;
        reviews.retain(|review| {
            filter.sandwich_id.is_none_or(|id| review.sandwich_id == id)
                && filter.order_id.is_none_or(|id| review.order_id == id)
        });

        let sandwiches: BTreeMap<u64, Sandwich> =
            fetch_all::<Sandwich>(&txn.open_table(SANDWICHES)?)?
                .into_iter()
                .map(|sandwich| (sandwich.id, sandwich))
                .collect();
        Ok(reviews
            .into_iter()
            .map(|review| ReviewResponse {
                sandwich: sandwiches.get(&review.sandwich_id).cloned(),
                review,
            })
            .collect())
    }

    pub fn get_review(&self, id: u64) -> Result<ReviewResponse> {
        let txn = self.read()?;
        let review: Review = fetch_required(&txn.open_table(REVIEWS)?, id)?;
        embed(&txn.open_table(SANDWICHES)?, review)
    }

    pub fn update_review(&self, id: u64, request: ReviewUpdate) -> Result<ReviewResponse> {
        let txn = self.write()?;
        let response = {
            let mut table = txn.open_table(REVIEWS)?;
            let mut review: Review = fetch_required(&table, id)?;
            if let Some(rating) = request.rating {
                review.rating = require_rating(rating)?;
            }
            if let Some(text) = request.review_text {
                review.review_text = optional_text(text);
            }
            put(&mut table, &review)?;
            embed(&txn.open_table(SANDWICHES)?, review)?
        };
        txn.commit()?;

        tracing::debug!(id, "updated review");
        Ok(response)
    }

    pub fn delete_review(&self, id: u64) -> Result<()> {
        let txn = self.write()?;
        let _: Review = take(&mut txn.open_table(REVIEWS)?, id)?;
        txn.commit()?;

        tracing::debug!(id, "deleted review");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::schema::{OrderCreate, OrderLine, SandwichCreate};
    use crate::storage::tests::temp_store;

    fn setup(store: &Store) -> (u64, u64) {
        let sandwich = store
            .create_sandwich(SandwichCreate {
                sandwich_name: String::from("Veggie Delight"),
                price: Money::from_cents(699),
                category: Some(String::from("vegetarian")),
                description: None,
                is_available: true,
            })
            .unwrap();
        let order = store
            .place_order(OrderCreate::takeout("Ada", vec![OrderLine::new(sandwich.id, 1)]))
            .unwrap();
        (order.order.id, sandwich.id)
    }

    fn review(order_id: u64, sandwich_id: u64, rating: u8) -> ReviewCreate {
        ReviewCreate {
            order_id,
            sandwich_id,
            rating,
            review_text: Some(String::from("Tasty")),
        }
    }

    #[test]
    fn rating_must_be_one_to_five() {
        let (_dir, store) = temp_store();
        let (order_id, sandwich_id) = setup(&store);
        for rating in [0, 6] {
            assert!(matches!(
                store.create_review(review(order_id, sandwich_id, rating)),
                Err(ShopError::Validation(_))
            ));
        }
        assert!(store.create_review(review(order_id, sandwich_id, 5)).is_ok());
    }

    #[test]
    fn response_embeds_sandwich() {
        let (_dir, store) = temp_store();
        let (order_id, sandwich_id) = setup(&store);
        let created = store.create_review(review(order_id, sandwich_id, 4)).unwrap();
        let fetched = store.get_review(created.review.id).unwrap();
        assert_eq!(
            fetched.sandwich.map(|s| s.sandwich_name),
            Some(String::from("Veggie Delight"))
        );
    }

    #[test]
    fn filter_and_update() {
        let (_dir, store) = temp_store();
        let (order_id, sandwich_id) = setup(&store);
        let created = store.create_review(review(order_id, sandwich_id, 2)).unwrap();

        let by_sandwich = store
            .list_reviews(&ReviewFilter {
                sandwich_id: Some(sandwich_id),
                order_id: None,
            })
            .unwrap();
        assert_eq!(by_sandwich.len(), 1);
        let other = store
            .list_reviews(&ReviewFilter {
                sandwich_id: None,
                order_id: Some(order_id + 1),
            })
            .unwrap();
        assert!(other.is_empty());

        let update: ReviewUpdate =
            serde_json::from_str(r#"{"rating": 3, "review_text": null}"#).unwrap();
        let updated = store.update_review(created.review.id, update).unwrap();
        assert_eq!(updated.review.rating, 3);
        assert_eq!(updated.review.review_text, None);
    }

    #[test]
    fn order_delete_cascades_reviews() {
        let (_dir, store) = temp_store();
        let (order_id, sandwich_id) = setup(&store);
        store.create_review(review(order_id, sandwich_id, 5)).unwrap();
        store.delete_order(order_id).unwrap();
        assert_eq!(store.status().unwrap().reviews, 0);
    }

    #[test]
    fn missing_references() {
        let (_dir, store) = temp_store();
        let (order_id, _) = setup(&store);
        let err = store.create_review(review(order_id, 77, 3)).unwrap_err();
        assert_eq!(err.to_string(), "Sandwich ID 77 not found");
        let err = store.create_review(review(77, 1, 3)).unwrap_err();
        assert_eq!(err.to_string(), "Order ID 77 not found");
    }
}
