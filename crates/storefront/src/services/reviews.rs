//! Product review service.
//!
//! Reviews persist as one map keyed by product id. Ratings are whole stars
//! 1 to 5; the average is rounded to one decimal for display.

use std::collections::BTreeMap;

use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;
use thiserror::Error;

use ferreteria_core::{ProductId, ReviewId};

use crate::models::{NewReview, Review};
use crate::storage::{Store, StorageError, keys};

/// Author name length bounds.
const AUTHOR_LENGTH: std::ops::RangeInclusive<usize> = 2..=100;
/// Comment length bounds.
const COMMENT_LENGTH: std::ops::RangeInclusive<usize> = 5..=1000;

type ReviewMap = BTreeMap<String, Vec<Review>>;

/// Errors from review operations.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The product has no reviews to operate on.
    #[error("product {0} has no reviews")]
    NoReviews(ProductId),

    /// Input failed validation.
    #[error("invalid review: {0}")]
    Validation(String),

    /// Persistence failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A product's rating summarized for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingDisplay {
    /// Average rounded to one decimal, 0.0 when unreviewed.
    pub average: f64,
    /// `"4.7/5.0"`, or a placeholder when unreviewed.
    pub text: String,
    /// Filled stars.
    pub full: u8,
    /// Whether a half star follows the filled ones.
    pub half: bool,
    /// Remaining empty stars out of five.
    pub empty: u8,
}

/// Review service over a [`Store`].
pub struct ReviewService<'a> {
    store: &'a Store,
}

impl<'a> ReviewService<'a> {
    /// Create a review service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Reviews for a product, newest first.
    #[must_use]
    pub fn list(&self, product_id: &ProductId) -> Vec<Review> {
        let mut reviews = self
            .map()
            .remove(product_id.as_str())
            .unwrap_or_default();
        reviews.sort_by(|a, b| b.date.cmp(&a.date));
        reviews
    }

    /// Add a review to a product.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Validation` for bad input,
    /// `ReviewError::Storage` if the write fails.
    pub fn add(&self, product_id: &ProductId, input: NewReview) -> Result<Review, ReviewError> {
        let author = input.author.trim();
        if !AUTHOR_LENGTH.contains(&author.chars().count()) {
            return Err(ReviewError::Validation(
                "author name must be 2 to 100 characters".to_owned(),
            ));
        }
        let comment = input.comment.trim();
        if !COMMENT_LENGTH.contains(&comment.chars().count()) {
            return Err(ReviewError::Validation(
                "comment must be 5 to 1000 characters".to_owned(),
            ));
        }
        let rating = u8::try_from(input.rating)
            .ok()
            .filter(|r| (1..=5).contains(r))
            .ok_or_else(|| {
                ReviewError::Validation("rating must be between 1 and 5".to_owned())
            })?;

        let review = Review {
            id: generate_review_id(),
            product_id: product_id.clone(),
            author: author.to_owned(),
            comment: comment.to_owned(),
            rating,
            date: Utc::now(),
        };

        let mut map = self.map();
        map.entry(product_id.as_str().to_owned())
            .or_default()
            .push(review.clone());
        self.store.put(keys::REVIEWS, &map)?;

        tracing::debug!(product = %product_id, rating, "review added");
        Ok(review)
    }

    /// Delete one review from a product.
    ///
    /// Returns whether the review existed.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::NoReviews` if the product has no review entry
    /// at all, `ReviewError::Storage` if the write fails.
    pub fn delete(
        &self,
        product_id: &ProductId,
        review_id: &ReviewId,
    ) -> Result<bool, ReviewError> {
        let mut map = self.map();
        let reviews = map
            .get_mut(product_id.as_str())
            .ok_or_else(|| ReviewError::NoReviews(product_id.clone()))?;

        let before = reviews.len();
        reviews.retain(|r| &r.id != review_id);
        let removed = reviews.len() != before;
        if removed {
            self.store.put(keys::REVIEWS, &map)?;
        }
        Ok(removed)
    }

    /// Average rating rounded to one decimal, 0.0 when unreviewed.
    #[must_use]
    pub fn average_rating(&self, product_id: &ProductId) -> f64 {
        let reviews = self.list(product_id);
        if reviews.is_empty() {
            return 0.0;
        }
        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        #[allow(clippy::cast_precision_loss)]
        let average = f64::from(sum) / reviews.len() as f64;
        (average * 10.0).round() / 10.0
    }

    /// Number of reviews on a product.
    #[must_use]
    pub fn count(&self, product_id: &ProductId) -> usize {
        self.map()
            .get(product_id.as_str())
            .map_or(0, Vec::len)
    }

    /// Star breakdown and label for a product's average.
    #[must_use]
    pub fn rating_display(&self, product_id: &ProductId) -> RatingDisplay {
        rating_display(self.average_rating(product_id))
    }

    fn map(&self) -> ReviewMap {
        self.store.get(keys::REVIEWS)
    }
}

/// Break an average into full, half and empty stars out of five.
#[must_use]
pub fn rating_display(average: f64) -> RatingDisplay {
    if average <= 0.0 {
        return RatingDisplay {
            average: 0.0,
            text: "Sin calificaciones".to_owned(),
            full: 0,
            half: false,
            empty: 5,
        };
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let full = average.floor() as u8;
    let half = average - f64::from(full) >= 0.5;
    let empty = 5 - full - u8::from(half);
    RatingDisplay {
        average,
        text: format!("{average:.1}/5.0"),
        full,
        half,
        empty,
    }
}

/// Review ids look like `op-<millis>-<7 alphanumeric>`, matching the ids
/// already present in stores written by earlier versions.
fn generate_review_id() -> ReviewId {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(7)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    ReviewId::new(format!("op-{}-{suffix}", Utc::now().timestamp_millis()))
}
