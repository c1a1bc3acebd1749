//! Review Data

use std::ops::RangeInclusive;

use crate::{
    domain::{
        catalog::records::{CatalogItemUuid, ItemKind},
        reviews::errors::ReviewsServiceError,
    },
    validation::non_blank,
};

pub const RATING_RANGE: RangeInclusive<u8> = 1..=5;

/// New Review Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub item: CatalogItemUuid,
    pub item_kind: ItemKind,
    pub rating: i64,
    pub comment: String,
}

/// A review that passed validation, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidReview {
    pub item: CatalogItemUuid,
    pub item_kind: ItemKind,
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    pub(crate) fn validated(self) -> Result<ValidReview, ReviewsServiceError> {
        let rating = u8::try_from(self.rating)
            .ok()
            .filter(|rating| RATING_RANGE.contains(rating))
            .ok_or(ReviewsServiceError::InvalidRating)?;

        let comment = non_blank(&self.comment)
            .ok_or(ReviewsServiceError::MissingComment)?
            .to_string();

        Ok(ValidReview {
            item: self.item,
            item_kind: self.item_kind,
            rating,
            comment,
        })
    }
}
