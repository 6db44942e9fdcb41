use super::ValidationError;

/// A single reviewer's rating and comment on a product.
///
/// A product holds at most one review per reviewer. The `id` is assigned when
/// the review is first created and is what a deletion refers to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Review<UserId, ReviewId> {
    /// The identifier of this review
    pub id: ReviewId,
    /// The reviewer who wrote it
    pub user: UserId,
    /// The reviewer's display name at the time of the first submission
    pub name: String,
    /// The rating, nominally in 1..=5 (not enforced)
    pub rating: f64,
    /// Free-text comment
    pub comment: String,
}

/// The authenticated identity of a would-be reviewer.
#[derive(Debug, Clone, PartialEq)]
pub struct Reviewer<UserId> {
    /// The reviewer's identifier
    pub id: UserId,
    /// The reviewer's display name
    pub name: String,
}

/// An incoming review, prior to being merged into a product's reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSubmission<UserId> {
    /// Who is submitting the review
    pub reviewer: Reviewer<UserId>,
    /// The submitted rating
    pub rating: f64,
    /// The submitted comment
    pub comment: String,
}

impl<UserId> ReviewSubmission<UserId> {
    /// Check that the submission can be aggregated and stored.
    ///
    /// Any finite rating is accepted; the nominal 1..=5 range is left to
    /// clients.
    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.rating.is_finite() {
            Ok(self)
        } else {
            Err(ValidationError::Rating)
        }
    }
}

/// A product's reviews together with the values derived from them.
///
/// `num_of_reviews` always equals `reviews.len()` and `ratings` is the mean
/// of all review ratings, or 0 if there are none. The only way to obtain a
/// summary is from a list of reviews, so the derived values cannot drift.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSummary<UserId, ReviewId> {
    reviews: Vec<Review<UserId, ReviewId>>,
    num_of_reviews: u32,
    ratings: f64,
}

impl<UserId, ReviewId> ReviewSummary<UserId, ReviewId> {
    /// The reviews
    pub fn reviews(&self) -> &[Review<UserId, ReviewId>] {
        &self.reviews
    }

    /// The number of reviews
    pub fn num_of_reviews(&self) -> u32 {
        self.num_of_reviews
    }

    /// The mean rating
    pub fn ratings(&self) -> f64 {
        self.ratings
    }

    /// Take ownership of the reviews
    pub fn into_reviews(self) -> Vec<Review<UserId, ReviewId>> {
        self.reviews
    }
}

impl<UserId, ReviewId> From<Vec<Review<UserId, ReviewId>>> for ReviewSummary<UserId, ReviewId> {
    fn from(reviews: Vec<Review<UserId, ReviewId>>) -> Self {
        let num_of_reviews = reviews.len() as u32;
        let ratings = if reviews.is_empty() {
            0.0
        } else {
            let n = reviews.len() as f64;
            let mean = reviews.iter().map(|review| review.rating).sum::<f64>() / n;
            if mean.is_finite() {
                mean
            } else {
                // the plain sum overflowed
                reviews.iter().map(|review| review.rating / n).sum()
            }
        };
        Self {
            reviews,
            num_of_reviews,
            ratings,
        }
    }
}

impl<UserId, ReviewId> Default for ReviewSummary<UserId, ReviewId> {
    fn default() -> Self {
        Vec::new().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: u32, rating: f64) -> Review<u32, u32> {
        Review {
            id,
            user: id,
            name: format!("user {id}"),
            rating,
            comment: String::new(),
        }
    }

    fn submission(rating: f64) -> ReviewSubmission<u32> {
        ReviewSubmission {
            reviewer: Reviewer {
                id: 1,
                name: "Ada".to_owned(),
            },
            rating,
            comment: String::new(),
        }
    }

    #[test]
    fn test_summary_mean() {
        let summary = ReviewSummary::from(vec![review(1, 4.0), review(2, 5.0)]);
        assert_eq!(summary.num_of_reviews(), 2);
        assert_eq!(summary.ratings(), 4.5);

        let empty = ReviewSummary::<u32, u32>::default();
        assert_eq!(empty.num_of_reviews(), 0);
        assert_eq!(empty.ratings(), 0.0);
    }

    #[test]
    fn test_summary_mean_of_huge_ratings() {
        let summary = ReviewSummary::from(vec![review(1, f64::MAX), review(2, f64::MAX)]);
        assert_eq!(summary.ratings(), f64::MAX);
    }

    #[test]
    fn test_validate_rating() {
        assert!(submission(-3.5).validate().is_ok());
        assert!(submission(f64::MAX).validate().is_ok());
        for rating in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(submission(rating).validate(), Err(ValidationError::Rating));
        }
    }
}
