use super::{Review, ReviewSubmission, ReviewSummary};

/// Insert or update a review, keyed by reviewer identity.
///
/// If `existing` already holds a review by the submitting reviewer, its rating
/// and comment are replaced in place; its id, reviewer and display name are
/// kept. Otherwise a new review is appended, with an id obtained from
/// `new_id`, which is only called in that case.
///
/// The rating is taken as-is. Values outside 1..=5 are neither rejected nor
/// clamped.
pub fn upsert_review<UserId: PartialEq, ReviewId>(
    mut existing: Vec<Review<UserId, ReviewId>>,
    submission: ReviewSubmission<UserId>,
    new_id: impl FnOnce() -> ReviewId,
) -> ReviewSummary<UserId, ReviewId> {
    let ReviewSubmission {
        reviewer,
        rating,
        comment,
    } = submission;

    match existing
        .iter()
        .position(|review| review.user == reviewer.id)
    {
        Some(index) => {
            let review = &mut existing[index];
            review.rating = rating;
            review.comment = comment;
        }
        None => existing.push(Review {
            id: new_id(),
            user: reviewer.id,
            name: reviewer.name,
            rating,
            comment,
        }),
    }

    existing.into()
}

/// Remove the review with the given id.
///
/// A `review_id` that matches nothing is not an error; the reviews come back
/// unchanged. Removing the last review yields a mean rating of 0.
pub fn remove_review<UserId, ReviewId: PartialEq>(
    existing: Vec<Review<UserId, ReviewId>>,
    review_id: &ReviewId,
) -> ReviewSummary<UserId, ReviewId> {
    existing
        .into_iter()
        .filter(|review| &review.id != review_id)
        .collect::<Vec<_>>()
        .into()
}
