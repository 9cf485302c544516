//! Display-rating aggregation over a product's reviews.

use crate::catalog::Review;

/// Returns the unrounded mean rating of `reviews`, or 0.0 when there are
/// none ("no reviews" is a normal state, not an error).
///
/// Star rounding for display is a presentation concern and happens at the
/// caller.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
    total as f64 / reviews.len() as f64
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn review(rating: i16) -> Review {
        Review {
            id: Uuid::new_v4(),
            author: "Jo".to_string(),
            comment: None,
            rating,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_reviews_average_to_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn single_review_averages_to_its_rating() {
        assert_eq!(average_rating(&[review(4)]), 4.0);
    }

    #[test]
    fn mean_is_unrounded() {
        let reviews = vec![review(4), review(5)];
        assert_eq!(average_rating(&reviews), 4.5);
    }

    #[test]
    fn non_empty_average_stays_within_star_bounds() {
        for ratings in [vec![1, 1, 1], vec![5, 5], vec![1, 3, 5, 2]] {
            let reviews: Vec<Review> = ratings.into_iter().map(review).collect();
            let avg = average_rating(&reviews);
            assert!((1.0..=5.0).contains(&avg), "average {avg} out of bounds");
        }
    }
}
