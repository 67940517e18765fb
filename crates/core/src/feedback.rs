//! Feedback validation rules.
//!
//! Feedback is append-only and keyed to a swap request: the giver and
//! receiver must be the two distinct parties of that request, and ratings
//! are integer stars in a fixed range.

use crate::types::DbId;

/// Minimum allowed rating (inclusive).
pub const RATING_MIN: i32 = 1;

/// Maximum allowed rating (inclusive).
pub const RATING_MAX: i32 = 5;

/// Validate that a rating is an integer star count in `1..=5`.
pub fn validate_rating(rating: i32) -> Result<(), String> {
    if (RATING_MIN..=RATING_MAX).contains(&rating) {
        Ok(())
    } else {
        Err(format!(
            "Rating must be between {RATING_MIN} and {RATING_MAX}"
        ))
    }
}

/// Validate that giver and receiver are the two distinct parties of the
/// request with the given requester/requested pair.
pub fn validate_parties(
    requester_id: DbId,
    requested_id: DbId,
    giver_id: DbId,
    receiver_id: DbId,
) -> Result<(), String> {
    if giver_id == receiver_id {
        return Err("Feedback giver and receiver must be different users".to_string());
    }
    let is_party = |id: DbId| id == requester_id || id == requested_id;
    if !is_party(giver_id) {
        return Err("Feedback giver must be a party to the swap request".to_string());
    }
    if !is_party(receiver_id) {
        return Err("Feedback receiver must be a party to the swap request".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratings_in_range_accepted() {
        for rating in RATING_MIN..=RATING_MAX {
            assert!(validate_rating(rating).is_ok());
        }
    }

    #[test]
    fn test_ratings_out_of_range_rejected() {
        for rating in [0, 6, -1, 100] {
            let err = validate_rating(rating).unwrap_err();
            assert!(err.contains("between 1 and 5"));
        }
    }

    /// Feedback is valid only between the two distinct parties.
    #[test]
    fn test_party_constraint() {
        // Alice (1) requested from Bob (2); Carol (3) is a stranger.
        assert!(validate_parties(1, 2, 1, 2).is_ok());
        assert!(validate_parties(1, 2, 2, 1).is_ok());

        assert!(validate_parties(1, 2, 1, 1).is_err(), "giver == receiver");
        assert!(validate_parties(1, 2, 3, 2).is_err(), "giver not a party");
        assert!(validate_parties(1, 2, 1, 3).is_err(), "receiver not a party");
        assert!(validate_parties(1, 2, 3, 4).is_err(), "neither a party");
    }
}
