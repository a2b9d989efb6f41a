use super::competitor::{expected_score, UpdateParams};
use super::score::SetScore;
use crate::errors::{RatingError, RatingResult};

/// Ratings two competitors would have after a hypothetical set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub winner_before: f64,
    pub winner_after: f64,
    pub loser_before: f64,
    pub loser_after: f64,
}

/// Project a set result without touching either competitor.
pub fn project(
    winner_rating: f64,
    loser_rating: f64,
    score: &str,
    params: UpdateParams,
) -> RatingResult<Projection> {
    let set = SetScore::parse(score).ok_or_else(|| RatingError::UnrecognizedScore {
        score: score.to_string(),
    })?;

    let winner_expected = expected_score(winner_rating, loser_rating);
    let loser_expected = expected_score(loser_rating, winner_rating);

    Ok(Projection {
        winner_before: winner_rating,
        winner_after: winner_rating
            + params.k_factor * (set.category.winner_outcome() - winner_expected),
        loser_before: loser_rating,
        loser_after: loser_rating
            + params.k_factor * (set.category.loser_outcome() - loser_expected),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_matches_live_update() {
        let p = project(1200.0, 1200.0, "2-0", UpdateParams::default()).unwrap();
        assert!((p.winner_after - 1216.0).abs() < 1e-9);
        assert!((p.loser_after - 1184.0).abs() < 1e-9);
    }

    #[test]
    fn test_upset_moves_more_than_expected_win() {
        let upset = project(1100.0, 1300.0, "3-1", UpdateParams::default()).unwrap();
        let expected = project(1300.0, 1100.0, "3-1", UpdateParams::default()).unwrap();
        assert!(upset.winner_after - upset.winner_before > expected.winner_after - expected.winner_before);
    }

    #[test]
    fn test_rejects_unknown_score() {
        let err = project(1200.0, 1200.0, "4-4", UpdateParams::default()).unwrap_err();
        assert_eq!(err, RatingError::UnrecognizedScore { score: "4-4".to_string() });
    }
}
