//! Thresholding of relaxed scores and non-binary diagnostics.

use gridselect_config::{DiagnosticsConfig, RoundingConfig, TieBreak};
use gridselect_core::{Grid, NonBinaryPosition};

/// Rounds one score to a 0/1 decision.
pub fn decide(score: f64, rounding: &RoundingConfig) -> u8 {
    let selected = match rounding.tie_break {
        TieBreak::Exclude => score > rounding.cutoff,
        TieBreak::Include => score >= rounding.cutoff,
    };
    u8::from(selected)
}

/// Rounds every score in the grid.
pub fn round_scores(scores: &Grid<f64>, rounding: &RoundingConfig) -> Grid<u8> {
    scores.map(|&s| decide(s, rounding))
}

/// Cells whose score lies strictly inside the configured band, row-major.
///
/// `benefits` and `costs` must share the shape of `scores`.
pub fn non_binary_positions(
    scores: &Grid<f64>,
    benefits: &Grid<f64>,
    costs: &Grid<f64>,
    band: &DiagnosticsConfig,
) -> Vec<NonBinaryPosition> {
    scores
        .indexed()
        .zip(benefits.as_slice().iter().zip(costs.as_slice()))
        .filter(|((_, _, score), _)| {
            **score > band.non_binary_lower && **score < band.non_binary_upper
        })
        .map(|((row, col, &score), (&benefit, &cost))| NonBinaryPosition {
            row,
            col,
            score,
            benefit,
            cost,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<f64>>) -> Grid<f64> {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_strict_cutoff_by_default() {
        let rounding = RoundingConfig::default();
        assert_eq!(decide(0.501, &rounding), 1);
        assert_eq!(decide(0.5, &rounding), 0);
        assert_eq!(decide(0.499, &rounding), 0);
    }

    #[test]
    fn test_include_tie_break() {
        let rounding = RoundingConfig {
            tie_break: TieBreak::Include,
            ..RoundingConfig::default()
        };
        assert_eq!(decide(0.5, &rounding), 1);
        assert_eq!(decide(0.499, &rounding), 0);
    }

    #[test]
    fn test_round_scores_preserves_shape() {
        let scores = grid(vec![vec![1.0, 0.0, 0.7], vec![0.2, 0.5, 0.999]]);
        let decisions = round_scores(&scores, &RoundingConfig::default());
        assert_eq!(decisions.shape(), (2, 3));
        assert_eq!(decisions.as_slice(), &[1, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn test_non_binary_band_is_open() {
        let scores = grid(vec![vec![0.0001, 0.5, 0.99, 0.98]]);
        let benefits = grid(vec![vec![0.1, 0.2, 0.3, 0.4]]);
        let costs = grid(vec![vec![1.0, 2.0, 3.0, 4.0]]);

        let flagged =
            non_binary_positions(&scores, &benefits, &costs, &DiagnosticsConfig::default());

        assert_eq!(
            flagged,
            vec![
                NonBinaryPosition {
                    row: 0,
                    col: 1,
                    score: 0.5,
                    benefit: 0.2,
                    cost: 2.0
                },
                NonBinaryPosition {
                    row: 0,
                    col: 3,
                    score: 0.98,
                    benefit: 0.4,
                    cost: 4.0
                },
            ]
        );
    }

    #[test]
    fn test_integral_scores_have_no_diagnostics() {
        let scores = grid(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let other = Grid::filled(2, 2, 1.0);
        assert!(
            non_binary_positions(&scores, &other, &other, &DiagnosticsConfig::default())
                .is_empty()
        );
    }
}
