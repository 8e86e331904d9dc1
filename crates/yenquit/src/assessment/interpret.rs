use super::domain::{DependenceLevel, FagerstromScore, Modality};
use crate::error::InvalidInputError;

pub fn dependence_level(score: FagerstromScore, modality: Modality) -> DependenceLevel {
    match modality {
        Modality::Smoked => match score.value() {
            0..=2 => DependenceLevel::VeryLow,
            3..=4 => DependenceLevel::Low,
            5 => DependenceLevel::Medium,
            6..=7 => DependenceLevel::High,
            _ => DependenceLevel::VeryHigh,
        },
        Modality::Smokeless => match score.value() {
            0..=2 => DependenceLevel::Low,
            3..=5 => DependenceLevel::Moderate,
            _ => DependenceLevel::High,
        },
    }
}

/// Dependence label for a raw Fagerström total.
///
/// Scores outside 0..=10 are rejected rather than falling into the top bucket.
pub fn interpret(score: i64, modality: Modality) -> Result<&'static str, InvalidInputError> {
    let score = FagerstromScore::new(score)?;
    Ok(dependence_level(score, modality).label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoked_thresholds() {
        let expected = [
            (0, "Very Low Dependence"),
            (2, "Very Low Dependence"),
            (3, "Low Dependence"),
            (4, "Low Dependence"),
            (5, "Medium Dependence"),
            (6, "High Dependence"),
            (7, "High Dependence"),
            (8, "Very High Dependence"),
            (10, "Very High Dependence"),
        ];
        for (score, label) in expected {
            assert_eq!(interpret(score, Modality::Smoked), Ok(label), "score {score}");
        }
    }

    #[test]
    fn smokeless_thresholds() {
        let expected = [
            (0, "Low Dependence"),
            (2, "Low Dependence"),
            (3, "Moderate Dependence"),
            (5, "Moderate Dependence"),
            (6, "High Dependence"),
            (10, "High Dependence"),
        ];
        for (score, label) in expected {
            assert_eq!(
                interpret(score, Modality::Smokeless),
                Ok(label),
                "score {score}"
            );
        }
    }

    #[test]
    fn out_of_range_scores_fail() {
        assert_eq!(
            interpret(11, Modality::Smoked),
            Err(InvalidInputError::ScoreOutOfRange(11))
        );
        assert!(interpret(-3, Modality::Smokeless).is_err());
    }
}
