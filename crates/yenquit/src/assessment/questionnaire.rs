use serde::{Deserialize, Serialize};

use super::domain::{FagerstromScore, Modality};
use crate::error::InvalidInputError;

/// Answer option as received from content management.
///
/// Older question sets store bare strings, newer ones `{ "text", "score" }`
/// objects. Both shapes collapse into this enum on ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionOption {
    Scored { text: String, score: u8 },
    PlainText(String),
}

impl QuestionOption {
    pub fn scored(text: &str, score: u8) -> Self {
        Self::Scored {
            text: text.to_string(),
            score,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Scored { text, .. } => text,
            Self::PlainText(text) => text,
        }
    }

    /// Plain-text options carry no weight.
    pub fn score(&self) -> u8 {
        match self {
            Self::Scored { score, .. } => *score,
            Self::PlainText(_) => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FagerstromQuestion {
    pub prompt: String,
    pub options: Vec<QuestionOption>,
}

impl FagerstromQuestion {
    fn new(prompt: &str, options: &[(&str, u8)]) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options
                .iter()
                .map(|(text, score)| QuestionOption::scored(text, *score))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub modality: Modality,
    pub questions: Vec<FagerstromQuestion>,
}

impl Questionnaire {
    pub fn standard(modality: Modality) -> Self {
        match modality {
            Modality::Smoked => Self::smoked(),
            Modality::Smokeless => Self::smokeless(),
        }
    }

    fn smoked() -> Self {
        let questions = vec![
            FagerstromQuestion::new(
                "How soon after you wake up do you smoke your first cigarette?",
                &[
                    ("Within 5 minutes", 3),
                    ("6-30 minutes", 2),
                    ("31-60 minutes", 1),
                    ("After 60 minutes", 0),
                ],
            ),
            FagerstromQuestion::new(
                "Do you find it difficult to refrain from smoking in places where it is forbidden?",
                &[("Yes", 1), ("No", 0)],
            ),
            FagerstromQuestion::new(
                "Which cigarette would you hate most to give up?",
                &[("The first one in the morning", 1), ("Any other", 0)],
            ),
            FagerstromQuestion::new(
                "How many cigarettes per day do you smoke?",
                &[
                    ("10 or less", 0),
                    ("11-20", 1),
                    ("21-30", 2),
                    ("31 or more", 3),
                ],
            ),
            FagerstromQuestion::new(
                "Do you smoke more frequently during the first hours after waking than during the rest of the day?",
                &[("Yes", 1), ("No", 0)],
            ),
            FagerstromQuestion::new(
                "Do you smoke if you are so ill that you are in bed most of the day?",
                &[("Yes", 1), ("No", 0)],
            ),
        ];

        Self {
            modality: Modality::Smoked,
            questions,
        }
    }

    fn smokeless() -> Self {
        let questions = vec![
            FagerstromQuestion::new(
                "How soon after you wake up do you place your first dip?",
                &[
                    ("Within 5 minutes", 3),
                    ("6-30 minutes", 2),
                    ("31-60 minutes", 1),
                    ("After 60 minutes", 0),
                ],
            ),
            FagerstromQuestion::new(
                "How often do you intentionally swallow tobacco juice?",
                &[("Always", 2), ("Sometimes", 1), ("Never", 0)],
            ),
            FagerstromQuestion::new(
                "Which chew would you hate most to give up?",
                &[("The first one in the morning", 1), ("Any other", 0)],
            ),
            FagerstromQuestion::new(
                "How many cans or pouches do you use per week?",
                &[("More than 3", 2), ("2-3", 1), ("1", 0)],
            ),
            FagerstromQuestion::new(
                "Do you chew more frequently during the first hours after waking than during the rest of the day?",
                &[("Yes", 1), ("No", 0)],
            ),
            FagerstromQuestion::new(
                "Do you chew if you are so ill that you are in bed most of the day?",
                &[("Yes", 1), ("No", 0)],
            ),
        ];

        Self {
            modality: Modality::Smokeless,
            questions,
        }
    }

    /// Sums the selected option of every question into a validated score.
    ///
    /// `answers[i]` is the option index chosen for question `i`; `None` means unanswered.
    pub fn total_score(
        &self,
        answers: &[Option<usize>],
    ) -> Result<FagerstromScore, InvalidInputError> {
        if answers.len() != self.questions.len() {
            return Err(InvalidInputError::AnswerCountMismatch {
                answers: answers.len(),
                questions: self.questions.len(),
            });
        }

        let mut total: i64 = 0;
        for (index, (question, answer)) in self.questions.iter().zip(answers).enumerate() {
            let number = index + 1;
            let selected = answer.ok_or(InvalidInputError::MissingAnswer(number))?;
            let option = question
                .options
                .get(selected)
                .ok_or(InvalidInputError::UnknownOption {
                    question: number,
                    option: selected,
                })?;
            total += i64::from(option.score());
        }

        FagerstromScore::new(total)
    }
}
