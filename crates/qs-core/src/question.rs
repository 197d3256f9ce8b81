use serde::{Deserialize, Serialize};

/// A single quiz question with up to three answers revealed in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text read out to the players.
    pub prompt: String,
    /// The primary answer.
    pub answer: String,
    /// Optional second answer, revealed after the first.
    pub answer2: Option<String>,
    /// Optional third answer, revealed after the second.
    pub answer3: Option<String>,
    /// Points awarded (or deducted) for this question. Always positive.
    pub points: u32,
    /// Image shown with the prompt.
    pub image: Option<String>,
    /// Image shown with the primary answer.
    pub image_answer: Option<String>,
    /// Image shown with the second answer.
    pub image_answer2: Option<String>,
    /// Image shown with the third answer.
    pub image_answer3: Option<String>,
}

impl Question {
    /// Create a question with a single answer and no images.
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>, points: u32) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
            answer2: None,
            answer3: None,
            points,
            image: None,
            image_answer: None,
            image_answer2: None,
            image_answer3: None,
        }
    }

    /// The answers that are present, in reveal order.
    ///
    /// A third answer is only reachable through the second, so a question
    /// with `answer3` but no `answer2` yields just the primary answer.
    pub fn answers(&self) -> Vec<&str> {
        let mut out = vec![self.answer.as_str()];
        if let Some(a2) = &self.answer2 {
            out.push(a2);
            if let Some(a3) = &self.answer3 {
                out.push(a3);
            }
        }
        out
    }

    /// The image attached to the `n`th answer (0-based), if any.
    pub fn answer_image(&self, n: usize) -> Option<&str> {
        match n {
            0 => self.image_answer.as_deref(),
            1 => self.image_answer2.as_deref(),
            2 => self.image_answer3.as_deref(),
            _ => None,
        }
    }
}
