use serde::{Deserialize, Serialize};

use crate::model::common::{ChoiceId, QuestionId};

/// One selectable choice of a poll question, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Unique ID.
    #[serde(rename = "_id")]
    pub id: ChoiceId,
    /// The question this choice belongs to.
    pub question_id: QuestionId,
    /// Choice text.
    pub choice_text: String,
    /// Number of votes cast for this choice. Kept equal to the number of
    /// vote records referencing it; both are written in one transaction.
    pub votes: u64,
}

impl Choice {
    /// Create a fresh choice with no votes.
    pub fn new(id: ChoiceId, question_id: QuestionId, choice_text: String) -> Self {
        Self {
            id,
            question_id,
            choice_text,
            votes: 0,
        }
    }
}
