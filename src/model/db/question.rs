use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::QuestionId;

/// A poll question, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique ID.
    #[serde(rename = "_id")]
    pub id: QuestionId,
    /// Question text.
    pub question_text: String,
    /// When the question was published.
    pub published_at: DateTime<Utc>,
}

impl Question {
    /// Create a new question, published now.
    pub fn new(id: QuestionId, question_text: String) -> Self {
        Self {
            id,
            question_text,
            published_at: Utc::now(),
        }
    }
}
