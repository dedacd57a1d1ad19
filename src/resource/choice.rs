use rocket::serde::json::{serde_json::Map, Value};

use crate::model::{
    common::{ChoiceId, QuestionId},
    db::Choice,
};

use super::{Resource, QUESTIONS_URI};

/// Resource view of a single choice.
#[derive(Clone)]
pub struct ChoiceResource {
    choice: Choice,
}

impl ChoiceResource {
    pub fn new(choice: Choice) -> Self {
        Self { choice }
    }

    /// URI of the choice with the given ids.
    pub fn uri_for(question_id: QuestionId, id: ChoiceId) -> String {
        format!("{QUESTIONS_URI}/{question_id}/choices/{id}")
    }
}

impl Resource for ChoiceResource {
    fn uri(&self) -> String {
        Self::uri_for(self.choice.question_id, self.choice.id)
    }

    fn attributes(&self) -> Map<String, Value> {
        let mut attributes = Map::new();
        attributes.insert(
            "choice".to_string(),
            Value::String(self.choice.choice_text.clone()),
        );
        attributes.insert("votes".to_string(), Value::from(self.choice.votes));
        attributes
    }
}
