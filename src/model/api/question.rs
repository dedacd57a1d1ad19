use rocket::serde::json::Value;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{
    common::{ChoiceId, QuestionId},
    db::{Choice, Question},
};

/// A question creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    /// Question text.
    pub question: String,
    /// Texts of the choices offered, in presentation order.
    pub choices: Vec<String>,
}

impl QuestionSpec {
    /// Validate a raw JSON body against the required shape.
    ///
    /// The shapes we promise a 400 for are finer-grained than a typed
    /// deserialise can report, so the checks are explicit: `question` must
    /// be a non-empty string and `choices` a list of strings. An empty
    /// list is accepted.
    pub fn from_json(body: &Value) -> Result<Self> {
        let object = body
            .as_object()
            .ok_or_else(|| Error::bad_request("expected a JSON object"))?;
        let question = object
            .get("question")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| Error::bad_request("`question` must be a non-empty string"))?;
        let choices = object
            .get("choices")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::bad_request("`choices` must be a list"))?
            .iter()
            .map(|choice| {
                choice
                    .as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| Error::bad_request("`choices` entries must be strings"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            question: question.to_owned(),
            choices,
        })
    }

    /// Convert this spec into records with the given pre-allocated ids.
    ///
    /// `first_choice_id` must start a contiguous reserved block of at least
    /// `self.choices.len()` ids.
    pub fn into_records(
        self,
        question_id: QuestionId,
        first_choice_id: ChoiceId,
    ) -> (Question, Vec<Choice>) {
        let question = Question::new(question_id, self.question);
        let choices = self
            .choices
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let choice_id = first_choice_id + ChoiceId::try_from(i).expect("usize to u32");
                Choice::new(choice_id, question_id, text)
            })
            .collect();
        (question, choices)
    }
}
