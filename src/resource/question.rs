use rocket::serde::json::{serde_json::Map, Value};

use crate::model::{
    common::QuestionId,
    db::{Choice, Question},
};

use super::{ChoiceResource, Collection, Embedding, Relation, Resource};

/// URI of the question collection.
pub const QUESTIONS_URI: &str = "/questions";

/// Resource view of a single question and its choices.
#[derive(Clone)]
pub struct QuestionResource {
    question: Question,
    choices: Vec<Choice>,
}

impl QuestionResource {
    pub fn new(question: Question, choices: Vec<Choice>) -> Self {
        Self { question, choices }
    }

    /// URI of the question with the given id.
    pub fn uri_for(id: QuestionId) -> String {
        format!("{QUESTIONS_URI}/{id}")
    }
}

impl Resource for QuestionResource {
    fn uri(&self) -> String {
        Self::uri_for(self.question.id)
    }

    fn attributes(&self) -> Map<String, Value> {
        let mut attributes = Map::new();
        attributes.insert(
            "question".to_string(),
            Value::String(self.question.question_text.clone()),
        );
        attributes.insert(
            "published_at".to_string(),
            Value::String(self.question.published_at.to_rfc3339()),
        );
        attributes
    }

    fn relations(&self) -> Vec<Relation> {
        vec![Relation::many(
            "choices",
            Embedding::Embed,
            self.choices.iter().cloned().map(ChoiceResource::new),
        )]
    }
}

/// The collection of all questions.
pub fn question_collection(members: Vec<QuestionResource>) -> Collection<QuestionResource> {
    Collection::new(QUESTIONS_URI, "questions", members)
}
