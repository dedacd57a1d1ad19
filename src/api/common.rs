use mongodb::{bson::doc, options::FindOptions};
use rocket::futures::TryStreamExt;

use crate::error::{Error, Result};
use crate::model::{
    common::{ChoiceId, QuestionId},
    db::{Choice, Question},
    mongodb::Coll,
};

/// Fetch a question by id, or fail with a 404.
pub async fn question_by_id(
    questions: &Coll<Question>,
    question_id: QuestionId,
) -> Result<Question> {
    questions
        .find_one(doc! { "_id": question_id }, None)
        .await?
        .ok_or_else(|| Error::not_found(format!("Question with ID '{question_id}'")))
}

/// Fetch a choice by id under the given question, or fail with a 404.
///
/// A choice is only addressable underneath its own question.
pub async fn choice_by_id(
    choices: &Coll<Choice>,
    question_id: QuestionId,
    choice_id: ChoiceId,
) -> Result<Choice> {
    choices
        .find_one(doc! { "_id": choice_id, "question_id": question_id }, None)
        .await?
        .ok_or_else(|| {
            Error::not_found(format!(
                "Choice with ID '{choice_id}' for question '{question_id}'"
            ))
        })
}

/// Fetch the choices of the given question in ascending id order.
pub async fn choices_for_question(
    choices: &Coll<Choice>,
    question_id: QuestionId,
) -> Result<Vec<Choice>> {
    let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
    Ok(choices
        .find(doc! { "question_id": question_id }, options)
        .await?
        .try_collect()
        .await?)
}
