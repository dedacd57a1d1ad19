use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Client,
};
use rocket::{
    response::status::Created,
    serde::json::{Json, Value},
    Route, State,
};

use crate::error::{Error, Result};
use crate::model::{
    common::{ChoiceId, QuestionId},
    db::{Choice, NewVote},
    mongodb::Coll,
};
use crate::resource::{represent, ChoiceResource, Resource};

use super::common::choice_by_id;

pub fn routes() -> Vec<Route> {
    routes![choice_detail, cast_vote]
}

/// A single choice of a question.
#[get("/questions/<question_id>/choices/<choice_id>")]
async fn choice_detail(
    question_id: QuestionId,
    choice_id: ChoiceId,
    choices: Coll<Choice>,
) -> Result<Json<Value>> {
    let choice = choice_by_id(&choices, question_id, choice_id).await?;
    Ok(Json(represent(&ChoiceResource::new(choice))))
}

/// Cast one vote for the choice: record a vote and bump the choice's
/// counter in one transaction, then answer 201 with the updated
/// representation. Not idempotent; every call appends a vote.
#[post("/questions/<question_id>/choices/<choice_id>")]
async fn cast_vote(
    question_id: QuestionId,
    choice_id: ChoiceId,
    choices: Coll<Choice>,
    votes: Coll<NewVote>,
    db_client: &State<Client>,
) -> Result<Created<Json<Value>>> {
    let choice = choice_by_id(&choices, question_id, choice_id).await?;

    let mut session = db_client.start_session(None).await?;
    session.start_transaction(None).await?;
    votes
        .insert_one_with_session(NewVote::new(choice.id), None, &mut session)
        .await?;
    let after_update = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();
    let updated = choices
        .find_one_and_update_with_session(
            doc! { "_id": choice_id, "question_id": question_id },
            doc! { "$inc": { "votes": 1_i64 } },
            after_update,
            &mut session,
        )
        .await?
        .ok_or_else(|| {
            Error::not_found(format!(
                "Choice with ID '{choice_id}' for question '{question_id}'"
            ))
        })?;
    session.commit_transaction().await?;

    let resource = ChoiceResource::new(updated);
    let location = resource.uri();
    Ok(Created::new(location).body(Json(represent(&resource))))
}

#[cfg(test)]
mod tests {
    use mongodb::bson::doc;
    use rocket::{http::Status, local::asynchronous::Client, serde::json::json};

    use crate::model::db::Vote;
    use crate::model::mongodb::Coll;

    use super::super::questions::tests::{json_body, post_question};

    #[backend_test]
    async fn choice_detail_has_text_and_votes(client: Client) {
        let body = json!({"question": "Color?", "choices": ["Red", "Blue"]});
        post_question(&client, body.to_string()).await;

        let response = client.get("/questions/1/choices/2").dispatch().await;
        assert_eq!(Status::Ok, response.status());

        let choice = json_body(response).await;
        assert_eq!(
            choice,
            json!({"url": "/questions/1/choices/2", "choice": "Blue", "votes": 0})
        );
    }

    #[backend_test]
    async fn voting_increments_and_records_each_vote(client: Client, votes: Coll<Vote>) {
        let body = json!({"question": "Color?", "choices": ["Red", "Blue"]});
        post_question(&client, body.to_string()).await;

        let response = client.post("/questions/1/choices/1").dispatch().await;
        assert_eq!(Status::Created, response.status());
        assert_eq!(
            Some("/questions/1/choices/1"),
            response.headers().get_one("Location")
        );
        let choice = json_body(response).await;
        assert_eq!(choice["votes"], json!(1));

        let response = client.post("/questions/1/choices/1").dispatch().await;
        assert_eq!(Status::Created, response.status());
        let choice = json_body(response).await;
        assert_eq!(choice["votes"], json!(2));

        // One vote record per call, all referencing the voted choice.
        let recorded = votes
            .count_documents(doc! { "choice_id": 1 }, None)
            .await
            .unwrap();
        assert_eq!(2, recorded);
        assert_eq!(2, votes.count_documents(None, None).await.unwrap());

        // The sibling choice is untouched.
        let response = client.get("/questions/1/choices/2").dispatch().await;
        let sibling = json_body(response).await;
        assert_eq!(sibling["votes"], json!(0));
    }

    #[backend_test]
    async fn missing_choice_is_not_found(client: Client, votes: Coll<Vote>) {
        let body = json!({"question": "Color?", "choices": ["Red"]});
        post_question(&client, body.to_string()).await;

        let response = client.get("/questions/1/choices/99").dispatch().await;
        assert_eq!(Status::NotFound, response.status());

        let response = client.post("/questions/1/choices/99").dispatch().await;
        assert_eq!(Status::NotFound, response.status());
        assert_eq!(0, votes.count_documents(None, None).await.unwrap());
    }

    #[backend_test]
    async fn choice_under_wrong_question_is_not_found(client: Client) {
        let first = json!({"question": "Color?", "choices": ["Red"]});
        post_question(&client, first.to_string()).await;
        let second = json!({"question": "Pet?", "choices": ["Cat"]});
        post_question(&client, second.to_string()).await;

        // Choice 1 belongs to question 1, not question 2.
        let response = client.get("/questions/2/choices/1").dispatch().await;
        assert_eq!(Status::NotFound, response.status());

        let response = client.post("/questions/2/choices/1").dispatch().await;
        assert_eq!(Status::NotFound, response.status());
    }
}
