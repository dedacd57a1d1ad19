use std::collections::HashMap;

use mongodb::{bson::doc, options::FindOptions, Client};
use rocket::{
    futures::TryStreamExt,
    response::status::Created,
    serde::json::{Json, Value},
    Route, State,
};

use crate::error::Result;
use crate::model::{
    api::QuestionSpec,
    common::{ChoiceId, QuestionId},
    db::{Choice, Question},
    mongodb::{Coll, Counter, CHOICE_ID_COUNTER, QUESTION_ID_COUNTER},
};
use crate::resource::{question_collection, represent, QuestionResource, Resource};

use super::common::{choices_for_question, question_by_id};

pub fn routes() -> Vec<Route> {
    routes![list_questions, create_question, question_detail]
}

/// Enumerate all questions, oldest first, with their choices embedded.
#[get("/questions")]
async fn list_questions(
    questions: Coll<Question>,
    choices: Coll<Choice>,
) -> Result<Json<Value>> {
    let by_id = FindOptions::builder().sort(doc! { "_id": 1 }).build();
    let all_questions: Vec<Question> = questions
        .find(None, by_id.clone())
        .await?
        .try_collect()
        .await?;
    let all_choices: Vec<Choice> = choices.find(None, by_id).await?.try_collect().await?;

    let mut choices_by_question: HashMap<QuestionId, Vec<Choice>> = HashMap::new();
    for choice in all_choices {
        choices_by_question
            .entry(choice.question_id)
            .or_default()
            .push(choice);
    }

    let members = all_questions
        .into_iter()
        .map(|question| {
            let question_choices = choices_by_question.remove(&question.id).unwrap_or_default();
            QuestionResource::new(question, question_choices)
        })
        .collect();

    Ok(Json(represent(&question_collection(members))))
}

/// Create a question plus its choices from a `{"question", "choices"}`
/// body, answering 201 with a `Location` header and the new
/// representation. Malformed bodies get an empty 400 and persist nothing.
#[post("/questions", data = "<body>", format = "json")]
async fn create_question(
    body: Json<Value>,
    questions: Coll<Question>,
    choices: Coll<Choice>,
    counters: Coll<Counter>,
    db_client: &State<Client>,
) -> Result<Created<Json<Value>>> {
    let spec = QuestionSpec::from_json(&body)?;

    // Allocate the ids up front; the records themselves are written in one
    // transaction so a failure part-way leaves nothing visible.
    let choice_count = ChoiceId::try_from(spec.choices.len()).expect("usize to u32");
    let question_id = Counter::next(&counters, QUESTION_ID_COUNTER).await?;
    let first_choice_id = match choice_count {
        0 => 0,
        n => Counter::reserve(&counters, CHOICE_ID_COUNTER, n).await?,
    };
    let (question, new_choices) = spec.into_records(question_id, first_choice_id);

    let mut session = db_client.start_session(None).await?;
    session.start_transaction(None).await?;
    questions
        .insert_one_with_session(&question, None, &mut session)
        .await?;
    if !new_choices.is_empty() {
        choices
            .insert_many_with_session(&new_choices, None, &mut session)
            .await?;
    }
    session.commit_transaction().await?;

    let resource = QuestionResource::new(question, new_choices);
    let location = resource.uri();
    Ok(Created::new(location).body(Json(represent(&resource))))
}

/// A single question with its choices embedded.
#[get("/questions/<question_id>")]
async fn question_detail(
    question_id: QuestionId,
    questions: Coll<Question>,
    choices: Coll<Choice>,
) -> Result<Json<Value>> {
    let question = question_by_id(&questions, question_id).await?;
    let question_choices = choices_for_question(&choices, question_id).await?;
    Ok(Json(represent(&QuestionResource::new(
        question,
        question_choices,
    ))))
}

#[cfg(test)]
pub(crate) mod tests {
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::{Client, LocalResponse},
        serde::json::{json, serde_json, Value},
    };

    use crate::model::db::{Choice, Question};
    use crate::model::mongodb::Coll;

    pub(crate) async fn post_question<'c>(client: &'c Client, body: String) -> LocalResponse<'c> {
        client
            .post("/questions")
            .header(ContentType::JSON)
            .body(body)
            .dispatch()
            .await
    }

    pub(crate) async fn json_body(response: LocalResponse<'_>) -> Value {
        let raw_response = response.into_string().await.unwrap();
        serde_json::from_str::<Value>(&raw_response).unwrap()
    }

    #[backend_test]
    async fn create_question_and_choices(
        client: Client,
        questions: Coll<Question>,
        choices: Coll<Choice>,
    ) {
        let body = json!({"question": "Color?", "choices": ["Red", "Blue"]});
        let response = post_question(&client, body.to_string()).await;

        assert_eq!(Status::Created, response.status());
        assert_eq!(
            Some("/questions/1"),
            response.headers().get_one("Location")
        );

        let created = json_body(response).await;
        assert_eq!(created["url"], json!("/questions/1"));
        assert_eq!(created["question"], json!("Color?"));
        assert!(created["published_at"].is_string());
        assert_eq!(created["choices"][0]["url"], json!("/questions/1/choices/1"));
        assert_eq!(created["choices"][0]["choice"], json!("Red"));
        assert_eq!(created["choices"][0]["votes"], json!(0));
        assert_eq!(created["choices"][1]["url"], json!("/questions/1/choices/2"));
        assert_eq!(created["choices"][1]["choice"], json!("Blue"));

        // Exactly one question and one choice per list entry persisted.
        assert_eq!(1, questions.count_documents(None, None).await.unwrap());
        assert_eq!(2, choices.count_documents(None, None).await.unwrap());
    }

    #[backend_test]
    async fn create_rejects_malformed_bodies(
        client: Client,
        questions: Coll<Question>,
        choices: Coll<Choice>,
    ) {
        let bodies = [
            json!({"choices": ["Red"]}).to_string(),
            json!({"question": "", "choices": ["Red"]}).to_string(),
            json!({"question": "Color?"}).to_string(),
            json!({"question": "Color?", "choices": "Red"}).to_string(),
            json!({"question": "Color?", "choices": ["Red", 2]}).to_string(),
            "not json at all".to_string(),
        ];

        for body in bodies {
            let response = post_question(&client, body.clone()).await;
            assert_eq!(Status::BadRequest, response.status(), "accepted {body}");
            // The API promises an empty error body.
            let raw_response = response.into_string().await.unwrap_or_default();
            assert!(raw_response.is_empty());
        }

        // Nothing was persisted along the way.
        assert_eq!(0, questions.count_documents(None, None).await.unwrap());
        assert_eq!(0, choices.count_documents(None, None).await.unwrap());
    }

    #[backend_test]
    async fn questions_and_choices_get_sequential_ids(client: Client) {
        let first = json!({"question": "Color?", "choices": ["Red", "Blue"]});
        let response = post_question(&client, first.to_string()).await;
        assert_eq!(
            Some("/questions/1"),
            response.headers().get_one("Location")
        );

        let second = json!({"question": "Pet?", "choices": ["Cat"]});
        let response = post_question(&client, second.to_string()).await;
        assert_eq!(
            Some("/questions/2"),
            response.headers().get_one("Location")
        );

        // Choice ids are a single sequence across questions.
        let created = json_body(response).await;
        assert_eq!(created["choices"][0]["url"], json!("/questions/2/choices/3"));
    }

    #[backend_test]
    async fn list_embeds_all_questions_in_id_order(client: Client) {
        let first = json!({"question": "Color?", "choices": ["Red", "Blue"]});
        post_question(&client, first.to_string()).await;
        let second = json!({"question": "Pet?", "choices": []});
        post_question(&client, second.to_string()).await;

        let response = client.get("/questions").dispatch().await;
        assert_eq!(Status::Ok, response.status());

        let listing = json_body(response).await;
        assert_eq!(listing["url"], json!("/questions"));
        let members = listing["questions"].as_array().unwrap();
        assert_eq!(2, members.len());
        assert_eq!(members[0]["url"], json!("/questions/1"));
        assert_eq!(members[0]["choices"].as_array().unwrap().len(), 2);
        assert_eq!(members[1]["url"], json!("/questions/2"));
        assert_eq!(members[1]["choices"], json!([]));
    }

    #[backend_test]
    async fn detail_embeds_choice_links(client: Client) {
        let body = json!({"question": "Color?", "choices": ["Red", "Blue"]});
        post_question(&client, body.to_string()).await;

        let response = client.get("/questions/1").dispatch().await;
        assert_eq!(Status::Ok, response.status());

        let question = json_body(response).await;
        assert_eq!(question["question"], json!("Color?"));
        let embedded = question["choices"].as_array().unwrap();
        assert_eq!(2, embedded.len());
        assert_eq!(embedded[0]["url"], json!("/questions/1/choices/1"));
        assert_eq!(embedded[1]["url"], json!("/questions/1/choices/2"));
    }

    #[backend_test]
    async fn missing_question_is_not_found(client: Client) {
        let response = client.get("/questions/1").dispatch().await;
        assert_eq!(Status::NotFound, response.status());

        // Non-numeric ids fall through to the catcher as well.
        let response = client.get("/questions/first").dispatch().await;
        assert_eq!(Status::NotFound, response.status());
    }
}
