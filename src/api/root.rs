use rocket::{
    serde::json::{Json, Value},
    Route,
};

use crate::resource::{represent, RootResource};

pub fn routes() -> Vec<Route> {
    routes![root]
}

/// The hypermedia entry point: links only, nothing embedded.
#[get("/")]
fn root() -> Json<Value> {
    Json(represent(&RootResource))
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::Status,
        local::asynchronous::Client,
        serde::json::{json, serde_json, Value},
    };

    #[backend_test]
    async fn root_links_the_question_collection(client: Client) {
        let response = client.get("/").dispatch().await;
        assert_eq!(Status::Ok, response.status());

        let raw_response = response.into_string().await.unwrap();
        let body = serde_json::from_str::<Value>(&raw_response).unwrap();
        assert_eq!(body, json!({"url": "/", "questions": "/questions"}));
    }
}
