use super::{question_collection, Embedding, Relation, Resource};

/// The hypermedia entry point.
///
/// All of its relations are link-only: clients must traverse to the
/// question collection rather than receive it inline.
pub struct RootResource;

impl Resource for RootResource {
    fn uri(&self) -> String {
        "/".to_string()
    }

    fn relations(&self) -> Vec<Relation> {
        vec![Relation::one(
            "questions",
            Embedding::LinkOnly,
            question_collection(Vec::new()),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rocket::serde::json::json;

    use crate::resource::represent;

    #[test]
    fn root_links_the_question_collection_and_embeds_nothing() {
        assert_eq!(
            represent(&RootResource),
            json!({"url": "/", "questions": "/questions"})
        );
    }
}
