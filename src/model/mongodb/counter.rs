use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Database,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::mongodb::Coll;

use super::errors::is_duplicate_key;

/// A counter object used to implement auto-increment fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counter {
    #[serde(rename = "_id")]
    pub id: String,
    pub next: u32,
}

/// Counter allocating question ids.
pub const QUESTION_ID_COUNTER: &str = "question_ids";
/// Counter allocating choice ids.
pub const CHOICE_ID_COUNTER: &str = "choice_ids";

impl Counter {
    /// Create a new `Counter` starting at the given value.
    pub fn new(id: impl Into<String>, start: u32) -> Self {
        Self {
            id: id.into(),
            next: start,
        }
    }

    /// Atomically retrieve the next value of the counter with the given ID.
    pub async fn next(counters: &Coll<Counter>, id: &str) -> Result<u32> {
        Self::reserve(counters, id, 1).await
    }

    /// Atomically claim `count` consecutive values of the counter with the
    /// given ID, returning the first.
    pub async fn reserve(counters: &Coll<Counter>, id: &str, count: u32) -> Result<u32> {
        let update = doc! {
            "$inc": { "next": i64::from(count) }
        };
        let options: FindOneAndUpdateOptions = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::Before)
            .build();
        let counter = counters
            .find_one_and_update(doc! { "_id": id }, update, options)
            .await?
            .ok_or_else(|| Error::Internal(format!("Failed to find counter with ID {}", id)))?;
        Ok(counter.next)
    }
}

/// Ensure the well-known id counters exist, seeded at 1.
///
/// This operation is idempotent.
pub async fn ensure_counters_exist(db: &Database) -> Result<()> {
    let counters = Coll::<Counter>::from_db(db);
    for id in [QUESTION_ID_COUNTER, CHOICE_ID_COUNTER] {
        if let Err(err) = counters.insert_one(Counter::new(id, 1), None).await {
            // Racing seeds can only collide on `_id`: the counter exists.
            if !is_duplicate_key(&err) {
                return Err(err.into());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use mongodb::Database;

    #[backend_test]
    async fn counter_increment(db: Database) {
        let counters = Coll::<Counter>::from_db(&db);

        // Counters are seeded at 1 during setup.
        assert_eq!(
            Counter::next(&counters, QUESTION_ID_COUNTER).await.unwrap(),
            1
        );
        assert_eq!(
            Counter::next(&counters, QUESTION_ID_COUNTER).await.unwrap(),
            2
        );

        // The other counter is untouched.
        assert_eq!(
            Counter::next(&counters, CHOICE_ID_COUNTER).await.unwrap(),
            1
        );
    }

    #[backend_test]
    async fn counter_reserves_contiguous_blocks(db: Database) {
        let counters = Coll::<Counter>::from_db(&db);

        assert_eq!(
            Counter::reserve(&counters, CHOICE_ID_COUNTER, 3)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            Counter::next(&counters, CHOICE_ID_COUNTER).await.unwrap(),
            4
        );
    }

    #[backend_test]
    async fn seeding_is_idempotent(db: Database) {
        // Setup already seeded; a second pass must not reset anything.
        let counters = Coll::<Counter>::from_db(&db);
        Counter::next(&counters, QUESTION_ID_COUNTER).await.unwrap();

        ensure_counters_exist(&db).await.unwrap();

        assert_eq!(
            Counter::next(&counters, QUESTION_ID_COUNTER).await.unwrap(),
            2
        );
    }
}
