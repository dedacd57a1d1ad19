mod bson;
mod collection;
mod counter;
mod errors;

pub use bson::Id;
pub use collection::{ensure_indexes_exist, Coll, MongoCollection};
pub use counter::{
    ensure_counters_exist, Counter, CHOICE_ID_COUNTER, QUESTION_ID_COUNTER,
};
