use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{common::ChoiceId, mongodb::Id};

/// A cast vote from the database, with its unique ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub vote: NewVote,
}

impl Deref for Vote {
    type Target = NewVote;

    fn deref(&self) -> &Self::Target {
        &self.vote
    }
}

/// A vote not yet inserted; the database assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVote {
    /// The choice this vote was cast for.
    pub choice_id: ChoiceId,
    /// When the vote was cast.
    pub cast_at: DateTime<Utc>,
}

impl NewVote {
    /// A vote for the given choice, cast now.
    pub fn new(choice_id: ChoiceId) -> Self {
        Self {
            choice_id,
            cast_at: Utc::now(),
        }
    }
}
