/// Our question IDs are integers.
pub type QuestionId = u32;
/// Our choice IDs are integers.
pub type ChoiceId = u32;
