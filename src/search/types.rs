use crate::records::Question;
use serde::{Deserialize, Serialize};

/// Query string of `GET /api/interview/search`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SearchParams {
    pub company: Option<String>,
    pub role: Option<String>,
    pub position: Option<String>,
    pub year: Option<String>,
    pub topic: Option<String>,
    pub difficulty: Option<String>,
}

/// Optional question-level criteria. Both compare case-sensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub topic: Option<String>,
    pub difficulty: Option<String>,
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        self.topic.as_ref().is_none_or(|t| &question.topic == t)
            && self
                .difficulty
                .as_ref()
                .is_none_or(|d| &question.difficulty == d)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Number of records that matched company/role/position/year.
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    /// Number of questions left after the topic/difficulty filters.
    #[serde(rename = "totalQuestions")]
    pub total_questions: usize,
    pub questions: Vec<Question>,
}
