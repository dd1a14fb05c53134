//! Reading material served by `/api/materials`. Display data only.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkedExample {
    pub problem: String,
    pub solution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    #[serde(default)]
    pub examples: Vec<WorkedExample>,
}

pub fn find<'a>(topics: &'a [Topic], slug: &str) -> Option<&'a Topic> {
    topics.iter().find(|topic| topic.slug == slug)
}
