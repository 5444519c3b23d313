//! Frontend Models
//!
//! Data structures matching backend records. The admin treats them as opaque
//! pass-through data, so every field defaults when missing.

use serde::{Deserialize, Serialize};

/// Server-computed pagination, mirrored by the list controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 0,
            total: 0,
            total_pages: 1,
        }
    }
}

impl Pagination {
    /// Pagination for an unpaginated response holding `count` items
    pub fn single_page(count: usize) -> Self {
        Self {
            page: 1,
            limit: count as u32,
            total: count as u64,
            total_pages: 1,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// One page of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[default]
    Draft,
    Published,
    /// Any status this build doesn't know about
    #[serde(other)]
    Unknown,
}

impl PublishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Draft => "draft",
            PublishStatus::Published => "published",
            PublishStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
            ReviewStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Story {
    #[serde(alias = "_id")]
    pub id: String,
    pub title_en: String,
    pub title_ar: String,
    pub description_en: String,
    pub description_ar: String,
    pub cover_image: Option<String>,
    pub audio: Option<String>,
    pub age_group: Option<String>,
    pub status: PublishStatus,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Video {
    #[serde(alias = "_id")]
    pub id: String,
    pub title_en: String,
    pub title_ar: String,
    pub video_url: Option<String>,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub duration_seconds: Option<u32>,
    pub status: PublishStatus,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Banner {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub link_url: Option<String>,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Puzzle {
    #[serde(alias = "_id")]
    pub id: String,
    pub title_en: String,
    pub title_ar: String,
    pub image: Option<String>,
    pub difficulty: Option<String>,
    pub pieces: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Quiz {
    #[serde(alias = "_id")]
    pub id: String,
    pub title_en: String,
    pub title_ar: String,
    pub description_en: String,
    pub category: Option<String>,
    pub time_limit: Option<u32>,
    pub status: PublishStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Question {
    #[serde(alias = "_id")]
    pub id: String,
    /// Raw because the backend may populate the reference
    pub quiz_id: serde_json::Value,
    pub question_en: String,
    pub question_ar: String,
    pub options_en: Vec<String>,
    pub options_ar: Vec<String>,
    pub correct_index: usize,
}

impl Question {
    /// Quiz title when the reference is populated, otherwise its id
    pub fn quiz_label(&self) -> String {
        match &self.quiz_id {
            serde_json::Value::Object(map) => map
                .get("titleEn")
                .or_else(|| map.get("_id"))
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            serde_json::Value::String(id) => id.clone(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct KidSubmission {
    #[serde(alias = "_id")]
    pub id: String,
    pub kid_name: String,
    pub age: Option<u32>,
    pub title: String,
    pub media_url: Option<String>,
    pub kind: Option<String>,
    pub status: ReviewStatus,
    pub feedback: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Notification {
    #[serde(alias = "_id")]
    pub id: String,
    pub title_en: String,
    pub title_ar: String,
    pub body_en: String,
    pub body_ar: String,
    pub audience: Option<String>,
    pub image: Option<String>,
    pub sent_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AttemptUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AttemptQuiz {
    pub title_en: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizAttempt {
    #[serde(alias = "_id")]
    pub id: String,
    pub user: AttemptUser,
    pub quiz: AttemptQuiz,
    pub score: u32,
    pub total_questions: u32,
    pub duration_seconds: Option<u32>,
    pub created_at: Option<String>,
}

impl QuizAttempt {
    /// Whole-number percentage; 0 when the quiz has no questions
    pub fn percentage(&self) -> u32 {
        if self.total_questions == 0 {
            0
        } else {
            self.score * 100 / self.total_questions
        }
    }
}

/// Staff account returned by `/admin/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminUser {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
}

impl AdminUser {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Format an ISO-8601 timestamp for tables; falls back to the raw string
pub fn format_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mongo_id_alias_and_defaults() {
        let story: Story = serde_json::from_value(json!({
            "_id": "s1",
            "titleEn": "The Brave Fox",
            "status": "published"
        }))
        .unwrap();
        assert_eq!(story.id, "s1");
        assert_eq!(story.status, PublishStatus::Published);
        assert_eq!(story.cover_image, None);
    }

    #[test]
    fn test_unrecognised_status_decodes() {
        let story: Story = serde_json::from_value(json!({ "_id": "s2", "status": "archived" })).unwrap();
        assert_eq!(story.status, PublishStatus::Unknown);

        let status: ReviewStatus = serde_json::from_value(json!("escalated")).unwrap();
        assert_eq!(status, ReviewStatus::Unknown);
        assert_eq!(status.as_str(), "unknown");
    }

    #[test]
    fn test_pagination_wire_names() {
        let p: Pagination = serde_json::from_value(json!({
            "page": 2, "limit": 10, "total": 31, "totalPages": 4
        }))
        .unwrap();
        assert_eq!(p.total_pages, 4);
        assert!(p.has_prev());
        assert!(p.has_next());
    }

    #[test]
    fn test_attempt_percentage() {
        let mut attempt = QuizAttempt { score: 7, total_questions: 10, ..Default::default() };
        assert_eq!(attempt.percentage(), 70);
        attempt.total_questions = 0;
        assert_eq!(attempt.percentage(), 0);
    }

    #[test]
    fn test_question_quiz_label() {
        let populated = Question {
            quiz_id: json!({ "_id": "q1", "titleEn": "Animals" }),
            ..Default::default()
        };
        assert_eq!(populated.quiz_label(), "Animals");
        let bare = Question { quiz_id: json!("q1"), ..Default::default() };
        assert_eq!(bare.quiz_label(), "q1");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-03-05T09:30:00.000Z"), "2024-03-05 09:30");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
