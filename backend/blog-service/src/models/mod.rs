/// Data models for blog-service
///
/// This module defines structures for:
/// - Post: Blog posts with an optional featured image
/// - PostImage: Supplementary images attached to a post
/// - Comment: Reader comments with a moderation status and optional admin reply
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::{Decode, Encode, Postgres, Type};
use uuid::Uuid;

/// Moderation status of a comment.
///
/// A comment is always in exactly one of these states. Fresh comments start
/// `Pending`; `Trashed` comments are hidden from all normal listings and
/// counts until restored or permanently deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Trashed,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Trashed => "trashed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ModerationStatus::Pending),
            "approved" => Some(ModerationStatus::Approved),
            "trashed" => Some(ModerationStatus::Trashed),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Stored as TEXT; delegate the wire representation to &str so the enum works
// with the plain TEXT column the migration creates.
impl Type<Postgres> for ModerationStatus {
    fn type_info() -> PgTypeInfo {
        <&str as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <&str as Type<Postgres>>::compatible(ty)
    }
}

impl Encode<'_, Postgres> for ModerationStatus {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> Decode<'r, Postgres> for ModerationStatus {
    fn decode(value: PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as Decode<Postgres>>::decode(value)?;
        ModerationStatus::parse(raw)
            .ok_or_else(|| format!("unknown moderation status: {raw}").into())
    }
}

/// A blog post.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reduced post projection for list views (no content body, no comments).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub featured_image: Option<String>,
    pub published: bool,
    pub image_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A supplementary image owned by a post.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostImage {
    pub id: Uuid,
    pub post_id: Uuid,
    pub file_key: String,
    pub url: String,
    /// Position within the batch the image was supplied in.
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// A reader comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub reply: Option<String>,
    pub status: ModerationStatus,
    pub created_at: DateTime<Utc>,
}

/// Moderation counters, optionally scoped to one post.
///
/// `all` counts non-trashed comments only, so `all + trash` equals the total
/// number of comment rows in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommentCounts {
    pub all: i64,
    pub pending: i64,
    pub approved: i64,
    pub trash: i64,
}

/// Full post detail: content plus images and publicly visible comments.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub images: Vec<PostImage>,
    pub comments: Vec<Comment>,
}

/// Comments for a post partitioned by moderation state (admin view).
#[derive(Debug, Clone, Serialize)]
pub struct PartitionedComments {
    pub approved: Vec<Comment>,
    pub pending: Vec<Comment>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            ModerationStatus::Pending,
            ModerationStatus::Approved,
            ModerationStatus::Trashed,
        ] {
            assert_eq!(ModerationStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(ModerationStatus::parse("deleted"), None);
        assert_eq!(ModerationStatus::parse(""), None);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ModerationStatus::Trashed).unwrap();
        assert_eq!(json, "\"trashed\"");
    }
}
