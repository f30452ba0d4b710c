/// Moderation service - the comment state machine and its queries
///
/// A comment is always in exactly one of three states: pending, approved,
/// or trashed. Transitions are deliberately asymmetric:
/// - `reject` moves approved comments back to pending; it never trashes and
///   never deletes.
/// - `restore` moves trashed comments to pending, never straight back to
///   approved, regardless of the state they were trashed from.
/// - `approve` works from pending and from trash.
///
/// Re-applying a transition to an already-settled comment is a no-op
/// success, not an error.
use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentCounts, ModerationStatus, PartitionedComments};
use sqlx::PgPool;
use uuid::Uuid;

/// A single-comment moderation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject,
    Trash,
    Restore,
}

/// Pure transition table. Total over all (action, state) pairs.
pub fn transition(action: ModerationAction, current: ModerationStatus) -> ModerationStatus {
    use ModerationAction::*;
    use ModerationStatus::*;

    match (action, current) {
        (Approve, _) => Approved,
        (Reject, Approved) => Pending,
        (Reject, other) => other,
        (Trash, _) => Trashed,
        (Restore, Trashed) => Pending,
        (Restore, other) => other,
    }
}

pub struct ModerationService {
    pool: PgPool,
}

impl ModerationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a comment by ID
    pub async fn get_comment(&self, comment_id: Uuid) -> Result<Comment> {
        comment_repo::get_comment_by_id(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {comment_id} not found")))
    }

    /// Create a comment on an existing post; it starts pending.
    pub async fn create_comment(&self, post_id: Uuid, content: &str) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(AppError::Validation("Comment content is required".into()));
        }
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound(format!("Post {post_id} not found")));
        }

        let comment = comment_repo::create_comment(&self.pool, post_id, content).await?;

        tracing::info!(comment_id = %comment.id, post_id = %post_id, "comment created, awaiting moderation");
        Ok(comment)
    }

    /// Approve a comment (from pending or trash). Idempotent.
    /// Returns the updated comment and the post's new approved count.
    pub async fn approve(&self, comment_id: Uuid) -> Result<(Comment, i64)> {
        let comment = self.apply(comment_id, ModerationAction::Approve).await?;
        let approved_count =
            comment_repo::count_approved_for_post(&self.pool, comment.post_id).await?;

        Ok((comment, approved_count))
    }

    /// Move an approved comment back to pending. Never deletes, never
    /// trashes. Idempotent.
    pub async fn reject(&self, comment_id: Uuid) -> Result<Comment> {
        self.apply(comment_id, ModerationAction::Reject).await
    }

    /// Trash a comment from any state.
    pub async fn trash(&self, comment_id: Uuid) -> Result<Comment> {
        self.apply(comment_id, ModerationAction::Trash).await
    }

    /// Restore a trashed comment to pending. A restored comment is never
    /// silently re-approved. No-op success on a non-trashed comment.
    pub async fn restore(&self, comment_id: Uuid) -> Result<Comment> {
        self.apply(comment_id, ModerationAction::Restore).await
    }

    /// Permanently delete a comment. Terminal.
    pub async fn delete(&self, comment_id: Uuid) -> Result<()> {
        let deleted = comment_repo::delete_comment(&self.pool, comment_id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("Comment {comment_id} not found")));
        }

        tracing::info!(comment_id = %comment_id, "comment permanently deleted");
        Ok(())
    }

    /// Approve every listed comment that is currently pending, atomically.
    /// Returns the number of comments actually changed.
    pub async fn bulk_approve(&self, comment_ids: &[Uuid]) -> Result<u64> {
        if comment_ids.is_empty() {
            return Err(AppError::Validation("No comment IDs provided".into()));
        }

        let affected = comment_repo::bulk_approve(&self.pool, comment_ids).await?;

        tracing::info!(requested = comment_ids.len(), affected, "bulk approve");
        Ok(affected)
    }

    /// Move every listed approved comment back to pending, atomically.
    pub async fn bulk_reject(&self, comment_ids: &[Uuid]) -> Result<u64> {
        if comment_ids.is_empty() {
            return Err(AppError::Validation("No comment IDs provided".into()));
        }

        let affected = comment_repo::bulk_reject(&self.pool, comment_ids).await?;

        tracing::info!(requested = comment_ids.len(), affected, "bulk reject");
        Ok(affected)
    }

    /// Set (non-empty text) or clear (None) the admin reply. Allowed in any
    /// moderation state; not a state transition.
    pub async fn reply(&self, comment_id: Uuid, reply: Option<&str>) -> Result<Comment> {
        if let Some(text) = reply {
            if text.trim().is_empty() {
                return Err(AppError::Validation("Reply text must not be empty".into()));
            }
        }

        comment_repo::set_reply(&self.pool, comment_id, reply)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {comment_id} not found")))
    }

    /// List comments, newest first, with optional post/approval filters.
    /// Trashed comments are excluded unless explicitly requested.
    pub async fn list(
        &self,
        post_id: Option<Uuid>,
        status: Option<ModerationStatus>,
        include_trashed: bool,
    ) -> Result<Vec<Comment>> {
        let comments =
            comment_repo::list_comments(&self.pool, post_id, status, include_trashed).await?;
        Ok(comments)
    }

    /// Moderation counters, optionally scoped to one post.
    pub async fn counts(&self, post_id: Option<Uuid>) -> Result<CommentCounts> {
        let counts = comment_repo::counts(&self.pool, post_id).await?;
        Ok(counts)
    }

    /// Global count of comments awaiting moderation.
    pub async fn pending_count(&self) -> Result<i64> {
        let count = comment_repo::pending_count(&self.pool).await?;
        Ok(count)
    }

    /// Approved and pending comments for a post, partitioned, newest first.
    /// Fails with NotFound when the post does not exist.
    pub async fn all_for_post(&self, post_id: Uuid) -> Result<PartitionedComments> {
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound(format!("Post {post_id} not found")));
        }

        let comments = comment_repo::non_trashed_for_post(&self.pool, post_id).await?;
        let (approved, pending): (Vec<Comment>, Vec<Comment>) = comments
            .into_iter()
            .partition(|c| c.status == ModerationStatus::Approved);
        let total = approved.len() + pending.len();

        Ok(PartitionedComments {
            approved,
            pending,
            total,
        })
    }

    /// Approved comments for a post, newest first (public view).
    /// Fails with NotFound when the post does not exist.
    pub async fn approved_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound(format!("Post {post_id} not found")));
        }

        let comments = comment_repo::approved_for_post(&self.pool, post_id).await?;
        Ok(comments)
    }

    /// Apply a single-comment transition: fetch, compute the target state,
    /// update only when the state actually changes.
    async fn apply(&self, comment_id: Uuid, action: ModerationAction) -> Result<Comment> {
        let current = self.get_comment(comment_id).await?;
        let next = transition(action, current.status);

        if next == current.status {
            return Ok(current);
        }

        let updated = comment_repo::set_status(&self.pool, comment_id, next)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {comment_id} not found")))?;

        tracing::info!(
            comment_id = %comment_id,
            from = %current.status,
            to = %updated.status,
            "comment moderation transition"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ModerationAction::*;
    use ModerationStatus::*;

    #[test]
    fn approve_reaches_approved_from_every_state() {
        for state in [Pending, Approved, Trashed] {
            assert_eq!(transition(Approve, state), Approved);
        }
    }

    #[test]
    fn reject_only_touches_approved_comments() {
        assert_eq!(transition(Reject, Approved), Pending);
        assert_eq!(transition(Reject, Pending), Pending);
        assert_eq!(transition(Reject, Trashed), Trashed);
    }

    #[test]
    fn trash_reaches_trashed_from_every_state() {
        for state in [Pending, Approved, Trashed] {
            assert_eq!(transition(Trash, state), Trashed);
        }
    }

    #[test]
    fn restore_always_lands_in_pending_never_approved() {
        assert_eq!(transition(Restore, Trashed), Pending);
        // Non-trashed comments are left alone.
        assert_eq!(transition(Restore, Pending), Pending);
        assert_eq!(transition(Restore, Approved), Approved);
    }

    #[test]
    fn approve_then_reject_yields_pending() {
        let state = transition(Approve, Pending);
        assert_eq!(transition(Reject, state), Pending);
    }

    #[test]
    fn trash_then_restore_yields_pending_regardless_of_prior_approval() {
        for prior in [Pending, Approved] {
            let state = transition(Trash, prior);
            assert_eq!(transition(Restore, state), Pending);
        }
    }

    #[test]
    fn transitions_are_idempotent() {
        for (action, settled) in [(Approve, Approved), (Trash, Trashed)] {
            assert_eq!(transition(action, settled), settled);
        }
        assert_eq!(transition(Reject, Pending), Pending);
        assert_eq!(transition(Restore, Pending), Pending);
    }
}
