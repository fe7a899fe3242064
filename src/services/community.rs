//! Community feed: posts with like/comment aggregates, toggle-like, and
//! comments.

use uuid::Uuid;

use crate::database::DatabaseConnection;
use crate::database::models::{CommunityComment, CommunityPost, FeedPost, FromRow};
use crate::error::AppError;

/// Feed listing, newest post first.
///
/// Likes and comments are each aggregated in their own grouped subquery and
/// joined back to the post, so the three aggregates never fan out duplicate
/// post rows. The viewer's own like is joined separately from the count; a
/// NULL viewer matches no likes, which covers the "no viewer context" case.
/// Posts whose owner is gone are dropped by the inner join.
pub async fn list_feed(
    db: &DatabaseConnection,
    viewer: Option<Uuid>,
) -> Result<Vec<FeedPost>, AppError> {
    let client = db.pool().get().await?;

    let rows = client
        .query(
            "SELECT
                p.id,
                p.user_id,
                p.content,
                p.created_at,
                p.updated_at,
                u.first_name || ' ' || u.last_name AS author_name,
                COALESCE(l.likes_count, 0) AS likes_count,
                COALESCE(c.comments_count, 0) AS comments_count,
                CASE WHEN ul.post_id IS NULL THEN 0 ELSE 1 END AS liked_by_user
            FROM community_posts p
            INNER JOIN users u ON u.id = p.user_id
            LEFT JOIN (
                SELECT post_id, COUNT(*) AS likes_count
                FROM community_post_likes
                GROUP BY post_id
            ) l ON l.post_id = p.id
            LEFT JOIN (
                SELECT post_id, COUNT(*) AS comments_count
                FROM community_post_comments
                GROUP BY post_id
            ) c ON c.post_id = p.id
            LEFT JOIN (
                SELECT post_id
                FROM community_post_likes
                WHERE user_id = $1
            ) ul ON ul.post_id = p.id
            ORDER BY p.created_at DESC",
            &[&viewer],
        )
        .await?;

    rows.iter()
        .map(|row| FeedPost::from_row(row).map_err(AppError::from))
        .collect()
}

/// Create a post and re-read it joined with the author's name. Aggregate
/// counts are omitted: a brand-new post trivially has zero of each.
pub async fn create_post(
    db: &DatabaseConnection,
    user_id: Uuid,
    content: &str,
) -> Result<CommunityPost, AppError> {
    let client = db.pool().get().await?;

    let id = Uuid::new_v4();
    let content = content.trim();

    client
        .execute(
            "INSERT INTO community_posts (id, user_id, content) VALUES ($1, $2, $3)",
            &[&id, &user_id, &content],
        )
        .await?;

    let row = client
        .query_one(
            "SELECT
                p.id,
                p.user_id,
                p.content,
                p.created_at,
                p.updated_at,
                u.first_name || ' ' || u.last_name AS author_name
            FROM community_posts p
            INNER JOIN users u ON u.id = p.user_id
            WHERE p.id = $1",
            &[&id],
        )
        .await?;

    Ok(CommunityPost::from_row(&row)?)
}

/// Idempotent like toggle keyed by (post, user).
///
/// The composite primary key on community_post_likes is the authoritative
/// uniqueness guard: a concurrent duplicate insert is absorbed by
/// ON CONFLICT DO NOTHING instead of surfacing as an error. The returned
/// count is always re-read after the mutation.
pub async fn toggle_like(
    db: &DatabaseConnection,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<(bool, i64), AppError> {
    let client = db.pool().get().await?;

    let existing = client
        .query_opt(
            "SELECT 1 FROM community_post_likes WHERE post_id = $1 AND user_id = $2 LIMIT 1",
            &[&post_id, &user_id],
        )
        .await?;

    let liked = if existing.is_some() {
        client
            .execute(
                "DELETE FROM community_post_likes WHERE post_id = $1 AND user_id = $2",
                &[&post_id, &user_id],
            )
            .await?;
        false
    } else {
        client
            .execute(
                "INSERT INTO community_post_likes (post_id, user_id)
                 VALUES ($1, $2)
                 ON CONFLICT (post_id, user_id) DO NOTHING",
                &[&post_id, &user_id],
            )
            .await?;
        true
    };

    let row = client
        .query_one(
            "SELECT COUNT(*) AS total FROM community_post_likes WHERE post_id = $1",
            &[&post_id],
        )
        .await?;
    let likes_count: i64 = row.try_get("total")?;

    Ok((liked, likes_count))
}

/// Insert a comment, then return the post's full comment list (newest
/// first) plus the authoritative count, so the caller refreshes its view in
/// one round trip.
pub async fn create_comment(
    db: &DatabaseConnection,
    post_id: Uuid,
    user_id: Uuid,
    comment: &str,
) -> Result<(Vec<CommunityComment>, i64), AppError> {
    let client = db.pool().get().await?;

    let id = Uuid::new_v4();
    let comment = comment.trim();

    client
        .execute(
            "INSERT INTO community_post_comments (id, post_id, user_id, comment)
             VALUES ($1, $2, $3, $4)",
            &[&id, &post_id, &user_id, &comment],
        )
        .await?;

    let comments = list_comments(db, post_id).await?;

    let row = client
        .query_one(
            "SELECT COUNT(*) AS total FROM community_post_comments WHERE post_id = $1",
            &[&post_id],
        )
        .await?;
    let comments_count: i64 = row.try_get("total")?;

    Ok((comments, comments_count))
}

/// Comments for a post, newest first, joined with author names.
pub async fn list_comments(
    db: &DatabaseConnection,
    post_id: Uuid,
) -> Result<Vec<CommunityComment>, AppError> {
    let client = db.pool().get().await?;

    let rows = client
        .query(
            "SELECT
                c.id,
                c.post_id,
                c.comment,
                c.created_at,
                u.first_name || ' ' || u.last_name AS author_name
            FROM community_post_comments c
            INNER JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at DESC",
            &[&post_id],
        )
        .await?;

    rows.iter()
        .map(|row| CommunityComment::from_row(row).map_err(AppError::from))
        .collect()
}
