//! Engagement protocol property tests
//!
//! These tests exercise the service layer against the in-memory repository,
//! which mirrors the per-document atomicity of the PostgreSQL store. No
//! external services are required.
//!
//! Run with: cargo test -p integration-tests --test engagement_tests

use integration_tests::{memory_context, unique_poem_id, SAMPLE_COMMENT, SAMPLE_REPLY};
use serde_json::json;
use verse_core::{EngagementId, PoemId, ServerEvent};
use verse_service::EngagementService;

// ============================================================================
// Likes
// ============================================================================

#[tokio::test]
async fn test_first_like_creates_record() {
    let (ctx, _repo) = memory_context();
    let poem_id = PoemId::from("poem-7");

    let record = EngagementService::new(&ctx)
        .like_poem(&poem_id)
        .await
        .expect("like");

    assert_eq!(record.likes, 1);
    assert!(record.comments.is_empty());

    // The broadcast for a first like carries exactly this shape
    let event = ServerEvent::engagement_update(poem_id, record);
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({
            "event": "engagement_update",
            "data": {
                "poemId": "poem-7",
                "data": { "likes": 1, "comments": [] }
            }
        })
    );
}

#[tokio::test]
async fn test_concurrent_likes_are_never_lost() {
    let (ctx, repo) = memory_context();
    let poem_id = unique_poem_id();

    const WRITERS: usize = 25;

    let mut handles = Vec::with_capacity(WRITERS);
    for _ in 0..WRITERS {
        let ctx = ctx.clone();
        let poem_id = poem_id.clone();
        handles.push(tokio::spawn(async move {
            EngagementService::new(&ctx).like_poem(&poem_id).await
        }));
    }

    for handle in handles {
        handle.await.expect("join").expect("like");
    }

    let record = repo.record(&poem_id).expect("record exists");
    assert_eq!(record.likes, WRITERS as i64, "every concurrent like must land");
}

// ============================================================================
// Comments and replies
// ============================================================================

#[tokio::test]
async fn test_fresh_comment_has_empty_replies_and_reactions() {
    let (ctx, _repo) = memory_context();
    let poem_id = PoemId::from("poem-3");

    let record = EngagementService::new(&ctx)
        .add_comment(&poem_id, SAMPLE_COMMENT)
        .await
        .expect("comment");

    assert_eq!(record.comments.len(), 1);
    let comment = &record.comments[0];
    assert_eq!(comment.text, SAMPLE_COMMENT, "text stored verbatim");
    assert!(comment.replies.is_empty());
    assert!(comment.reactions.is_empty());

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["comments"][0]["replies"], json!([]));
    assert_eq!(value["comments"][0]["reactions"], json!({}));
}

#[tokio::test]
async fn test_comment_then_reply_nests_exactly_once() {
    let (ctx, _repo) = memory_context();
    let service = EngagementService::new(&ctx);
    let poem_id = unique_poem_id();

    let record = service
        .add_comment(&poem_id, SAMPLE_COMMENT)
        .await
        .expect("comment");
    let comment_id = record.comments[0].id;

    let record = service
        .add_reply(&poem_id, comment_id, SAMPLE_REPLY)
        .await
        .expect("reply");

    assert_eq!(record.comments.len(), 1);
    assert_eq!(record.comments[0].replies.len(), 1);
    assert_eq!(record.comments[0].replies[0].text, SAMPLE_REPLY);

    // Replies cannot nest: the serialized reply has no replies key at all
    let value = serde_json::to_value(&record).unwrap();
    assert!(value["comments"][0]["replies"][0].get("replies").is_none());
}

#[tokio::test]
async fn test_comment_ordering_is_append_order() {
    let (ctx, _repo) = memory_context();
    let service = EngagementService::new(&ctx);
    let poem_id = unique_poem_id();

    service.add_comment(&poem_id, "first").await.expect("comment");
    service.add_comment(&poem_id, "second").await.expect("comment");
    let record = service.add_comment(&poem_id, "third").await.expect("comment");

    let texts: Vec<&str> = record.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_empty_comment_is_rejected() {
    let (ctx, repo) = memory_context();
    let poem_id = unique_poem_id();

    let result = EngagementService::new(&ctx).add_comment(&poem_id, "   ").await;

    assert!(result.is_err());
    assert!(repo.record(&poem_id).is_none(), "nothing written");
}

// ============================================================================
// Reactions
// ============================================================================

#[tokio::test]
async fn test_repeated_reaction_accumulates() {
    let (ctx, _repo) = memory_context();
    let service = EngagementService::new(&ctx);
    let poem_id = unique_poem_id();

    let record = service
        .add_comment(&poem_id, SAMPLE_COMMENT)
        .await
        .expect("comment");
    let comment_id = record.comments[0].id;

    service
        .add_reaction(&poem_id, comment_id, "❤️")
        .await
        .expect("reaction");
    let record = service
        .add_reaction(&poem_id, comment_id, "❤️")
        .await
        .expect("reaction");

    assert_eq!(
        record.comments[0].reaction_count("❤️"),
        2,
        "no per-viewer dedup, repeats accumulate"
    );
}

#[tokio::test]
async fn test_distinct_emoji_count_separately() {
    let (ctx, _repo) = memory_context();
    let service = EngagementService::new(&ctx);
    let poem_id = unique_poem_id();

    let record = service
        .add_comment(&poem_id, SAMPLE_COMMENT)
        .await
        .expect("comment");
    let comment_id = record.comments[0].id;

    service
        .add_reaction(&poem_id, comment_id, "❤️")
        .await
        .expect("reaction");
    let record = service
        .add_reaction(&poem_id, comment_id, "🔥")
        .await
        .expect("reaction");

    assert_eq!(record.comments[0].reaction_count("❤️"), 1);
    assert_eq!(record.comments[0].reaction_count("🔥"), 1);
}

// ============================================================================
// Not-found targets
// ============================================================================

#[tokio::test]
async fn test_reply_to_unknown_comment_changes_nothing() {
    let (ctx, repo) = memory_context();
    let service = EngagementService::new(&ctx);
    let poem_id = unique_poem_id();

    let before = service
        .add_comment(&poem_id, SAMPLE_COMMENT)
        .await
        .expect("comment");

    let result = service
        .add_reply(&poem_id, EngagementId::new(999_999), SAMPLE_REPLY)
        .await;

    let err = result.expect_err("unknown comment must fail");
    assert!(err.is_not_found());

    let after = repo.record(&poem_id).expect("record exists");
    assert_eq!(after, before, "record unchanged");
}

#[tokio::test]
async fn test_reaction_on_unknown_poem_changes_nothing() {
    let (ctx, repo) = memory_context();
    let poem_id = unique_poem_id();

    let result = EngagementService::new(&ctx)
        .add_reaction(&poem_id, EngagementId::new(1), "❤️")
        .await;

    let err = result.expect_err("unknown poem must fail");
    assert!(err.is_not_found());
    assert!(repo.record(&poem_id).is_none());
}

// ============================================================================
// Cross-poem isolation
// ============================================================================

#[tokio::test]
async fn test_poems_never_cross_contaminate() {
    let (ctx, repo) = memory_context();
    let service = EngagementService::new(&ctx);
    let poem_a = unique_poem_id();
    let poem_b = unique_poem_id();

    service.like_poem(&poem_a).await.expect("like");
    service.add_comment(&poem_b, "only on b").await.expect("comment");
    let before_b = repo.record(&poem_b).expect("record b");

    // A burst of writes to poem A
    for _ in 0..5 {
        service.like_poem(&poem_a).await.expect("like");
    }
    service.add_comment(&poem_a, "only on a").await.expect("comment");

    let after_a = repo.record(&poem_a).expect("record a");
    let after_b = repo.record(&poem_b).expect("record b");

    assert_eq!(after_a.likes, 6);
    assert_eq!(after_a.comments.len(), 1);
    assert_eq!(after_b, before_b, "poem B untouched by poem A's updates");
}

// ============================================================================
// Snapshot
// ============================================================================

#[tokio::test]
async fn test_snapshot_contains_every_record() {
    let (ctx, _repo) = memory_context();
    let service = EngagementService::new(&ctx);
    let poem_a = unique_poem_id();
    let poem_b = unique_poem_id();

    service.like_poem(&poem_a).await.expect("like");
    service.add_comment(&poem_b, SAMPLE_COMMENT).await.expect("comment");

    let snapshot = service.snapshot().await.expect("snapshot");

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[&poem_a].likes, 1);
    assert_eq!(snapshot[&poem_b].comments.len(), 1);
}
