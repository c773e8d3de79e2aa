use choka::db;
use choka::db::models::{NewPost, NewUser};
use choka::error::AppError;
use choka::repo;
use choka::state::DbPool;
use tempfile::TempDir;

fn test_pool() -> (DbPool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let pool = db::create_pool(&db_path).expect("Failed to create test database");
    db::run_migrations(&pool).expect("Failed to run migrations");
    (pool, temp_dir)
}

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        display_name: Some(format!("{} display", username)),
        bio: None,
        avatar_url: Some(format!("https://avatars.example/{}.svg", username)),
    }
}

fn empty_post(user_id: i64) -> NewPost {
    NewPost {
        user_id,
        content: Some("morning session".to_string()),
        location_name: None,
        latitude: None,
        longitude: None,
        caught_at: None,
        weather: None,
        tide: None,
        catches: vec![],
        media: vec![],
    }
}

#[test]
fn created_user_has_generated_id_and_zero_stats() {
    let (pool, _tmp) = test_pool();

    let user = repo::users::create_user(&pool, &new_user("misaki")).unwrap();
    assert!(user.id > 0);
    assert_eq!(user.username, "misaki");
    assert!(!user.created_at.is_empty());

    let profile = repo::users::get_user_by_username(&pool, "misaki").unwrap();
    assert_eq!(profile.user.id, user.id);
    assert_eq!(profile.stats.post_count, 0);
    assert_eq!(profile.stats.like_count, 0);
    assert_eq!(profile.stats.comment_count, 0);
}

#[test]
fn duplicate_username_is_a_conflict_with_no_extra_row() {
    let (pool, _tmp) = test_pool();

    repo::users::create_user(&pool, &new_user("kenta")).unwrap();
    let err = repo::users::create_user(&pool, &new_user("kenta")).unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let conn = pool.get().unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM users WHERE username = 'kenta'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn missing_user_is_not_found() {
    let (pool, _tmp) = test_pool();

    let err = repo::users::get_user_by_username(&pool, "nobody").unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn stats_count_posts_likes_and_comments_given() {
    let (pool, _tmp) = test_pool();

    let author = repo::users::create_user(&pool, &new_user("author")).unwrap();
    let fan = repo::users::create_user(&pool, &new_user("fan")).unwrap();

    let post_id = repo::posts::create_post(&pool, &empty_post(author.id)).unwrap();
    repo::interactions::like_post(&pool, post_id, fan.id).unwrap();
    repo::interactions::add_comment(&pool, post_id, fan.id, "nice one", None).unwrap();

    // The fan gave one like and one comment but wrote no posts
    let fan_profile = repo::users::get_user_by_username(&pool, "fan").unwrap();
    assert_eq!(fan_profile.stats.post_count, 0);
    assert_eq!(fan_profile.stats.like_count, 1);
    assert_eq!(fan_profile.stats.comment_count, 1);

    // The author wrote one post and gave nothing
    let author_profile = repo::users::get_user_by_username(&pool, "author").unwrap();
    assert_eq!(author_profile.stats.post_count, 1);
    assert_eq!(author_profile.stats.like_count, 0);
    assert_eq!(author_profile.stats.comment_count, 0);
}
