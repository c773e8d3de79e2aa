use choka::db;
use choka::db::models::NewUser;
use choka::repo;
use choka::state::DbPool;
use rusqlite::params;
use tempfile::TempDir;

fn test_pool() -> (DbPool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let pool = db::create_pool(&db_path).expect("Failed to create test database");
    db::run_migrations(&pool).expect("Failed to run migrations");
    (pool, temp_dir)
}

fn seed_user(pool: &DbPool, username: &str) -> i64 {
    repo::users::create_user(
        pool,
        &NewUser {
            username: username.to_string(),
            display_name: Some(username.to_string()),
            bio: None,
            avatar_url: None,
        },
    )
    .unwrap()
    .id
}

// The rankings projection is maintained by an external job; tests populate
// it the same way.
fn seed_ranking(
    pool: &DbPool,
    user_id: i64,
    species_id: Option<i64>,
    category: &str,
    period: &str,
    rank: i64,
    value: f64,
) {
    let conn = pool.get().unwrap();
    conn.execute(
        "INSERT INTO rankings (user_id, species_id, category, period, rank, value)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![user_id, species_id, category, period, rank, value],
    )
    .unwrap();
}

fn species_id(pool: &DbPool, name_ja: &str) -> i64 {
    let conn = pool.get().unwrap();
    conn.query_row(
        "SELECT id FROM fish_species WHERE name_ja = ?1",
        params![name_ja],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn species_list_is_ordered_by_display_name() {
    let (pool, _tmp) = test_pool();

    let species = repo::rankings::list_species(&pool).unwrap();
    assert_eq!(species.len(), 15);

    let names: Vec<&str> = species.iter().map(|s| s.name_ja.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn rankings_are_filtered_and_rank_ordered() {
    let (pool, _tmp) = test_pool();
    let alice = seed_user(&pool, "alice");
    let bob = seed_user(&pool, "bob");
    let seabass = species_id(&pool, "シーバス");

    seed_ranking(&pool, bob, Some(seabass), "size", "all_time", 2, 78.0);
    seed_ranking(&pool, alice, Some(seabass), "size", "all_time", 1, 92.5);
    // Different period and category must not leak in
    seed_ranking(&pool, bob, Some(seabass), "size", "monthly", 1, 70.0);
    seed_ranking(&pool, alice, Some(seabass), "weight", "all_time", 1, 6.1);

    let rankings = repo::rankings::list_rankings(&pool, "size", "all_time", None).unwrap();
    assert_eq!(rankings.len(), 2);
    assert_eq!(rankings[0].rank, 1);
    assert_eq!(rankings[0].username, "alice");
    assert_eq!(rankings[0].value, Some(92.5));
    assert_eq!(rankings[0].species_name.as_deref(), Some("シーバス"));
    assert_eq!(rankings[1].rank, 2);
    assert_eq!(rankings[1].username, "bob");
}

#[test]
fn rankings_filter_by_species() {
    let (pool, _tmp) = test_pool();
    let alice = seed_user(&pool, "alice");
    let seabass = species_id(&pool, "シーバス");
    let aji = species_id(&pool, "アジ");

    seed_ranking(&pool, alice, Some(seabass), "size", "all_time", 1, 92.5);
    seed_ranking(&pool, alice, Some(aji), "size", "all_time", 1, 31.0);

    let seabass_only =
        repo::rankings::list_rankings(&pool, "size", "all_time", Some(seabass)).unwrap();
    assert_eq!(seabass_only.len(), 1);
    assert_eq!(seabass_only[0].species_id, Some(seabass));
}

#[test]
fn rankings_without_species_resolve_no_display_name() {
    let (pool, _tmp) = test_pool();
    let alice = seed_user(&pool, "alice");

    seed_ranking(&pool, alice, None, "total_catches", "all_time", 1, 321.0);

    let rankings =
        repo::rankings::list_rankings(&pool, "total_catches", "all_time", None).unwrap();
    assert_eq!(rankings.len(), 1);
    assert_eq!(rankings[0].species_name, None);
}

#[test]
fn rankings_are_capped_at_one_hundred() {
    let (pool, _tmp) = test_pool();
    let alice = seed_user(&pool, "alice");

    for rank in 1..=120 {
        seed_ranking(&pool, alice, None, "size", "all_time", rank, 100.0 - rank as f64 * 0.1);
    }

    let rankings = repo::rankings::list_rankings(&pool, "size", "all_time", None).unwrap();
    assert_eq!(rankings.len(), 100);
    assert_eq!(rankings[0].rank, 1);
    assert_eq!(rankings[99].rank, 100);
}

#[test]
fn empty_leaderboard_is_an_empty_list() {
    let (pool, _tmp) = test_pool();

    let rankings = repo::rankings::list_rankings(&pool, "size", "all_time", None).unwrap();
    assert!(rankings.is_empty());
}
