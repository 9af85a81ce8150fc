use super::*;

#[test]
fn bytes_to_hex_formats_lowercase_pairs() {
    assert_eq!(bytes_to_hex(&[0x00, 0xff, 0x0a]), "00ff0a");
}

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_is_unique() {
    assert_ne!(generate_token(), generate_token());
}

#[test]
fn sha256_hex_matches_known_vector() {
    // SHA-256("abc")
    assert_eq!(
        sha256_hex("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn sha256_hex_is_deterministic_and_collision_free_for_distinct_inputs() {
    assert_eq!(sha256_hex("password"), sha256_hex("password"));
    assert_ne!(sha256_hex("password"), sha256_hex("Password"));
}

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;
    use uuid::Uuid;

    async fn pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live-db-tests");
        crate::db::init_pool(&url).await.expect("pool")
    }

    async fn seed_user(pool: &PgPool, role: &str) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO users (username, password_sha256, name, role) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(format!("user-{}", Uuid::new_v4()))
        .bind(sha256_hex("secret"))
        .bind("Test User")
        .bind(role)
        .fetch_one(pool)
        .await
        .expect("insert user")
    }

    #[tokio::test]
    async fn session_round_trip() {
        let pool = pool().await;
        let user_id = seed_user(&pool, "engineer").await;

        let token = create_session(&pool, user_id).await.expect("create");
        let user = validate_session(&pool, &token).await.expect("validate");
        assert_eq!(user.map(|u| u.id), Some(user_id));

        delete_session(&pool, &token).await.expect("delete");
        let gone = validate_session(&pool, &token).await.expect("validate after delete");
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn legacy_interior_role_still_validates() {
        let pool = pool().await;
        let user_id = seed_user(&pool, "interior").await;
        let token = create_session(&pool, user_id).await.expect("create");
        let user = validate_session(&pool, &token).await.expect("validate");
        assert_eq!(user.map(|u| u.role), Some(crate::roles::Role::InteriorDesigner));
    }
}
