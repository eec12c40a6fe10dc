//! PostgreSQL store tests. They need `DATABASE_URL` pointing at a server the
//! test user may create databases on: `cargo test -- --ignored`.

use sqlx::PgPool;
use ya_db::models::comment::CreateComment;
use ya_db::models::news::CreateNews;
use ya_db::models::note::{CreateNote, UpdateNote, SLUG_CONSTRAINT};
use ya_db::models::user::{CreateUser, USERNAME_CONSTRAINT};
use ya_db::store::{CommentStore, NewsStore, NoteStore, UserStore};
use ya_db::{DbError, PgStore, Storage};

async fn seed_user(store: &PgStore, username: &str) -> i64 {
    store
        .create_user(CreateUser {
            username: username.into(),
            password_hash: "$argon2id$placeholder".into(),
        })
        .await
        .unwrap()
        .id
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn health_check_passes(pool: PgPool) {
    let store = PgStore::new(pool);
    assert!(store.health_check().await);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_username_is_classified(pool: PgPool) {
    let store = PgStore::new(pool);
    seed_user(&store, "reader").await;
    let err = store
        .create_user(CreateUser {
            username: "reader".into(),
            password_hash: "x".into(),
        })
        .await
        .unwrap_err();
    assert!(err.is_unique_violation(USERNAME_CONSTRAINT));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn news_and_comments_round_trip(pool: PgPool) {
    let store = PgStore::new(pool);
    let author = seed_user(&store, "author").await;
    let news = store
        .create_news(CreateNews {
            title: "Заголовок".into(),
            text: "Текст".into(),
            publication_date: None,
        })
        .await
        .unwrap();
    let latest = store.list_latest_news(10).await.unwrap();
    assert_eq!(latest, vec![news.clone()]);

    let comment = store
        .create_comment(CreateComment {
            news_id: news.id,
            author_id: author,
            text: "Текст комментария".into(),
            created_at: None,
        })
        .await
        .unwrap();
    let updated = store
        .update_comment_text(comment.id, "Обновлённый комментарий")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.author_id, author);
    assert_eq!(updated.text, "Обновлённый комментарий");
    assert_eq!(
        store.list_comments_for_news(news.id).await.unwrap(),
        vec![updated]
    );

    assert!(store.delete_comment(comment.id).await.unwrap());
    assert_eq!(store.count_comments().await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn comment_on_missing_news_is_a_foreign_key_violation(pool: PgPool) {
    let store = PgStore::new(pool);
    let author = seed_user(&store, "author").await;
    let err = store
        .create_comment(CreateComment {
            news_id: 424242,
            author_id: author,
            text: "x".into(),
            created_at: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn note_slug_constraint_is_enforced(pool: PgPool) {
    let store = PgStore::new(pool);
    let first = seed_user(&store, "first").await;
    let second = seed_user(&store, "second").await;
    let note = store
        .create_note(CreateNote {
            title: "Заметка".into(),
            text: "Текст".into(),
            slug: "shared".into(),
            author_id: first,
        })
        .await
        .unwrap();

    let err = store
        .create_note(CreateNote {
            title: "Другая".into(),
            text: "Текст".into(),
            slug: "shared".into(),
            author_id: second,
        })
        .await
        .unwrap_err();
    assert!(err.is_unique_violation(SLUG_CONSTRAINT));

    let kept = store
        .update_note(
            note.id,
            UpdateNote {
                title: note.title.clone(),
                text: "Новый текст".into(),
                slug: note.slug.clone(),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.slug, "shared");
    assert_eq!(store.list_notes_by_author(second).await.unwrap(), vec![]);
    assert!(store.delete_note(note.id).await.unwrap());
    assert_eq!(store.find_note_by_slug("shared").await.unwrap(), None);
}
