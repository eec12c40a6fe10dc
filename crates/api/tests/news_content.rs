//! Page contents of the news site: home page size and order, comment
//! order, and when the comment form is offered.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, TestApp};
use ya_api::router::Site;
use ya_core::identity::Identity;
use ya_db::models::comment::CreateComment;
use ya_db::models::news::{CreateNews, News};
use ya_db::store::{CommentStore, NewsStore};

async fn seed_home_page(app: &TestApp) {
    let today = Utc::now().date_naive();
    let count = app.state.config.news_count_on_home_page + 1;
    for index in 0..count {
        app.store
            .create_news(CreateNews {
                title: format!("News {index}"),
                text: "Just some text.".into(),
                publication_date: Some(today - Duration::days(index as i64)),
            })
            .await
            .unwrap();
    }
}

async fn news_with_comments(app: &TestApp) -> (News, Identity, Vec<i64>) {
    let author = app.create_user("Commenter").await;
    let news = app
        .store
        .create_news(CreateNews {
            title: "Test News".into(),
            text: "Just some text.".into(),
            publication_date: None,
        })
        .await
        .unwrap();
    let now = Utc::now();
    let mut ids = Vec::new();
    // Inserted newest first so storage order differs from display order.
    for index in (0..10).rev() {
        let comment = app
            .store
            .create_comment(CreateComment {
                news_id: news.id,
                author_id: author.id,
                text: format!("Comment {index}"),
                created_at: Some(now + Duration::days(index)),
            })
            .await
            .unwrap();
        ids.push(comment.id);
    }
    ids.reverse();
    (news, author, ids)
}

#[tokio::test]
async fn home_page_shows_configured_number_of_news() {
    let app = TestApp::new(Site::News);
    seed_home_page(&app).await;

    let json = body_json(app.get("/", None).await).await;
    let object_list = json["data"]["object_list"].as_array().unwrap();
    assert_eq!(object_list.len(), app.state.config.news_count_on_home_page);
}

#[tokio::test]
async fn home_page_news_are_newest_first() {
    let app = TestApp::new(Site::News);
    seed_home_page(&app).await;

    let json = body_json(app.get("/", None).await).await;
    let dates: Vec<&str> = json["data"]["object_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|news| news["publication_date"].as_str().unwrap())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
    assert_eq!(dates[0], Utc::now().date_naive().to_string());
}

#[tokio::test]
async fn comments_are_oldest_first_for_everyone() {
    let app = TestApp::new(Site::News);
    let (news, _, expected) = news_with_comments(&app).await;
    let reader = app.create_user("reader").await;
    let cookie = app.login_cookie(&reader);

    for cookie in [None, Some(cookie.as_str())] {
        let response = app.get(&format!("/news/{}/", news.id), cookie).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let ids: Vec<i64> = json["data"]["comments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, expected);
    }
}

#[tokio::test]
async fn anonymous_client_has_no_form() {
    let app = TestApp::new(Site::News);
    let (news, _, _) = news_with_comments(&app).await;

    let json = body_json(app.get(&format!("/news/{}/", news.id), None).await).await;
    assert!(json["data"].get("form").is_none());
    assert_eq!(json["data"]["news"]["title"], "Test News");
}

#[tokio::test]
async fn authorized_client_has_form() {
    let app = TestApp::new(Site::News);
    let (news, _, _) = news_with_comments(&app).await;
    let admin = app.create_user("admin").await;
    let cookie = app.login_cookie(&admin);

    let json = body_json(app.get(&format!("/news/{}/", news.id), Some(&cookie)).await).await;
    assert_eq!(json["data"]["form"]["initial"]["text"], "");
    assert_eq!(json["data"]["form"]["errors"], serde_json::json!({}));
}

#[tokio::test]
async fn edit_form_is_prefilled_and_stable() {
    let app = TestApp::new(Site::News);
    let (news, author, ids) = news_with_comments(&app).await;
    let cookie = app.login_cookie(&author);
    let url = format!("/edit_comment/{}/", ids[0]);

    let first = body_json(app.get(&url, Some(&cookie)).await).await;
    let second = body_json(app.get(&url, Some(&cookie)).await).await;
    assert_eq!(first, second);
    assert_eq!(first["data"]["form"]["initial"]["text"], "Comment 0");
    assert_eq!(first["data"]["comment"]["news_id"], news.id);
}
