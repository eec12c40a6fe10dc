use axum::routing::get;
use axum::Router;

use crate::handlers::news;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(news::home))
        .route("/news/{id}/", get(news::detail).post(news::create_comment))
        .route(
            "/edit_comment/{id}/",
            get(news::edit_comment_form).post(news::update_comment),
        )
        .route(
            "/delete_comment/{id}/",
            get(news::delete_comment_confirm)
                .post(news::delete_comment)
                .delete(news::delete_comment),
        )
}
