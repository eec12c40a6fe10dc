use axum::routing::get;
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::home))
        .route("/notes/", get(notes::list))
        .route("/add/", get(notes::add_form).post(notes::add))
        .route("/done/", get(notes::done))
        .route("/note/{slug}/", get(notes::detail))
        .route("/edit/{slug}/", get(notes::edit_form).post(notes::edit))
        .route(
            "/delete/{slug}/",
            get(notes::delete_confirm)
                .post(notes::delete)
                .delete(notes::delete),
        )
}
