use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::AppState;
use crate::embed;

const INDEX_HTML: &str = include_str!("../ui/index.html");

/// GET /
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /random
///
/// Searches for a random track and returns its player iframe. Blocks until a
/// track is found unless the search is bounded in the config.
pub async fn random(State(state): State<AppState>) -> Response {
    let mut rng = StdRng::from_os_rng();
    match state.discover(&mut rng).await {
        Ok(finding) => {
            info!(url = %finding.url, artist = %finding.artist, title = %finding.title, "serving track");
            Html(embed::player_iframe(&finding.url)).into_response()
        }
        Err(e) => {
            warn!("Search gave up: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response()
        }
    }
}
