use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html("<a href='/login'>Login to Spotify</a>")
}
