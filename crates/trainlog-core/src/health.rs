/// Handler for `GET /health`.
pub async fn health() -> &'static str {
    "Hello world!\n"
}
