/// Liveness probe for the hosting platform.
pub async fn health() -> &'static str {
    "OK"
}
