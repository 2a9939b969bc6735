use async_trait::async_trait;

// Fetch-side ports
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    /// Plain GET. Transport failures are `Err`; any HTTP status is `Ok`.
    async fn get(&self, url: &str, referer: Option<&str>) -> Result<HttpGetResult, String>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub body: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
