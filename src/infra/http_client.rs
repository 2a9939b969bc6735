use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::config::SourceConfig;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::REFERER;

pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    /// Client with the source's user agent and request timeout baked in.
    pub fn new(source: &SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(source.user_agent.clone())
            .timeout(source.timeout())
            .pool_max_idle_per_host(2)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, url: &str, referer: Option<&str>) -> std::result::Result<HttpGetResult, String> {
        let mut req = self.client.get(url).header("accept", "*/*");
        if let Some(referer) = referer {
            req = req.header(REFERER, referer);
        }
        let resp = req.send().await.map_err(|e| e.to_string())?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| e.to_string())?;
        Ok(HttpGetResult { status, body })
    }
}
