use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};

use crate::config::CrawlerConfig;
use crate::utils::{PaperError, PaperResult};

pub struct ArxivClient {
    client: Client,
    base_url: String,
}

impl ArxivClient {
    pub fn new(config: &CrawlerConfig) -> PaperResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    /// 单次 GET 请求，返回原始 Atom XML。不重试，非 2xx 直接报错
    pub async fn fetch_feed(&self, query: &str, max_results: usize) -> PaperResult<String> {
        let max_results = max_results.to_string();
        let request = self
            .client
            .get(&self.base_url)
            .query(&[
                ("search_query", query),
                ("start", "0"),
                ("max_results", max_results.as_str()),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
            ])
            .build()?;

        let url = request.url().to_string();
        info!("正在请求 arXiv: {}", url);

        let response = self.client.execute(request).await?;
        let status = response.status();

        if !status.is_success() {
            error!("arXiv 返回状态码 {}", status);
            return Err(PaperError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let text = response.text().await?;
        info!("arXiv 响应状态: {}, 内容长度: {} 字节", status, text.len());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use mockito::{Matcher, Server};

    fn crawler_config(server: &Server) -> CrawlerConfig {
        let mut config = AppConfig::default().crawler;
        config.api_url = format!("{}/api/query", server.url());
        config
    }

    #[tokio::test]
    async fn sends_search_parameters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/query")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("search_query".into(), r#"all:"graph neural""#.into()),
                Matcher::UrlEncoded("start".into(), "0".into()),
                Matcher::UrlEncoded("max_results".into(), "7".into()),
                Matcher::UrlEncoded("sortBy".into(), "submittedDate".into()),
                Matcher::UrlEncoded("sortOrder".into(), "descending".into()),
            ]))
            .with_status(200)
            .with_body("<feed/>")
            .expect(1)
            .create_async()
            .await;

        let client = ArxivClient::new(&crawler_config(&server)).unwrap();
        let body = client
            .fetch_feed(r#"all:"graph neural""#, 7)
            .await
            .unwrap();

        assert_eq!(body, "<feed/>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/query")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("Rate exceeded.")
            .create_async()
            .await;

        let client = ArxivClient::new(&crawler_config(&server)).unwrap();
        let err = client.fetch_feed("cat:cs.AI", 20).await.unwrap_err();

        assert!(matches!(err, PaperError::HttpStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let mut config = AppConfig::default().crawler;
        config.api_url = "http://127.0.0.1:1/api/query".to_string();
        config.timeout_secs = 2;

        let client = ArxivClient::new(&config).unwrap();
        let err = client.fetch_feed("cat:cs.AI", 1).await.unwrap_err();

        assert!(matches!(err, PaperError::Network(_)));
    }
}
