use crate::error::{Error, Result};
use crate::scrapers::traits::PageFetcher;
use crate::scrapers::types::ScrapeParams;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

/// Fetches result pages from the live storefront
pub struct HttpFetcher {
    client: Client,
    params: ScrapeParams,
}

impl HttpFetcher {
    pub fn new(params: ScrapeParams) -> Result<Self> {
        let client = Client::builder()
            .timeout(params.timeout())
            .user_agent(params.user_agent.as_str())
            .build()
            .map_err(Error::Client)?;

        Ok(Self { client, params })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, page: u32) -> Result<String> {
        let url = self.params.page_url(page);
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| Error::Network { page, source })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Page {} returned status: {}", page, status);
            return Err(Error::Status { page, status });
        }

        let html = response
            .text()
            .await
            .map_err(|source| Error::Network { page, source })?;

        debug!("Downloaded {} bytes of HTML for page {}", html.len(), page);
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer one request with `response` and hand back the raw request
    async fn serve_once(response: &'static str) -> (ScrapeParams, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        let params = ScrapeParams {
            base_url: format!("http://{addr}"),
            user_agent: "game-prices-test/1.0".to_string(),
            ..ScrapeParams::default()
        };
        (params, handle)
    }

    #[tokio::test]
    async fn test_error_status_carries_page() {
        let (params, server) = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let fetcher = HttpFetcher::new(params).unwrap();

        let err = fetcher.fetch_page(4).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Status { page: 4, status } if status == reqwest::StatusCode::SERVICE_UNAVAILABLE
        ));

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /fr/rechercher/?type%5b0%5d=steam&page=4 http/1.1"));
        assert!(request.contains("user-agent: game-prices-test/1.0"));
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let (params, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 13\r\nConnection: close\r\n\r\n<html></html>",
        )
        .await;
        let fetcher = HttpFetcher::new(params).unwrap();

        assert_eq!(fetcher.fetch_page(1).await.unwrap(), "<html></html>");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let params = ScrapeParams {
            base_url: format!("http://{addr}"),
            ..ScrapeParams::default()
        };
        let err = HttpFetcher::new(params).unwrap().fetch_page(2).await.unwrap_err();
        assert!(matches!(err, Error::Network { page: 2, .. }));
    }

    #[test]
    fn test_invalid_user_agent_is_client_error() {
        let params = ScrapeParams {
            user_agent: "bad\nagent".to_string(),
            ..ScrapeParams::default()
        };
        assert!(matches!(HttpFetcher::new(params), Err(Error::Client(_))));
    }
}
