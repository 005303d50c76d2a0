use crate::config::ConsoleConfig;
use crate::domain::console::ConsoleApi;
use crate::domain::models::{LaneMoveRequest, QuickView, SearchPayload};
use crate::domain::page::PageDocument;
use crate::error::{ConsoleError, Result};
use crate::infrastructure::html;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// [`ConsoleApi`] over HTTP.
pub struct HttpConsole {
    client: reqwest::Client,
    base: Url,
    tenant_id: String,
}

impl HttpConsole {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)?;

        let mut headers = HeaderMap::new();
        if let Some(session) = &config.session_cookie {
            let value = HeaderValue::from_str(&format!("{}={}", config.cookie_name, session))
                .map_err(|e| ConsoleError::Malformed(format!("session cookie: {e}")))?;
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base,
            tenant_id: config.tenant_id.clone(),
        })
    }

    /// Resolves `location` against the base URL and scopes it to the tenant
    /// unless it already names one.
    ///
    /// The session cookie rides on every request, so locations on another
    /// origin are refused.
    pub fn resolve(&self, location: &str) -> Result<Url> {
        let mut url = self.base.join(location)?;
        if url.origin() != self.base.origin() {
            return Err(ConsoleError::ForeignOrigin(url.origin().ascii_serialization()));
        }
        if !url.query_pairs().any(|(k, _)| k == "tenant_id") {
            url.query_pairs_mut()
                .append_pair("tenant_id", &self.tenant_id);
        }
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ConsoleError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ConsoleApi for HttpConsole {
    async fn search(&self, query: &str) -> Result<SearchPayload> {
        let mut url = self.base.join("/search")?;
        url.query_pairs_mut()
            .append_pair("tenant_id", &self.tenant_id)
            .append_pair("q", query);
        let body = self.get_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn quick_view(&self, client_id: &str) -> Result<QuickView> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ConsoleError::Malformed("base URL cannot hold a path".to_string()))?
            .clear()
            .extend(["clients", client_id, "quickview"]);
        url.query_pairs_mut()
            .append_pair("tenant_id", &self.tenant_id);
        let body = self.get_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn move_card(&self, request: &LaneMoveRequest) -> Result<()> {
        let url = self.resolve(&request.endpoint)?;
        let response = self
            .client
            .post(url)
            .form(&[(request.field.as_str(), request.value.as_str())])
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ConsoleError::Status(status.as_u16()))
        }
    }

    async fn fetch_page(&self, location: &str) -> Result<PageDocument> {
        let url = self.resolve(location)?;
        let body = self.get_text(url).await?;
        Ok(html::parse_page(location, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn console(server: &MockServer) -> HttpConsole {
        HttpConsole::new(&ConsoleConfig {
            base_url: server.uri(),
            tenant_id: "3".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_tenant_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("tenant_id", "3"))
            .and(query_param("q", "acme co"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "clients": [{"name": "Acme Co", "url": "/clients/1"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let payload = console(&server).search("acme co").await.unwrap();
        let clients = payload.clients.unwrap();
        assert_eq!(clients[0].name.as_deref(), Some("Acme Co"));
        assert!(payload.commands.is_none());
    }

    #[tokio::test]
    async fn test_search_non_success_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = console(&server).search("").await.unwrap_err();
        assert!(matches!(err, ConsoleError::Status(503)));
    }

    #[tokio::test]
    async fn test_search_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let err = console(&server).search("x").await.unwrap_err();
        assert!(matches!(err, ConsoleError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_move_card_posts_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks/2/status"))
            .and(query_param("tenant_id", "3"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("status=in_progress"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let request = LaneMoveRequest {
            endpoint: "/tasks/2/status".to_string(),
            field: "status".to_string(),
            value: "in_progress".to_string(),
            success_message: "Task moved to in progress.".to_string(),
        };
        console(&server).move_card(&request).await.unwrap();
    }

    #[tokio::test]
    async fn test_move_card_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/service-jobs/9/stage"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let request = LaneMoveRequest {
            endpoint: "/service-jobs/9/stage".to_string(),
            field: "stage".to_string(),
            value: "bogus".to_string(),
            success_message: String::new(),
        };
        let err = console(&server).move_card(&request).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Status(400)));
    }

    #[tokio::test]
    async fn test_session_cookie_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clients/5/quickview"))
            .and(header("cookie", "agency_os_session=signed"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"approvals": 2})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpConsole::new(&ConsoleConfig {
            base_url: server.uri(),
            tenant_id: "3".to_string(),
            session_cookie: Some("signed".to_string()),
            ..Default::default()
        })
        .unwrap();
        let qv = api.quick_view("5").await.unwrap();
        assert_eq!(qv.approvals, Some(2));
    }

    #[tokio::test]
    async fn test_fetch_page_parses_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("tenant_id", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><head><title>Home</title></head><body><section data-board=\"tasks\"></section></body></html>",
            ))
            .mount(&server)
            .await;

        let page = console(&server).fetch_page("/").await.unwrap();
        assert_eq!(page.title, "Home");
        assert_eq!(page.location, "/");
    }

    #[test]
    fn test_resolve_keeps_existing_tenant() {
        let api = HttpConsole::new(&ConsoleConfig {
            tenant_id: "3".to_string(),
            ..Default::default()
        })
        .unwrap();
        let url = api.resolve("/projects?tenant_id=9").unwrap();
        assert_eq!(url.query(), Some("tenant_id=9"));
        let url = api.resolve("/projects?quick_client_id=4").unwrap();
        assert_eq!(url.query(), Some("quick_client_id=4&tenant_id=3"));
    }

    #[test]
    fn test_resolve_refuses_other_origins() {
        let api = HttpConsole::new(&ConsoleConfig {
            base_url: "https://ops.example.test".to_string(),
            ..Default::default()
        })
        .unwrap();
        for location in [
            "https://evil.test/collect",
            "//evil.test/collect",
            "http://ops.example.test/tasks",
            "https://ops.example.test:8443/tasks",
        ] {
            let err = api.resolve(location).unwrap_err();
            assert!(matches!(err, ConsoleError::ForeignOrigin(_)), "{location}");
        }
        assert!(api.resolve("https://ops.example.test/tasks").is_ok());
    }

    #[tokio::test]
    async fn test_foreign_move_endpoint_never_receives_cookie() {
        let console_server = MockServer::start().await;
        let other = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&other)
            .await;

        let api = HttpConsole::new(&ConsoleConfig {
            base_url: console_server.uri(),
            session_cookie: Some("secret".to_string()),
            ..Default::default()
        })
        .unwrap();
        let err = api
            .move_card(&LaneMoveRequest {
                endpoint: format!("{}/tasks/1/status", other.uri()),
                field: "status".to_string(),
                value: "done".to_string(),
                success_message: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ConsoleError::ForeignOrigin(_)));
    }
}
