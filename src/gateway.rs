//! Fedora 4 container API over HTTP.

use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::FedoraConfig;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
const APPLICATION_LD_JSON: &str = "application/ld+json";
const APPLICATION_SPARQL_UPDATE: &str = "application/sparql-update";

#[derive(Debug, Error)]
pub(crate) enum TransportError {
    #[error("{method} {path} failed with error {status} {body}")]
    Status {
        method: Method,
        path: String,
        status: StatusCode,
        body: String,
    },
    #[error("{method} {path} failed: {source}")]
    Request {
        method: Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Storage server operations needed to materialize one record.
pub(crate) trait StorageGateway {
    async fn create_container(&self, path: &str) -> Result<(), TransportError>;
    async fn get_container_metadata(&self, path: &str) -> Result<Value, TransportError>;
    async fn patch_container_triples(&self, path: &str, update: &str) -> Result<(), TransportError>;
}

pub(crate) struct Fedora {
    client: Client,
    retries: u32,
    backoff: Duration,
}

impl Fedora {
    pub(crate) fn new(config: &FedoraConfig) -> Result<Fedora> {
        let mut builder = Client::builder()
            .http1_only()
            .user_agent(APP_USER_AGENT)
            .gzip(true);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Fedora {
            client: builder.build()?,
            retries: config.retries,
            backoff: config.retry_backoff(),
        })
    }

    /// Sends a request, retrying server errors and connect or timeout
    /// failures up to the configured count. Any other non-2xx status fails
    /// immediately.
    async fn send(
        &self,
        method: Method,
        path: &str,
        build: impl Fn(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, TransportError> {
        let mut attempt = 0;
        loop {
            let request = build(self.client.request(method.clone(), path));
            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(target: "fedora", %method, path, status = %response.status(), "request succeeded");
                    return Ok(response);
                }
                Ok(response) if response.status().is_server_error() && attempt < self.retries => {
                    warn!(target: "fedora", %method, path, status = %response.status(), attempt, "retrying");
                }
                Ok(response) => {
                    let status = response.status();
                    let body = match response.text().await {
                        Ok(body) => body,
                        Err(error) => {
                            warn!(
                                target: "fedora",
                                %method,
                                path,
                                %status,
                                %error,
                                "unreadable error body"
                            );
                            String::new()
                        }
                    };
                    return Err(TransportError::Status {
                        method,
                        path: path.to_string(),
                        status,
                        body,
                    });
                }
                Err(error) if (error.is_connect() || error.is_timeout()) && attempt < self.retries => {
                    warn!(target: "fedora", %method, path, %error, attempt, "retrying");
                }
                Err(source) => {
                    return Err(TransportError::Request {
                        method,
                        path: path.to_string(),
                        source,
                    });
                }
            }
            attempt += 1;
            tokio::time::sleep(self.backoff).await;
        }
    }
}

impl StorageGateway for Fedora {
    async fn create_container(&self, path: &str) -> Result<(), TransportError> {
        self.send(Method::PUT, path, |request| request).await?;
        Ok(())
    }

    async fn get_container_metadata(&self, path: &str) -> Result<Value, TransportError> {
        let response = self
            .send(Method::GET, path, |request| {
                request.header(header::ACCEPT, APPLICATION_LD_JSON)
            })
            .await?;
        response
            .json()
            .await
            .map_err(|source| TransportError::Request {
                method: Method::GET,
                path: path.to_string(),
                source,
            })
    }

    async fn patch_container_triples(&self, path: &str, update: &str) -> Result<(), TransportError> {
        self.send(Method::PATCH, path, |request| {
            request
                .header(header::CONTENT_TYPE, APPLICATION_SPARQL_UPDATE)
                .body(update.to_string())
        })
        .await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use anyhow::Result;
    use axum::Router;
    use axum::body::Bytes;
    use axum::extract::State;
    use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
    use axum::response::IntoResponse;
    use serde_json::json;
    use tokio::net::TcpListener;

    use crate::config::FedoraConfig;

    use super::{Fedora, StorageGateway, TransportError};

    #[derive(Debug, Clone)]
    pub(crate) struct Recorded {
        pub(crate) method: Method,
        pub(crate) path: String,
        pub(crate) accept: Option<String>,
        pub(crate) content_type: Option<String>,
        pub(crate) body: String,
    }

    /// In-process stand-in for Fedora that records every request and answers
    /// with queued status codes, then 201 for PUT and 204 for PATCH.
    #[derive(Clone, Default)]
    pub(crate) struct MockFedora {
        requests: Arc<Mutex<Vec<Recorded>>>,
        statuses: Arc<Mutex<VecDeque<StatusCode>>>,
    }

    impl MockFedora {
        pub(crate) async fn spawn(statuses: &[StatusCode]) -> Result<(MockFedora, String)> {
            let mock = MockFedora::default();
            mock.statuses.lock().unwrap().extend(statuses);
            let app = Router::new().fallback(handle).with_state(mock.clone());
            let listener = TcpListener::bind("127.0.0.1:0").await?;
            let base_url = format!("http://{}/rest", listener.local_addr()?);
            tokio::spawn(async move { axum::serve(listener, app).await });
            Ok((mock, base_url))
        }

        pub(crate) fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().unwrap().clone()
        }
    }

    async fn handle(
        State(mock): State<MockFedora>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> impl IntoResponse {
        let header_str = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        mock.requests.lock().unwrap().push(Recorded {
            method: method.clone(),
            path: uri.path().to_string(),
            accept: header_str(header::ACCEPT),
            content_type: header_str(header::CONTENT_TYPE),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
        let queued = mock.statuses.lock().unwrap().pop_front();
        let status = queued.unwrap_or(match method {
            Method::PUT => StatusCode::CREATED,
            Method::GET => StatusCode::OK,
            _ => StatusCode::NO_CONTENT,
        });
        let body = if method == Method::GET && status.is_success() {
            json!([{"@id": format!("http://fedora{}", uri.path()), "@type": ["ldp:Container"]}])
                .to_string()
        } else if status.is_success() {
            String::new()
        } else {
            format!("{status}")
        };
        (status, [(header::CONTENT_TYPE, "application/ld+json")], body)
    }

    fn fedora(retries: u32) -> Result<Fedora> {
        Fedora::new(&FedoraConfig {
            retries,
            retry_backoff_ms: 10,
            ..FedoraConfig::default()
        })
    }

    #[tokio::test]
    async fn create_container_puts_at_path() -> Result<()> {
        let (mock, base_url) = MockFedora::spawn(&[]).await?;
        fedora(0)?
            .create_container(&format!("{base_url}/p-1"))
            .await?;

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].path, "/rest/p-1");
        assert!(requests[0].body.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn create_container_checks_status() -> Result<()> {
        let (_mock, base_url) = MockFedora::spawn(&[StatusCode::CONFLICT]).await?;
        let result = fedora(0)?.create_container(&format!("{base_url}/p-1")).await;
        match result {
            Err(TransportError::Status { method, status, path, .. }) => {
                assert_eq!(method, Method::PUT);
                assert_eq!(status, StatusCode::CONFLICT);
                assert!(path.ends_with("/rest/p-1"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn patch_sends_sparql_update() -> Result<()> {
        let (mock, base_url) = MockFedora::spawn(&[]).await?;
        let update = "INSERT {\n<> <http://purl.org/dc/terms/title> \"t\" .\n} \nWHERE {}";
        fedora(0)?
            .patch_container_triples(&format!("{base_url}/p-1"), update)
            .await?;

        let requests = mock.requests();
        assert_eq!(requests[0].method, Method::PATCH);
        assert_eq!(
            requests[0].content_type.as_deref(),
            Some("application/sparql-update")
        );
        assert_eq!(requests[0].body, update);
        Ok(())
    }

    #[tokio::test]
    async fn get_metadata_asks_for_json_ld() -> Result<()> {
        let (mock, base_url) = MockFedora::spawn(&[]).await?;
        let metadata = fedora(0)?
            .get_container_metadata(&format!("{base_url}/p-1"))
            .await?;

        assert_eq!(metadata[0]["@id"], "http://fedora/rest/p-1");
        let requests = mock.requests();
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].accept.as_deref(), Some("application/ld+json"));
        Ok(())
    }

    #[tokio::test]
    async fn server_errors_are_retried_when_configured() -> Result<()> {
        let (mock, base_url) = MockFedora::spawn(&[StatusCode::SERVICE_UNAVAILABLE]).await?;
        fedora(1)?
            .create_container(&format!("{base_url}/p-1"))
            .await?;
        assert_eq!(mock.requests().len(), 2);

        let (mock, base_url) = MockFedora::spawn(&[StatusCode::SERVICE_UNAVAILABLE]).await?;
        let result = fedora(0)?.create_container(&format!("{base_url}/p-1")).await;
        assert!(matches!(
            result,
            Err(TransportError::Status { status: StatusCode::SERVICE_UNAVAILABLE, .. })
        ));
        assert_eq!(mock.requests().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() -> Result<()> {
        let (mock, base_url) = MockFedora::spawn(&[StatusCode::BAD_REQUEST]).await?;
        let result = fedora(3)?
            .patch_container_triples(&format!("{base_url}/p-1"), "INSERT {\n} \nWHERE {}")
            .await;
        assert!(matches!(
            result,
            Err(TransportError::Status { status: StatusCode::BAD_REQUEST, .. })
        ));
        assert_eq!(mock.requests().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn connection_failure_surfaces() -> Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);
        let result = fedora(0)?
            .create_container(&format!("http://{addr}/rest/p-1"))
            .await;
        assert!(matches!(result, Err(TransportError::Request { .. })));
        Ok(())
    }
}
