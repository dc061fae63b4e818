use crate::core::{DeviceRecord, DeviceSink, SubmitOutcome};
use crate::utils::error::{Result, SeederError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// `POST {base_url}/devices/`，帶固定的 Bearer token
pub struct HttpDeviceSink {
    client: Client,
    endpoint: Url,
    token: String,
}

impl HttpDeviceSink {
    pub fn new(base_url: &str, token: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: devices_endpoint(base_url)?,
            token: token.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// 補上結尾的 `/` 再接 `devices/`，避免 join 吃掉最後一段路徑
pub fn devices_endpoint(base_url: &str) -> Result<Url> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    let invalid = |e: url::ParseError| SeederError::InvalidConfigValueError {
        field: "base_url".to_string(),
        value: base_url.to_string(),
        reason: format!("Invalid URL format: {}", e),
    };

    Url::parse(&base)
        .and_then(|url| url.join("devices/"))
        .map_err(invalid)
}

#[async_trait]
impl DeviceSink for HttpDeviceSink {
    async fn submit(&self, record: &DeviceRecord) -> Result<SubmitOutcome> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(record)
            .send()
            .await?;

        // 回應內容不解析
        let status = response.status();
        tracing::debug!("📡 POST {} '{}' -> {}", self.endpoint, record.name, status);

        Ok(SubmitOutcome {
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn record() -> DeviceRecord {
        DeviceRecord {
            name: "Elizabeth Manufacturing Sensor 0".to_string(),
            imei: "490154203237518".to_string(),
            latitude: -34.7104,
            longitude: 138.6703,
        }
    }

    #[test]
    fn test_devices_endpoint() {
        assert_eq!(
            devices_endpoint("http://localhost:3001/api/").unwrap().as_str(),
            "http://localhost:3001/api/devices/"
        );
        assert_eq!(
            devices_endpoint("http://localhost:3001/api").unwrap().as_str(),
            "http://localhost:3001/api/devices/"
        );
        assert!(devices_endpoint("not a url").is_err());
    }

    #[tokio::test]
    async fn test_submit_posts_json_with_bearer_token() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/devices/")
                .header("Authorization", "Bearer test-token")
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "name": "Elizabeth Manufacturing Sensor 0",
                    "IMEI": "490154203237518",
                    "latitude": -34.7104,
                    "longitude": 138.6703
                }));
            then.status(201);
        });

        let sink = HttpDeviceSink::new(&server.url("/api"), "test-token", None).unwrap();
        let outcome = sink.submit(&record()).await.unwrap();

        api_mock.assert();
        assert_eq!(outcome.status, 201);
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_error_status_is_reported_not_raised() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/devices/");
            then.status(422).body("not json at all");
        });

        let sink = HttpDeviceSink::new(&server.url("/api/"), "test-token", None).unwrap();
        let outcome = sink.submit(&record()).await.unwrap();

        api_mock.assert();
        assert_eq!(outcome.status, 422);
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_api_error() {
        let sink = HttpDeviceSink::new(
            "http://127.0.0.1:1/api/",
            "test-token",
            Some(Duration::from_secs(2)),
        )
        .unwrap();

        let err = sink.submit(&record()).await.unwrap_err();
        assert!(matches!(err, SeederError::ApiError(_)));
    }
}
