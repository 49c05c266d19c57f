use std::sync::Arc;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, Method, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::AppError;

use crate::token::{authorization_value, TokenProvider};

/// Thin JSON client for the TurnoPlus REST API.
///
/// Every request gets `Authorization: <Scheme> <token>` from the token
/// provider unless the caller already set that header.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn get_headers(&self, extra: Option<HeaderMap>) -> Result<HeaderMap, AppError> {
        let mut headers = extra.unwrap_or_default();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if !headers.contains_key(AUTHORIZATION) {
            if let Some(token) = self.tokens.token().filter(|token| !token.is_empty()) {
                let value = authorization_value(&self.tokens.token_type(), &token);
                let value = HeaderValue::from_str(&value)
                    .map_err(|_| AppError::Session("stored token is not a valid header".into()))?;
                headers.insert(AUTHORIZATION, value);
            }
        }

        Ok(headers)
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<Response, AppError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!("Making {} request to {}", method, url);

        let headers = self.get_headers(extra_headers)?;
        let mut req = self.client.request(method, &url).headers(headers);

        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, error_text);
            return Err(AppError::from_status(status, &error_text));
        }

        Ok(response)
    }

    pub async fn request_with_headers<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        headers: Option<HeaderMap>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, path, query, body, headers).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_with_headers(method, path, &[], body, None).await
    }

    pub async fn get<T>(&self, path: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    pub async fn get_with_query<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        self.request_with_headers::<T, ()>(Method::GET, path, query, None, None)
            .await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// DELETE endpoints answer 204 with no body.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send::<()>(Method::DELETE, path, &[], None, None).await?;
        Ok(())
    }
}
