use std::{env, sync::Arc};

use reqwest::{
    Client, Method, RequestBuilder,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, trace};

use crate::{
    Error, IntercomError, PageCursor, Result, StatusCode, handlers::ConversationsHandler,
};

/// Default Intercom REST API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.intercom.io";

pub const ACCESS_TOKEN_ENV: &str = "INTERCOM_ACCESS_TOKEN";
pub const BASE_URL_ENV: &str = "INTERCOM_BASE_URL";
pub const API_VERSION_ENV: &str = "INTERCOM_VERSION";

/// Free-form request options, sent as the JSON body or as query parameters.
pub type RequestOptions = serde_json::Map<String, Value>;

#[derive(Clone)]
pub struct Intercom {
    pub(crate) inner: Arc<Inner>,
}

pub(crate) struct Inner {
    pub(crate) client: Client,
    pub(crate) api_base: String,
}

#[derive(Debug, Default)]
pub struct IntercomBuilder {
    token: Option<String>,
    base_url: Option<String>,
    api_version: Option<String>,
}

impl Intercom {
    #[must_use]
    pub fn builder() -> IntercomBuilder {
        IntercomBuilder::default()
    }

    #[must_use]
    pub fn conversations(&self) -> ConversationsHandler {
        ConversationsHandler {
            client: self.clone(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.api_base
    }

    /// Send a `GET` request, with `params` encoded as query parameters.
    pub async fn get(&self, path: &str, params: &RequestOptions) -> Result<Value> {
        let query = query_pairs(params);
        self.send(Method::GET, path, |request| request.query(&query))
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.send(Method::POST, path, |request| request.json(body))
            .await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.send(Method::PUT, path, |request| request.json(body))
            .await
    }

    /// Send a `DELETE` request. Intercom expects the options (e.g. `admin_id`)
    /// in the JSON body rather than the query string.
    pub async fn delete<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.send(Method::DELETE, path, |request| request.json(body))
            .await
    }

    /// Request the page of search results that follows `cursor`.
    ///
    /// Returns [`Error::NoNextPage`] without sending anything if the cursor
    /// belongs to the last page.
    pub async fn next_search_page<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        cursor: &PageCursor,
    ) -> Result<Value> {
        #[derive(Serialize)]
        struct Pagination<'a> {
            per_page: u32,
            starting_after: &'a str,
        }

        #[derive(Serialize)]
        struct SearchPageBody<'a, Q: ?Sized> {
            query: &'a Q,
            pagination: Pagination<'a>,
        }

        let next = cursor.next.as_ref().ok_or(Error::NoNextPage)?;
        let body = SearchPageBody {
            query,
            pagination: Pagination {
                per_page: cursor.per_page,
                starting_after: &next.starting_after,
            },
        };

        self.post(path, &body).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Value> {
        let url = format!("{}/{path}", self.inner.api_base);

        trace!(%method, %url, "Triggering request.");
        let request = build(self.inner.client.request(method, &url));
        let response = request.send().await?;
        let status = response.status();

        trace!(
            status = status.as_u16(),
            content_length = response.content_length().unwrap_or_default(),
            "Received response."
        );

        let body = response.text().await?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "Unexpected response.");
            return Err(api_error(status.as_u16(), body));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(Into::into)
    }
}

impl IntercomBuilder {
    /// Configure the builder from `INTERCOM_ACCESS_TOKEN`, and optionally
    /// `INTERCOM_BASE_URL` and `INTERCOM_VERSION`.
    pub fn from_env() -> Result<Self> {
        let token = env::var(ACCESS_TOKEN_ENV)
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or(Error::MissingToken(ACCESS_TOKEN_ENV))?;

        Ok(Self {
            token: Some(token),
            base_url: env::var(BASE_URL_ENV).ok().filter(|v| !v.is_empty()),
            api_version: env::var(API_VERSION_ENV).ok().filter(|v| !v.is_empty()),
        })
    }

    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Pin the `Intercom-Version` header, e.g. `"2.11"`. Without it, the
    /// version configured for the workspace's app is used.
    #[must_use]
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn build(self) -> Result<Intercom> {
        let client = build_http_client(self.token.as_deref(), self.api_version.as_deref())?;
        let api_base = self
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_owned();

        Ok(Intercom {
            inner: Arc::new(Inner { client, api_base }),
        })
    }
}

fn build_http_client(token: Option<&str>, api_version: Option<&str>) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("intercom-rs/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(version) = api_version {
        headers.insert(
            HeaderName::from_static("intercom-version"),
            HeaderValue::from_str(version)?,
        );
    }

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|error| Error::Build(format!("{error:#}")))
}

/// Intercom reports failures as an `error.list` object; the first entry is
/// surfaced as the error's code and message.
fn api_error(status: u16, body: String) -> Error {
    let first = serde_json::from_str::<Value>(&body).ok().and_then(|value| {
        let error = value.get("errors")?.as_array()?.first()?.clone();
        let message = error.get("message").and_then(Value::as_str)?.to_owned();
        let code = error.get("code").and_then(Value::as_str).map(str::to_owned);
        Some((code, message))
    });

    let (code, message) =
        first.unwrap_or_else(|| (None, format!("request failed with status {status}")));

    Error::Intercom {
        source: IntercomError {
            status_code: StatusCode::new(status),
            code,
            message,
        },
        body: (!body.is_empty()).then_some(body),
    }
}

/// Flatten request options into query pairs. Strings are sent verbatim,
/// `null` is dropped, and everything else is sent as its JSON text.
///
/// Arrays and objects are not expanded into PHP-style bracket keys
/// (`ids[0]=1&ids[1]=2`); `ids: ["1", "2"]` is sent as `ids=["1","2"]`.
fn query_pairs(params: &RequestOptions) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };

            Some((key.clone(), value))
        })
        .collect()
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
