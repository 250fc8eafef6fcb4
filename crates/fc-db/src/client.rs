use reqwest::{
    Response,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::ProviderError;

/// Header the provider's gateway reads the project key from
pub const API_KEY_HEADER: &str = "apikey";

const PREFER_HEADER: &str = "Prefer";

/// Equality filter on a table column, rendered as `column=eq.value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    column: &'static str,
    value: String,
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }

    fn to_query(&self) -> (&'static str, String) {
        (self.column, format!("eq.{}", self.value))
    }
}

/// Client for the provider's auth (`/auth/v1`) and table (`/rest/v1`) APIs.
///
/// Built once at start-up and cloned into handlers; the inner
/// `reqwest::Client` pools connections and every request carries the project
/// key.
#[derive(Clone, Debug)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ProviderError> {
        let invalid_key =
            |_| ProviderError::Config("API key is not a valid header value".to_string());

        let mut key = HeaderValue::from_str(api_key).map_err(invalid_key)?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(invalid_key)?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, endpoint)
    }

    /// `GET /rest/v1/{table}?select={columns}&{filters}`
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
        filters: &[Filter],
    ) -> Result<Vec<T>, ProviderError> {
        let mut query = vec![("select", columns.to_string())];
        query.extend(filters.iter().map(Filter::to_query));

        tracing::debug!(table, columns, ?filters, "selecting rows");

        let response = self
            .http
            .get(self.rest_url(table))
            .query(&query)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// `POST /rest/v1/{table}` returning the inserted rows as stored
    pub async fn insert<B, T>(&self, table: &str, row: &B) -> Result<Vec<T>, ProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(table, "inserting row");

        let response = self
            .http
            .post(self.rest_url(table))
            .header(PREFER_HEADER, "return=representation")
            .json(row)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// `DELETE /rest/v1/{table}?{filters}`
    ///
    /// Succeeds whether or not any row matched.
    pub async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), ProviderError> {
        let query: Vec<_> = filters.iter().map(Filter::to_query).collect();

        tracing::debug!(table, ?filters, "deleting rows");

        let response = self
            .http
            .delete(self.rest_url(table))
            .header(PREFER_HEADER, "return=minimal")
            .query(&query)
            .send()
            .await?;

        Self::check(response).await?;

        Ok(())
    }

    /// `POST /auth/v1/{endpoint}` with a JSON body
    pub async fn auth_post<B, T>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<T, ProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(endpoint, "auth request");

        let response = self
            .http
            .post(self.auth_url(endpoint))
            .query(query)
            .json(body)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn check(response: Response) -> Result<Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await?;
        let err = ProviderError::from_body(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), error = %err, "provider rejected request");

        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
        let body = Self::check(response).await?.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }
}
