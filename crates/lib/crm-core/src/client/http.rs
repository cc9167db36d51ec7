use std::sync::Arc;

use async_trait::async_trait;
use crm_model::{AssociationLink, ListQuery, ObjectType, OwnerQuery, PropertyMap, SearchRequest};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use super::CrmApi;
use crate::error::{CrmError, CrmResult};

/// Default API root for object, search, association, and schema calls.
pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com/crm/v3";

/// reqwest-backed implementation of [`CrmApi`].
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpCrmClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    access_token: Option<String>,
}

impl HttpCrmClient {
    #[must_use]
    pub fn builder() -> HttpCrmClientBuilder {
        HttpCrmClientBuilder::new()
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.inner.access_token.is_some()
    }

    fn url(&self, segments: &[&str]) -> CrmResult<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CrmError::validation("CRM base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Starts an authenticated request. Fails before touching the network
    /// when no credential is configured.
    fn request(&self, method: Method, segments: &[&str]) -> CrmResult<RequestBuilder> {
        let token = self
            .inner
            .access_token
            .as_deref()
            .ok_or(CrmError::NotConfigured)?;
        let url = self.url(segments)?;
        debug!(%method, %url, "crm request");
        Ok(self.inner.http.request(method, url).bearer_auth(token))
    }

    async fn send(request: RequestBuilder) -> CrmResult<Value> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CrmError::Remote {
                status: status.as_u16(),
                body,
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CrmApi for HttpCrmClient {
    async fn list_objects(&self, object_type: ObjectType, query: &ListQuery) -> CrmResult<Value> {
        let mut params = vec![("limit", query.limit.to_string())];
        if let Some(after) = query.after.as_ref() {
            params.push(("after", after.clone()));
        }
        if !query.properties.is_empty() {
            params.push(("properties", query.properties.join(",")));
        }
        let request = self
            .request(Method::GET, &["objects", object_type.as_str()])?
            .query(&params);
        Self::send(request).await
    }

    async fn get_object(
        &self,
        object_type: ObjectType,
        id: &str,
        properties: &[String],
    ) -> CrmResult<Value> {
        let mut request = self.request(Method::GET, &["objects", object_type.as_str(), id])?;
        if !properties.is_empty() {
            request = request.query(&[("properties", properties.join(","))]);
        }
        Self::send(request).await
    }

    async fn create_object(
        &self,
        object_type: ObjectType,
        properties: PropertyMap,
    ) -> CrmResult<Value> {
        let request = self
            .request(Method::POST, &["objects", object_type.as_str()])?
            .json(&json!({ "properties": properties }));
        Self::send(request).await
    }

    async fn update_object(
        &self,
        object_type: ObjectType,
        id: &str,
        properties: PropertyMap,
    ) -> CrmResult<Value> {
        let request = self
            .request(Method::PATCH, &["objects", object_type.as_str(), id])?
            .json(&json!({ "properties": properties }));
        Self::send(request).await
    }

    async fn delete_object(&self, object_type: ObjectType, id: &str) -> CrmResult<()> {
        let request = self.request(Method::DELETE, &["objects", object_type.as_str(), id])?;
        Self::send(request).await?;
        Ok(())
    }

    async fn search_objects(
        &self,
        object_type: ObjectType,
        request: &SearchRequest,
    ) -> CrmResult<Value> {
        let builder = self
            .request(Method::POST, &["objects", object_type.as_str(), "search"])?
            .json(request);
        Self::send(builder).await
    }

    async fn batch_read(
        &self,
        object_type: ObjectType,
        ids: &[String],
        properties: &[String],
    ) -> CrmResult<Value> {
        let inputs: Vec<Value> = ids.iter().map(|id| json!({ "id": id })).collect();
        let request = self
            .request(Method::POST, &["objects", object_type.as_str(), "batch", "read"])?
            .json(&json!({ "inputs": inputs, "properties": properties }));
        Self::send(request).await
    }

    async fn create_association(&self, link: &AssociationLink) -> CrmResult<Value> {
        let request = self.request(
            Method::PUT,
            &[
                "objects",
                link.from_type.as_str(),
                link.from_id.as_str(),
                "associations",
                link.to_type.as_str(),
                link.to_id.as_str(),
                link.label,
            ],
        )?;
        Self::send(request).await
    }

    async fn list_associations(
        &self,
        from_type: ObjectType,
        id: &str,
        to_type: ObjectType,
    ) -> CrmResult<Value> {
        let request = self.request(
            Method::GET,
            &["objects", from_type.as_str(), id, "associations", to_type.as_str()],
        )?;
        Self::send(request).await
    }

    async fn list_properties(&self, object_type: ObjectType) -> CrmResult<Value> {
        let request = self.request(Method::GET, &["properties", object_type.as_str()])?;
        Self::send(request).await
    }

    async fn list_deal_pipelines(&self) -> CrmResult<Value> {
        let request = self.request(Method::GET, &["pipelines", "deals"])?;
        Self::send(request).await
    }

    async fn list_owners(&self, query: &OwnerQuery) -> CrmResult<Value> {
        let mut params = vec![("limit", query.limit.to_string())];
        if let Some(after) = query.after.as_ref() {
            params.push(("after", after.clone()));
        }
        if let Some(email) = query.email.as_ref() {
            params.push(("email", email.clone()));
        }
        let request = self.request(Method::GET, &["owners"])?.query(&params);
        Self::send(request).await
    }
}

/// Builder for [`HttpCrmClient`].
#[derive(Debug, Default)]
pub struct HttpCrmClientBuilder {
    base_url: Option<String>,
    access_token: Option<String>,
    user_agent: Option<String>,
}

impl HttpCrmClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the bearer credential. Blank values count as absent.
    #[must_use]
    pub fn access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token.filter(|value| !value.trim().is_empty());
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    /// Returns `CrmError::InvalidUrl` for an unparseable base URL and
    /// `CrmError::Http` if the HTTP client cannot be constructed.
    pub fn build(self) -> CrmResult<HttpCrmClient> {
        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("crm-mcp/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        Ok(HttpCrmClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                access_token: self.access_token,
            }),
        })
    }
}
