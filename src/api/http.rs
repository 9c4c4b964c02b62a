//! HTTP implementation of [`ResumeApi`] on top of `reqwest`.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{ApiError, ListResponse, ResumeApi, ResumePayload, RESOURCE_PATH};
use crate::models::{ListResult, RecordId, ResumeRecord};

/// REST client for the résumé resource
#[derive(Debug, Clone)]
pub struct HttpResumeApi {
    client: Client,
    base_url: String,
}

impl HttpResumeApi {
    /// `base_url` is the API root, e.g. `http://127.0.0.1:8000/api/`
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, RESOURCE_PATH)
    }

    pub fn record_url(&self, id: RecordId) -> String {
        format!("{}{}{}/", self.base_url, RESOURCE_PATH, id)
    }

    async fn send(&self, what: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!("{} failed: {}", what, e);
            ApiError::from(e)
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("{} returned {} with an unreadable body: {}", what, status, e);
                String::new()
            }
        };
        let err = ApiError::from_response(status.as_u16(), &body);
        warn!("{} returned {}: {}", what, status, err);
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(&self, what: &str, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(what, request).await?;
        response.json::<T>().await.map_err(|e| {
            warn!("{} returned an unreadable body: {}", what, e);
            ApiError::Decode(e.to_string())
        })
    }

    fn write_request(&self, request: RequestBuilder, payload: &ResumePayload) -> Result<RequestBuilder, ApiError> {
        if payload.has_file() {
            Ok(request.multipart(payload.to_multipart()?))
        } else {
            Ok(request.json(&payload.to_json()))
        }
    }
}

#[async_trait(?Send)]
impl ResumeApi for HttpResumeApi {
    async fn list(&self, page: u32, search: &str) -> Result<ListResult, ApiError> {
        let mut params = vec![("page", page.to_string())];
        if !search.is_empty() {
            params.push(("search", search.to_string()));
        }
        debug!("GET {} page={} search={:?}", RESOURCE_PATH, page, search);
        let request = self.client.get(self.collection_url()).query(&params);
        let response: ListResponse = self.send_json("list résumés", request).await?;
        Ok(response.into())
    }

    async fn get(&self, id: RecordId) -> Result<ResumeRecord, ApiError> {
        debug!("GET {}{}/", RESOURCE_PATH, id);
        self.send_json("get résumé", self.client.get(self.record_url(id))).await
    }

    async fn create(&self, payload: &ResumePayload) -> Result<ResumeRecord, ApiError> {
        debug!("POST {} fields={:?}", RESOURCE_PATH, payload.field_names());
        let request = self
            .client
            .post(self.collection_url())
            .multipart(payload.to_multipart()?);
        let created: ResumeRecord = self.send_json("create résumé", request).await?;
        info!("created résumé {}", created.id);
        Ok(created)
    }

    async fn update(&self, id: RecordId, payload: &ResumePayload) -> Result<ResumeRecord, ApiError> {
        debug!("PUT {}{}/ fields={:?}", RESOURCE_PATH, id, payload.field_names());
        let request = self.write_request(self.client.put(self.record_url(id)), payload)?;
        let updated: ResumeRecord = self.send_json("update résumé", request).await?;
        info!("updated résumé {}", updated.id);
        Ok(updated)
    }

    async fn delete(&self, id: RecordId) -> Result<(), ApiError> {
        debug!("DELETE {}{}/", RESOURCE_PATH, id);
        self.send("delete résumé", self.client.delete(self.record_url(id))).await?;
        info!("deleted résumé {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let api = HttpResumeApi::new("http://127.0.0.1:8000/api");
        assert_eq!(api.collection_url(), "http://127.0.0.1:8000/api/resumes/");
        assert_eq!(api.record_url(12), "http://127.0.0.1:8000/api/resumes/12/");
    }
}
