//! Convenience verbs.
//!
//! Parameter-shaping adapters over [`Pipeline::request`]; each fixes the
//! HTTP method and forwards everything else unchanged.

use std::collections::HashMap;

use reqwest::Method;

use super::Pipeline;
use crate::error::PipelineError;
use crate::types::{RequestDescriptor, ResponseEnvelope};

impl Pipeline {
    pub async fn get(&self, path: &str) -> Result<ResponseEnvelope, PipelineError> {
        self.request(RequestDescriptor::builder(path).build()).await
    }

    pub async fn get_with(
        &self,
        path: &str,
        query: HashMap<String, String>,
    ) -> Result<ResponseEnvelope, PipelineError> {
        self.request(RequestDescriptor::builder(path).queries(query).build())
            .await
    }

    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<ResponseEnvelope, PipelineError> {
        self.request(
            RequestDescriptor::builder(path)
                .method(Method::POST)
                .body(body)
                .build(),
        )
        .await
    }

    /// POST with the body transmitted as `multipart/form-data`.
    pub async fn post_form(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<ResponseEnvelope, PipelineError> {
        self.request(
            RequestDescriptor::builder(path)
                .method(Method::POST)
                .body(body)
                .form_data(true)
                .build(),
        )
        .await
    }

    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<ResponseEnvelope, PipelineError> {
        self.request(
            RequestDescriptor::builder(path)
                .method(Method::PUT)
                .body(body)
                .build(),
        )
        .await
    }

    pub async fn delete(&self, path: &str) -> Result<ResponseEnvelope, PipelineError> {
        self.request(
            RequestDescriptor::builder(path)
                .method(Method::DELETE)
                .build(),
        )
        .await
    }
}
