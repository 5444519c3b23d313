//! HTTP-backed `ResourceApi` for any `AdminResource`

use std::marker::PhantomData;

use async_trait::async_trait;

use super::{ApiClient, HttpMethod, ListParams, Payload};
use crate::error::ApiResult;
use crate::models::Page;
use crate::resource::{AdminResource, ResourceApi};

pub struct HttpResourceApi<R: AdminResource> {
    client: ApiClient,
    _resource: PhantomData<R>,
}

impl<R: AdminResource> HttpResourceApi<R> {
    pub fn new(client: ApiClient) -> Self {
        Self { client, _resource: PhantomData }
    }
}

#[async_trait(?Send)]
impl<R: AdminResource> ResourceApi for HttpResourceApi<R> {
    type Item = R::Item;
    type File = web_sys::File;

    async fn list(&self, params: &ListParams) -> ApiResult<Page<R::Item>> {
        self.client.get_list(R::ENDPOINT, params).await
    }

    async fn create(&self, payload: Payload<web_sys::File>) -> ApiResult<Option<String>> {
        self.client.send_payload(HttpMethod::Post, R::ENDPOINT, &payload).await
    }

    async fn update(&self, id: &str, payload: Payload<web_sys::File>) -> ApiResult<Option<String>> {
        self.client.send_payload(HttpMethod::Put, &R::item_path(id), &payload).await
    }

    async fn remove(&self, id: &str) -> ApiResult<Option<String>> {
        self.client.delete(&R::item_path(id)).await
    }
}
