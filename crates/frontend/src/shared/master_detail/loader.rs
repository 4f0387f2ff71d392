//! Загрузка коллекций с backend.
//!
//! Без повторов, кэша и оптимистичных правок: каждая операция: один запрос,
//! мутации возвращают каноническую запись сервера.

use super::errors::LoadError;
use crate::shared::api_utils::api_base;
use contracts::domain::common::{DocumentLine, DocumentStatus, StatusChangeRequest};
use contracts::shared::list_query::ListQuery;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Удаленная коллекция записей
#[allow(async_fn_in_trait)]
pub trait RemoteCollection {
    type Item;
    type Draft;

    async fn fetch_all(&self, query: &ListQuery) -> Result<Vec<Self::Item>, LoadError>;
    async fn fetch_by_id(&self, id: &str) -> Result<Self::Item, LoadError>;
    /// Записи, подчиненные родителю, например `by-warehouse/{id}`
    async fn fetch_by_parent_id(&self, parent: &str, id: &str)
        -> Result<Vec<Self::Item>, LoadError>;
    async fn add(&self, draft: &Self::Draft) -> Result<Self::Item, LoadError>;
    async fn update(&self, draft: &Self::Draft) -> Result<Self::Item, LoadError>;
    async fn delete(&self, id: &str) -> Result<(), LoadError>;
}

/// Коллекция поверх `/api/<collection>`
pub struct HttpCollection<Item, Draft> {
    collection: &'static str,
    _marker: PhantomData<fn() -> (Item, Draft)>,
}

impl<Item, Draft> Clone for HttpCollection<Item, Draft> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Item, Draft> Copy for HttpCollection<Item, Draft> {}

impl<Item, Draft> HttpCollection<Item, Draft> {
    pub const fn new(collection: &'static str) -> Self {
        Self {
            collection,
            _marker: PhantomData,
        }
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    fn url(&self, tail: &str) -> String {
        format!("{}{}", api_base(), collection_path(self.collection, tail))
    }
}

/// Путь ресурса коллекции: `/api/<collection>[/tail]`
pub fn collection_path(collection: &str, tail: &str) -> String {
    let tail = tail.trim_matches('/');
    if tail.is_empty() {
        format!("/api/{}", collection)
    } else {
        format!("/api/{}/{}", collection, tail)
    }
}

/// Путь списка с параметрами отбора
pub fn list_path(collection: &str, query: &ListQuery) -> Result<String, LoadError> {
    let path = collection_path(collection, "");
    if query.is_empty() {
        return Ok(path);
    }
    let qs = serde_qs::to_string(query).map_err(|e| LoadError::Decode(e.to_string()))?;
    Ok(format!("{}?{}", path, qs))
}

async fn send(request: Request) -> Result<Response, LoadError> {
    request
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))
}

/// Неуспешный ответ превращается в `LoadError`; все, кроме 404, пишется в лог
async fn ensure_ok(response: Response) -> Result<Response, LoadError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let url = response.url();
    let body = response.text().await.unwrap_or_default();
    let err = LoadError::from_status(status, &body);
    if should_log(&err) {
        log::error!("request to {} failed: {}", url, err);
    }
    Err(err)
}

/// 404 для выбранной записи означает пустую деталь, а не сбой
fn should_log(err: &LoadError) -> bool {
    !err.is_not_found()
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, LoadError> {
    ensure_ok(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| LoadError::Decode(e.to_string()))
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, LoadError> {
    read_json(send(Request::get(url).build().map_err(network)?).await?).await
}

async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, LoadError> {
    let request = Request::post(url).json(body).map_err(network)?;
    read_json(send(request).await?).await
}

async fn put_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, LoadError> {
    let request = Request::put(url).json(body).map_err(network)?;
    read_json(send(request).await?).await
}

fn network(e: gloo_net::Error) -> LoadError {
    LoadError::Network(e.to_string())
}

impl<Item, Draft> RemoteCollection for HttpCollection<Item, Draft>
where
    Item: DeserializeOwned,
    Draft: Serialize,
{
    type Item = Item;
    type Draft = Draft;

    async fn fetch_all(&self, query: &ListQuery) -> Result<Vec<Item>, LoadError> {
        let url = format!("{}{}", api_base(), list_path(self.collection, query)?);
        get_json(&url).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Item, LoadError> {
        get_json(&self.url(id)).await
    }

    async fn fetch_by_parent_id(&self, parent: &str, id: &str) -> Result<Vec<Item>, LoadError> {
        get_json(&self.url(&format!("{}/{}", parent, id))).await
    }

    async fn add(&self, draft: &Draft) -> Result<Item, LoadError> {
        post_json(&self.url(""), draft).await
    }

    /// Backend делает upsert по `id` черновика
    async fn update(&self, draft: &Draft) -> Result<Item, LoadError> {
        post_json(&self.url(""), draft).await
    }

    async fn delete(&self, id: &str) -> Result<(), LoadError> {
        let request = Request::delete(&self.url(id)).build().map_err(network)?;
        ensure_ok(send(request).await?).await?;
        Ok(())
    }
}

// Операции документов со строками
impl<Item: DeserializeOwned, Draft> HttpCollection<Item, Draft> {
    pub async fn fetch_lines(&self, id: &str) -> Result<Vec<DocumentLine>, LoadError> {
        get_json(&self.url(&format!("{}/lines", id))).await
    }

    pub async fn save_lines(&self, id: &str, lines: &[DocumentLine]) -> Result<Item, LoadError> {
        put_json(&self.url(&format!("{}/lines", id)), &lines).await
    }

    pub async fn change_status(&self, id: &str, status: DocumentStatus) -> Result<Item, LoadError> {
        post_json(
            &self.url(&format!("{}/status", id)),
            &StatusChangeRequest { status },
        )
        .await
    }

    /// POST на произвольное действие коллекции, например `from-requisition`
    pub async fn post_action<B: Serialize>(&self, action: &str, body: &B) -> Result<Item, LoadError> {
        post_json(&self.url(action), body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_collection_path() {
        assert_eq!(collection_path("requisition", ""), "/api/requisition");
        assert_eq!(collection_path("requisition", "abc/lines"), "/api/requisition/abc/lines");
        assert_eq!(
            collection_path("transfer", "/by-warehouse/w1/"),
            "/api/transfer/by-warehouse/w1"
        );
    }

    #[test]
    fn test_failures_other_than_not_found_are_logged() {
        assert!(!should_log(&LoadError::from_status(404, "")));
        assert!(should_log(&LoadError::from_status(
            409,
            r#"{"error":"Solo se puede eliminar una solicitud pendiente"}"#
        )));
        assert!(should_log(&LoadError::Network("offline".into())));
    }

    #[test]
    fn test_list_path_without_filters() {
        assert_eq!(
            list_path("supplier", &ListQuery::default()).unwrap(),
            "/api/supplier"
        );
    }

    #[test]
    fn test_list_path_with_filters() {
        let query = ListQuery {
            date_from: NaiveDate::from_ymd_opt(2024, 1, 10),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 20),
            status: Some(DocumentStatus::Aprobado),
            search: None,
        };
        assert_eq!(
            list_path("requisition", &query).unwrap(),
            "/api/requisition?date_from=2024-01-10&date_to=2024-01-20&status=Aprobado"
        );
    }
}
