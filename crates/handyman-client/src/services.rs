use handyman_types::{Category, CategoryList, Service, ServicePage, ServiceQuery};

use crate::error::Result;
use crate::request::{ApiClient, RequestOptions, with_query};

pub const CATEGORIES_PATH: &str = "/services/categories";
pub const SERVICES_PATH: &str = "/services";

pub struct ServiceApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ServiceApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>> {
        let list: CategoryList = self
            .client
            .request_as(CATEGORIES_PATH, RequestOptions::get())
            .await?;
        Ok(list.into_vec())
    }

    pub async fn get_services(&self, query: &ServiceQuery) -> Result<ServicePage> {
        let path = with_query(SERVICES_PATH, &query.pairs());
        self.client.request_as(&path, RequestOptions::get()).await
    }

    pub async fn get_service_by_id(&self, id: i64) -> Result<Service> {
        let path = format!("{}/{}", SERVICES_PATH, id);
        self.client.request_as(&path, RequestOptions::get()).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{FakeTransport, Script, client_with};

    fn service_json(id: i64) -> serde_json::Value {
        json!({
            "service_id": id,
            "service_name": "Deep cleaning",
            "description": "Top to bottom",
            "base_price": 199.0,
            "category_id": 3,
            "image": "/static/service-1.jpg",
            "duration": 2,
            "status": "active"
        })
    }

    #[tokio::test]
    async fn categories_accept_bare_and_wrapped_shapes() {
        let cats = json!([{ "id": 1, "name": "Cleaning", "icon": "/static/icons/clean.svg" }]);
        let transport = FakeTransport::new()
            .reply(200, json!({ "code": 200, "data": cats.clone() }))
            .reply(200, json!({ "code": 200, "data": { "data": cats } }));
        let (client, _storage) = client_with(transport);

        let first = client.services().get_categories().await.unwrap();
        let second = client.services().get_categories().await.unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        assert_eq!(first[0].name, "Cleaning");
    }

    #[tokio::test]
    async fn services_query_string_and_page_shape() {
        let page = json!({
            "services": [service_json(11)],
            "total": 7,
            "page": 2,
            "page_size": 5
        });
        let transport = FakeTransport::new().reply(200, json!({ "code": 200, "data": page }));
        let (client, _storage) = client_with(transport.clone());

        let query = ServiceQuery {
            category_id: Some(3),
            page: Some(2),
            page_size: Some(5),
            ..Default::default()
        };
        let result = client.services().get_services(&query).await.unwrap();

        let url = transport.requests().remove(0).url;
        let (_, qs) = url.split_once('?').unwrap();
        let mut params: Vec<&str> = qs.split('&').collect();
        params.sort();
        assert_eq!(params, vec!["category_id=3", "page=2", "page_size=5"]);

        assert_eq!(result.total, 7);
        assert_eq!(result.page, 2);
        assert_eq!(result.page_size, 5);
        assert_eq!(result.services.len(), 1);
        assert_eq!(result.services[0].service_id, 11);
        assert_eq!(result.services[0].base_price, 199.0);
    }

    #[tokio::test]
    async fn extra_params_reach_the_query_string() {
        let transport = FakeTransport::new().reply(
            200,
            json!({ "services": [], "total": 0, "page": 1, "page_size": 10 }),
        );
        let (client, _storage) = client_with(transport.clone());

        let query = ServiceQuery {
            category_id: Some(1),
            extra: vec![("keyword".into(), "water heater".into())],
            ..Default::default()
        };
        client.services().get_services(&query).await.unwrap();

        assert_eq!(
            transport.requests()[0].url,
            "http://localhost:8000/services?category_id=1&keyword=water+heater"
        );
    }

    #[tokio::test]
    async fn services_without_params_has_no_query() {
        let transport = FakeTransport::new().reply(
            200,
            json!({ "services": [], "total": 0, "page": 1, "page_size": 10 }),
        );
        let (client, _storage) = client_with(transport.clone());

        let page = client.services().get_services(&ServiceQuery::default()).await.unwrap();

        assert!(page.services.is_empty());
        assert_eq!(transport.requests()[0].url, "http://localhost:8000/services");
    }

    #[tokio::test]
    async fn service_by_id_uses_path_parameter() {
        let transport = FakeTransport::new().reply(200, json!({ "code": 200, "data": service_json(9) }));
        let (client, _storage) = client_with(transport.clone());

        let service = client.services().get_service_by_id(9).await.unwrap();

        assert_eq!(service.service_id, 9);
        assert_eq!(transport.requests()[0].url, "http://localhost:8000/services/9");
    }
}
