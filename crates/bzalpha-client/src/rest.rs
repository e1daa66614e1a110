use bzalpha_contracts::BulkOrderRequest;
use bzalpha_contracts::DeleteOrderRequest;
use bzalpha_contracts::ListOrdersQuery;
use bzalpha_contracts::OrderSet;
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::Response;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::Level;
use tracing::event;
use tracing::instrument;
use url::Url;

use crate::AuthToken;
use crate::ClientError;
use crate::ClientResult;
use crate::OrderService;
use crate::routes;

/// `OrderService` over HTTP against the bzalpha namespace.
#[derive(Debug, Clone)]
pub struct RestOrderService {
    client: Client,
    base: Url,
}

impl RestOrderService {
    /// `api_base` is the namespace root, e.g.
    /// `https://crew.example.com/wp-json/bzalpha/v1/`.
    pub fn new(api_base: &str) -> ClientResult<Self> {
        let mut base = Url::parse(api_base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder().build()?;
        Ok(Self { client, base })
    }

    pub fn endpoint(&self, route: &str) -> ClientResult<Url> {
        Ok(self.base.join(route.trim_start_matches('/'))?)
    }

    async fn send(request: RequestBuilder, token: &AuthToken) -> ClientResult<Response> {
        let response = request.header(AUTHORIZATION, token.bearer()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            event!(Level::WARN, %status, body = %body, "backend rejected the request");
            return Err(ClientError::Status { status, body });
        }
        Ok(response)
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl OrderService for RestOrderService {
    #[instrument(level = "debug", skip(self, token), fields(vessel = %request.vessel))]
    async fn create_orders(
        &self,
        token: &AuthToken,
        request: &BulkOrderRequest,
    ) -> ClientResult<()> {
        let url = self.endpoint(routes::BULK_ORDERS)?;
        Self::send(self.client.post(url).json(request), token).await?;

        event!(
            Level::INFO,
            vessel = %request.vessel,
            positions = request.positions.len(),
            "orders created"
        );
        Ok(())
    }

    #[instrument(level = "debug", skip(self, token), fields(vessel = %query.vessel))]
    async fn list_orders(&self, token: &AuthToken, query: &ListOrdersQuery) -> ClientResult<OrderSet> {
        let url = self.endpoint(routes::ORDERS)?;
        let response = Self::send(self.client.get(url).query(query), token).await?;

        let orders: OrderSet = Self::decode(response).await?;
        event!(Level::DEBUG, count = orders.0.len(), "orders listed");
        Ok(orders)
    }

    #[instrument(level = "debug", skip(self, token), fields(id = %request.id))]
    async fn delete_order(&self, token: &AuthToken, request: &DeleteOrderRequest) -> ClientResult<()> {
        let url = self.endpoint(&format!("{}/{}", routes::ORDERS, request.id))?;
        Self::send(self.client.delete(url).json(request), token).await?;

        event!(Level::INFO, id = %request.id, "order deleted");
        Ok(())
    }

    #[instrument(level = "debug", skip(self, token))]
    async fn fetch_records(
        &self,
        token: &AuthToken,
        route: &str,
        params: &[(String, String)],
    ) -> ClientResult<Vec<Value>> {
        let url = self.endpoint(route)?;
        let response = Self::send(self.client.get(url).query(params), token).await?;

        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_joined_onto_the_namespace() {
        let service = RestOrderService::new("https://crew.example.com/wp-json/bzalpha/v1").unwrap();

        assert_eq!(
            service.endpoint(routes::BULK_ORDERS).unwrap().as_str(),
            "https://crew.example.com/wp-json/bzalpha/v1/bz-order/bulk"
        );
        assert_eq!(
            service.endpoint("/bz-order/7").unwrap().as_str(),
            "https://crew.example.com/wp-json/bzalpha/v1/bz-order/7"
        );
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        assert!(matches!(
            RestOrderService::new("not a url"),
            Err(ClientError::Url(_))
        ));
    }
}
