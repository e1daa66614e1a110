mod auth;
mod error;
mod rest;

use bzalpha_contracts::BulkOrderRequest;
use bzalpha_contracts::DeleteOrderRequest;
use bzalpha_contracts::ListOrdersQuery;
use bzalpha_contracts::OrderSet;
use bzalpha_contracts::Principal;
use bzalpha_contracts::PrincipalId;
use bzalpha_contracts::Vessel;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use auth::AuthToken;
pub use auth::CookieJar;
pub use auth::parse_cookies;
pub use error::ClientError;
pub use reqwest::StatusCode;
pub use rest::RestOrderService;

pub type ClientResult<T> = Result<T, ClientError>;

/// Routes relative to the bzalpha namespace.
pub mod routes {
    pub const ORDERS: &str = "bz-order";
    pub const BULK_ORDERS: &str = "bz-order/bulk";
    pub const PRINCIPALS: &str = "principal";
    pub const VESSELS: &str = "vessel";
}

/// The order resource of the backend.
///
/// Every call takes the bearer credential explicitly; implementations must
/// not keep one around between calls.
#[allow(async_fn_in_trait)]
pub trait OrderService {
    async fn create_orders(&self, token: &AuthToken, request: &BulkOrderRequest)
    -> ClientResult<()>;

    async fn list_orders(&self, token: &AuthToken, query: &ListOrdersQuery)
    -> ClientResult<OrderSet>;

    async fn delete_order(&self, token: &AuthToken, request: &DeleteOrderRequest)
    -> ClientResult<()>;

    /// Raw records of a collection route, used by the remote selectors.
    async fn fetch_records(
        &self,
        token: &AuthToken,
        route: &str,
        params: &[(String, String)],
    ) -> ClientResult<Vec<Value>>;

    async fn list_principals(
        &self,
        token: &AuthToken,
        search: Option<&str>,
    ) -> ClientResult<Vec<Principal>> {
        let mut params = Vec::new();
        if let Some(search) = search {
            params.push(("search".to_string(), search.to_string()));
        }
        let records = self.fetch_records(token, routes::PRINCIPALS, &params).await?;
        decode_records(records)
    }

    async fn list_vessels(
        &self,
        token: &AuthToken,
        principal: Option<PrincipalId>,
        search: Option<&str>,
    ) -> ClientResult<Vec<Vessel>> {
        let mut params = Vec::new();
        if let Some(principal) = principal {
            params.push(("principal".to_string(), principal.to_string()));
        }
        if let Some(search) = search {
            params.push(("search".to_string(), search.to_string()));
        }
        let records = self.fetch_records(token, routes::VESSELS, &params).await?;
        decode_records(records)
    }
}

fn decode_records<T: DeserializeOwned>(records: Vec<Value>) -> ClientResult<Vec<T>> {
    records
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<T>, _>>()
        .map_err(ClientError::Decode)
}
