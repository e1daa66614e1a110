use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Mutex;

use bzalpha_client::AuthToken;
use bzalpha_client::ClientError;
use bzalpha_client::ClientResult;
use bzalpha_client::OrderService;
use bzalpha_client::StatusCode;
use bzalpha_contracts::BulkOrderRequest;
use bzalpha_contracts::DeleteOrderRequest;
use bzalpha_contracts::ListOrdersQuery;
use bzalpha_contracts::Order;
use bzalpha_contracts::OrderId;
use bzalpha_contracts::OrderSet;
use bzalpha_contracts::OrderStatus;
use serde_json::Value;

/// In-memory backend that records every call it receives.
#[derive(Default)]
pub struct FakeOrderService {
    pub orders: Mutex<BTreeMap<OrderId, Order>>,
    pub records: HashMap<&'static str, Vec<Value>>,
    pub fail_create: bool,
    pub fail_list: bool,
    pub fail_delete: bool,
    pub creates: Mutex<Vec<BulkOrderRequest>>,
    pub lists: Mutex<Vec<ListOrdersQuery>>,
    pub deletes: Mutex<Vec<DeleteOrderRequest>>,
    pub fetches: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeOrderService {
    pub fn with_orders(self, orders: impl IntoIterator<Item = Order>) -> Self {
        *self.orders.lock().unwrap() = orders.into_iter().map(|order| (order.id, order)).collect();
        self
    }

    pub fn with_records(mut self, route: &'static str, records: Vec<Value>) -> Self {
        self.records.insert(route, records);
        self
    }

    pub fn creates(&self) -> Vec<BulkOrderRequest> {
        self.creates.lock().unwrap().clone()
    }

    pub fn lists(&self) -> Vec<ListOrdersQuery> {
        self.lists.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<DeleteOrderRequest> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.fetches.lock().unwrap().clone()
    }
}

fn server_error() -> ClientError {
    ClientError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "{\"code\":\"internal_server_error\"}".to_string(),
    }
}

pub fn order(id: u64, position: &str, status: &str) -> Order {
    Order::new(OrderId(id), position, OrderStatus::from(status.to_string()))
}

impl OrderService for FakeOrderService {
    async fn create_orders(&self, _token: &AuthToken, request: &BulkOrderRequest) -> ClientResult<()> {
        self.creates.lock().unwrap().push(request.clone());
        if self.fail_create {
            return Err(server_error());
        }
        Ok(())
    }

    async fn list_orders(&self, _token: &AuthToken, query: &ListOrdersQuery) -> ClientResult<OrderSet> {
        self.lists.lock().unwrap().push(*query);
        if self.fail_list {
            return Err(server_error());
        }
        Ok(OrderSet(self.orders.lock().unwrap().clone()))
    }

    async fn delete_order(&self, _token: &AuthToken, request: &DeleteOrderRequest) -> ClientResult<()> {
        self.deletes.lock().unwrap().push(request.clone());
        if self.fail_delete {
            return Err(server_error());
        }
        self.orders.lock().unwrap().remove(&request.id);
        Ok(())
    }

    async fn fetch_records(
        &self,
        _token: &AuthToken,
        route: &str,
        params: &[(String, String)],
    ) -> ClientResult<Vec<Value>> {
        self.fetches
            .lock()
            .unwrap()
            .push((route.to_string(), params.to_vec()));
        Ok(self.records.get(route).cloned().unwrap_or_default())
    }
}
