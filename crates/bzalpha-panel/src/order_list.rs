use std::collections::BTreeMap;
use std::collections::BTreeSet;

use bzalpha_client::AuthToken;
use bzalpha_client::OrderService;
use bzalpha_contracts::DeleteOrderRequest;
use bzalpha_contracts::ListOrdersQuery;
use bzalpha_contracts::Order;
use bzalpha_contracts::OrderId;
use bzalpha_contracts::OrderStatus;
use bzalpha_contracts::VesselId;
use serde_json::Value;
use tracing::Level;
use tracing::event;

use crate::ConfirmDialog;
use crate::RankAvatar;

/// Inline detail shown under a pending order.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDetails {
    pub order: Order,
}

impl PendingDetails {
    /// Labelled values of the order, skipping the ones that are not set.
    pub fn fields(&self) -> Vec<(String, String)> {
        let order = &self.order;
        let mut fields = Vec::new();
        let mut push = |label: &str, value: Option<String>| {
            if let Some(value) = value {
                fields.push((label.to_string(), value));
            }
        };

        push(
            "Wage",
            order.wage.map(|wage| match &order.currency {
                Some(currency) => format!("{wage} {currency}"),
                None => wage.to_string(),
            }),
        );
        push("Port", order.port.clone());
        push(
            "Uniform",
            order.uniform.map(|uniform| if uniform { "Yes" } else { "No" }.to_string()),
        );
        push("Join Date", order.sign_on.clone());
        push("Deadline", order.deadline.clone());
        if order.contract_plus.is_some() || order.contract_minus.is_some() {
            push(
                "Contract",
                Some(format!(
                    "+{}/-{}",
                    order.contract_plus.unwrap_or_default(),
                    order.contract_minus.unwrap_or_default()
                )),
            );
        }
        push("Remark", order.remark.clone());
        for (key, value) in &order.extra {
            let text = match value {
                Value::Null => continue,
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            push(key, Some(text));
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: OrderId,
    pub avatar: RankAvatar,
    pub id_label: String,
    pub status: OrderStatus,
    pub details: Option<String>,
    pub expansion: Option<PendingDetails>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListRender {
    Loading,
    Empty,
    Table(Vec<OrderRow>),
}

/// The orders of one vessel.
///
/// The vessel is fixed for the lifetime of the view: showing another vessel
/// means building a new view and mounting it.
#[derive(Debug, Clone)]
pub struct OrderListView {
    vessel: VesselId,
    orders: BTreeMap<OrderId, Order>,
    expanded: BTreeSet<OrderId>,
    loading: bool,
}

impl OrderListView {
    pub fn new(vessel: VesselId) -> Self {
        Self {
            vessel,
            orders: BTreeMap::new(),
            expanded: BTreeSet::new(),
            loading: true,
        }
    }

    pub fn vessel(&self) -> VesselId {
        self.vessel
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn orders(&self) -> &BTreeMap<OrderId, Order> {
        &self.orders
    }

    /// Initial fetch. A failed fetch leaves the previous orders in place and
    /// is only logged.
    pub async fn mount<S: OrderService>(&mut self, service: &S, token: &AuthToken) {
        self.loading = true;

        match service
            .list_orders(token, &ListOrdersQuery::all_for(self.vessel))
            .await
        {
            Ok(orders) => {
                self.orders = orders.into_inner();
                self.expanded = self.orders.keys().copied().collect();
            }
            Err(error) => {
                event!(Level::WARN, %error, vessel = %self.vessel, "orders could not be loaded");
            }
        }

        self.loading = false;
    }

    /// Dialog to show before `delete`. `None` for ids that are not listed.
    pub fn request_delete(&self, id: OrderId) -> Option<ConfirmDialog> {
        self.orders
            .contains_key(&id)
            .then(|| ConfirmDialog::cancel_order(id))
    }

    /// Force-deletes the order and drops it from the view once the backend
    /// agreed. A failed delete is only logged.
    pub async fn delete<S: OrderService>(&mut self, service: &S, token: &AuthToken, id: OrderId) {
        self.loading = true;

        match service
            .delete_order(token, &DeleteOrderRequest::forced(id))
            .await
        {
            Ok(()) => {
                self.remove(id);
            }
            Err(error) => {
                event!(Level::WARN, %error, %id, "order could not be deleted");
            }
        }

        self.loading = false;
    }

    pub fn remove(&mut self, id: OrderId) -> Option<Order> {
        self.expanded.remove(&id);
        self.orders.remove(&id)
    }

    pub fn toggle_expansion(&mut self, id: OrderId) {
        if !self.orders.contains_key(&id) {
            return;
        }
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn render(&self) -> ListRender {
        if self.loading {
            return ListRender::Loading;
        }
        if self.orders.is_empty() {
            return ListRender::Empty;
        }

        let rows = self
            .orders
            .values()
            .map(|order| OrderRow {
                id: order.id,
                avatar: RankAvatar::for_position(order.position()),
                id_label: order.id_label(),
                status: order.status.clone(),
                details: order.seaman_details().map(str::to_string),
                expansion: (order.status.is_pending() && self.expanded.contains(&order.id))
                    .then(|| PendingDetails {
                        order: order.clone(),
                    }),
            })
            .collect();
        ListRender::Table(rows)
    }
}
