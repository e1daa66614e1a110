use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::Currency;
use crate::OrderId;
use crate::Rank;
use crate::VesselId;

/// Body of `POST bz-order/bulk`: one order is created per position.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BulkOrderRequest {
    pub vessel: VesselId,
    pub positions: Vec<Rank>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wage: Option<f64>,
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(default)]
    pub uniform: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_plus: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_minus: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// Query of `GET bz-order`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOrdersQuery {
    pub vessel: VesselId,
    pub posts_per_page: i64,
}

impl ListOrdersQuery {
    /// WordPress reads `posts_per_page=-1` as "no paging".
    pub fn all_for(vessel: VesselId) -> Self {
        Self {
            vessel,
            posts_per_page: -1,
        }
    }
}

/// Body of `DELETE bz-order/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeleteOrderRequest {
    pub id: OrderId,
    pub force: String,
}

impl DeleteOrderRequest {
    /// Deletes the post instead of moving it to the trash.
    pub fn forced(id: OrderId) -> Self {
        Self {
            id,
            force: "true".to_string(),
        }
    }
}
