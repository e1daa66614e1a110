use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use tracing::Level;
use tracing::event;

use crate::OrderId;
use crate::PrincipalId;
use crate::VesselId;
use crate::lenient;

/// Order statuses are owned by the backend. Only `pending` changes how an
/// order is shown, everything else is passed through as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Completed,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Other(status) => status,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Other(String::new())
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => OrderStatus::Pending,
            "completed" => OrderStatus::Completed,
            _ => OrderStatus::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The seaman post linked to an order once someone has been assigned.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Seaman {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub post_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub title: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "order_status", default, deserialize_with = "lenient_status")]
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[serde(serialize_with = "serialize_position")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_record")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seaman: Option<Seaman>,
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_bool")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uniform: Option<bool>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_on: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_i64")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_plus: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional_i64")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_minus: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_record")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vessel: Option<VesselId>,
    #[serde(default, deserialize_with = "lenient::optional_record")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<PrincipalId>,
    /// Everything else the backend attached to the post.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn lenient_status<'de, D>(deserializer: D) -> Result<OrderStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::optional_string(deserializer)?
        .map(OrderStatus::from)
        .unwrap_or_default())
}

fn serialize_position<S>(position: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(position.as_deref().unwrap_or_default())
}

impl Order {
    pub fn new(id: OrderId, position: &str, status: OrderStatus) -> Self {
        Self {
            id,
            status,
            position: Some(position.to_string()).filter(|position| !position.is_empty()),
            seaman: None,
            wage: None,
            currency: None,
            port: None,
            uniform: None,
            sign_on: None,
            deadline: None,
            contract_plus: None,
            contract_minus: None,
            remark: None,
            vessel: None,
            principal: None,
            extra: Map::new(),
        }
    }

    pub fn position(&self) -> &str {
        self.position.as_deref().unwrap_or_default()
    }

    /// `"{position}-{id}"`, followed by the assigned seaman's post title.
    pub fn id_label(&self) -> String {
        let mut label = match self.position() {
            "" => self.id.to_string(),
            position => format!("{}-{}", position, self.id),
        };
        if let Some(post_title) = self
            .seaman
            .as_ref()
            .and_then(|seaman| seaman.post_title.as_deref())
        {
            label.push(' ');
            label.push_str(post_title);
        }
        label
    }

    /// Text for the details column.
    pub fn seaman_details(&self) -> Option<&str> {
        self.seaman.as_ref().and_then(|seaman| seaman.title.as_deref())
    }
}

/// The orders of one vessel keyed by id.
///
/// The list route answers with either a JSON array or an object keyed by
/// post id, depending on how the collection was built server side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderSet(pub BTreeMap<OrderId, Order>);

impl OrderSet {
    pub fn into_inner(self) -> BTreeMap<OrderId, Order> {
        self.0
    }
}

impl FromIterator<Order> for OrderSet {
    fn from_iter<T: IntoIterator<Item = Order>>(iter: T) -> Self {
        OrderSet(iter.into_iter().map(|order| (order.id, order)).collect())
    }
}

impl<'de> Deserialize<'de> for OrderSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Payload {
            List(Vec<Value>),
            Keyed(BTreeMap<String, Value>),
        }

        let records = match Payload::deserialize(deserializer)? {
            Payload::List(records) => records,
            Payload::Keyed(records) => records.into_values().collect(),
        };

        // A single broken post must not hide the rest of the vessel's orders.
        Ok(records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<Order>(record) {
                Ok(order) => Some(order),
                Err(error) => {
                    event!(Level::WARN, %error, "skipping an order that could not be decoded");
                    None
                }
            })
            .collect())
    }
}
