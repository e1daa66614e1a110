pub mod currency;
pub mod directory;
pub mod lenient;
pub mod order;
pub mod rank;
pub mod requests;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use thiserror::Error;

pub use currency::Currency;
pub use directory::Principal;
pub use directory::Vessel;
pub use order::Order;
pub use order::OrderSet;
pub use order::OrderStatus;
pub use order::Seaman;
pub use rank::Department;
pub use rank::Rank;
pub use requests::BulkOrderRequest;
pub use requests::DeleteOrderRequest;
pub use requests::ListOrdersQuery;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContractError {
    #[error("unknown rank code: {0}")]
    UnknownRank(String),
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

// WordPress hands out post ids as numbers in some routes and as strings in
// others, so every id newtype accepts both.
macro_rules! post_id {
    ($name:ident) => {
        #[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ContractError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map($name)
                    .map_err(|_| ContractError::InvalidId(s.to_string()))
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                $name(value)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let value = serde_json::Value::deserialize(deserializer)?;
                lenient::u64_from_value(&value)
                    .map($name)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}

post_id!(OrderId);
post_id!(VesselId);
post_id!(PrincipalId);
