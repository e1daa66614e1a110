use serde::Deserialize;
use serde::Serialize;

use crate::PrincipalId;
use crate::VesselId;
use crate::lenient;

/// Owner of one or more vessels.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    #[serde(default, alias = "title")]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Vessel {
    pub id: VesselId,
    #[serde(default, alias = "title")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::optional_record")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<PrincipalId>,
}
