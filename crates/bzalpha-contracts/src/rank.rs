use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::ContractError;

/// Crew ranks that an order can be raised for. The wire format is the rank
/// code, e.g. `"C/O"`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[serde(try_from = "String", into = "String")]
pub enum Rank {
    Master,
    ChiefOfficer,
    SecondOfficer,
    ThirdOfficer,
    DeckCadet,
    Bosun,
    AbleSeaman,
    OrdinarySeaman,
    Pumpman,
    ChiefEngineer,
    SecondEngineer,
    ThirdEngineer,
    FourthEngineer,
    ElectroTechnicalOfficer,
    EngineCadet,
    Fitter,
    Motorman,
    Oiler,
    Wiper,
    ChiefCook,
    Cook,
    Steward,
    Messman,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Deck,
    Engine,
    Catering,
    Other,
}

impl Rank {
    pub fn code(&self) -> &'static str {
        match self {
            Rank::Master => "MSTR",
            Rank::ChiefOfficer => "C/O",
            Rank::SecondOfficer => "2/O",
            Rank::ThirdOfficer => "3/O",
            Rank::DeckCadet => "D/C",
            Rank::Bosun => "BSN",
            Rank::AbleSeaman => "AB",
            Rank::OrdinarySeaman => "OS",
            Rank::Pumpman => "PMN",
            Rank::ChiefEngineer => "C/E",
            Rank::SecondEngineer => "2/E",
            Rank::ThirdEngineer => "3/E",
            Rank::FourthEngineer => "4/E",
            Rank::ElectroTechnicalOfficer => "ETO",
            Rank::EngineCadet => "E/C",
            Rank::Fitter => "FTR",
            Rank::Motorman => "MM",
            Rank::Oiler => "OLR",
            Rank::Wiper => "WPR",
            Rank::ChiefCook => "CCK",
            Rank::Cook => "COOK",
            Rank::Steward => "STW",
            Rank::Messman => "MSM",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rank::Master => "Master",
            Rank::ChiefOfficer => "Chief Officer",
            Rank::SecondOfficer => "Second Officer",
            Rank::ThirdOfficer => "Third Officer",
            Rank::DeckCadet => "Deck Cadet",
            Rank::Bosun => "Bosun",
            Rank::AbleSeaman => "Able Seaman",
            Rank::OrdinarySeaman => "Ordinary Seaman",
            Rank::Pumpman => "Pumpman",
            Rank::ChiefEngineer => "Chief Engineer",
            Rank::SecondEngineer => "Second Engineer",
            Rank::ThirdEngineer => "Third Engineer",
            Rank::FourthEngineer => "Fourth Engineer",
            Rank::ElectroTechnicalOfficer => "Electro-Technical Officer",
            Rank::EngineCadet => "Engine Cadet",
            Rank::Fitter => "Fitter",
            Rank::Motorman => "Motorman",
            Rank::Oiler => "Oiler",
            Rank::Wiper => "Wiper",
            Rank::ChiefCook => "Chief Cook",
            Rank::Cook => "Cook",
            Rank::Steward => "Steward",
            Rank::Messman => "Messman",
        }
    }

    pub fn department(&self) -> Department {
        match self {
            Rank::Master
            | Rank::ChiefOfficer
            | Rank::SecondOfficer
            | Rank::ThirdOfficer
            | Rank::DeckCadet
            | Rank::Bosun
            | Rank::AbleSeaman
            | Rank::OrdinarySeaman
            | Rank::Pumpman => Department::Deck,
            Rank::ChiefEngineer
            | Rank::SecondEngineer
            | Rank::ThirdEngineer
            | Rank::FourthEngineer
            | Rank::ElectroTechnicalOfficer
            | Rank::EngineCadet
            | Rank::Fitter
            | Rank::Motorman
            | Rank::Oiler
            | Rank::Wiper => Department::Engine,
            Rank::ChiefCook | Rank::Cook | Rank::Steward | Rank::Messman => Department::Catering,
        }
    }

    /// Department of a position code as stored on an order. Codes outside
    /// the catalogue are kept by the backend, so this never fails.
    pub fn department_of(code: &str) -> Department {
        code.parse::<Rank>()
            .map(|rank| rank.department())
            .unwrap_or(Department::Other)
    }
}

impl FromStr for Rank {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Rank::iter()
            .find(|rank| rank.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ContractError::UnknownRank(s.to_string()))
    }
}

impl TryFrom<String> for Rank {
    type Error = ContractError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rank> for String {
    fn from(rank: Rank) -> Self {
        rank.code().to_string()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
