use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::ContractError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cny,
    Php,
    Rub,
    Uah,
    Inr,
    Idr,
    Sgd,
    Nok,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cny => "CNY",
            Currency::Php => "PHP",
            Currency::Rub => "RUB",
            Currency::Uah => "UAH",
            Currency::Inr => "INR",
            Currency::Idr => "IDR",
            Currency::Sgd => "SGD",
            Currency::Nok => "NOK",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy | Currency::Cny => "¥",
            Currency::Php => "₱",
            Currency::Rub => "₽",
            Currency::Uah => "₴",
            Currency::Inr => "₹",
            Currency::Idr => "Rp",
            Currency::Sgd => "S$",
            Currency::Nok => "kr",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
            Currency::Jpy => "Japanese Yen",
            Currency::Cny => "Chinese Yuan",
            Currency::Php => "Philippine Peso",
            Currency::Rub => "Russian Ruble",
            Currency::Uah => "Ukrainian Hryvnia",
            Currency::Inr => "Indian Rupee",
            Currency::Idr => "Indonesian Rupiah",
            Currency::Sgd => "Singapore Dollar",
            Currency::Nok => "Norwegian Krone",
        }
    }

    /// Text shown for the currency in a select box.
    pub fn option_label(&self) -> String {
        format!("({}) {}", self.symbol(), self.name())
    }
}

impl FromStr for Currency {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ContractError::UnknownCurrency(s.to_string()))
    }
}

impl TryFrom<String> for Currency {
    type Error = ContractError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
