use bzalpha_client::AuthToken;
use bzalpha_client::ClientResult;
use bzalpha_client::OrderService;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// A select box whose options come from a collection route of the backend.
///
/// `T` is the state the selector edits; `on_change` is applied to it when
/// the user picks (or clears) an option.
#[derive(Debug, Clone)]
pub struct RemoteSelect<T> {
    pub endpoint: &'static str,
    pub value_field: String,
    pub label_field: String,
    pub extra_params: Vec<(String, String)>,
    pub on_change: Option<fn(&mut T, Option<&SelectOption>)>,
    pub placeholder: String,
    pub disabled: bool,
    pub allow_clear: bool,
    options: Vec<SelectOption>,
}

impl<T> RemoteSelect<T> {
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            endpoint,
            value_field: "id".to_string(),
            label_field: "name".to_string(),
            extra_params: Vec::new(),
            on_change: None,
            placeholder: String::new(),
            disabled: false,
            allow_clear: false,
            options: Vec::new(),
        }
    }

    pub fn fields(mut self, value_field: &str, label_field: &str) -> Self {
        self.value_field = value_field.to_string();
        self.label_field = label_field.to_string();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn on_change(mut self, on_change: fn(&mut T, Option<&SelectOption>)) -> Self {
        self.on_change = Some(on_change);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn allow_clear(mut self, allow_clear: bool) -> Self {
        self.allow_clear = allow_clear;
        self
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Fetches the options, narrowed by `search` when given. A disabled
    /// select keeps whatever it has and does not hit the backend.
    pub async fn load<S: OrderService>(
        &mut self,
        service: &S,
        token: &AuthToken,
        search: Option<&str>,
    ) -> ClientResult<&[SelectOption]> {
        if self.disabled {
            return Ok(&self.options);
        }

        let mut params = self.extra_params.clone();
        if let Some(search) = search.map(str::trim).filter(|search| !search.is_empty()) {
            params.push(("search".to_string(), search.to_string()));
        }

        let records = service.fetch_records(token, self.endpoint, &params).await?;
        self.options = records
            .iter()
            .filter_map(|record| self.option_from_record(record))
            .collect();
        debug!(endpoint = self.endpoint, count = self.options.len(), "select options loaded");
        Ok(&self.options)
    }

    /// Applies `on_change` to `state`. Ignored while disabled, and clearing
    /// is ignored unless the select allows it.
    pub fn change(&self, state: &mut T, option: Option<&SelectOption>) -> bool {
        if self.disabled || (option.is_none() && !self.allow_clear) {
            return false;
        }
        if let Some(on_change) = self.on_change {
            on_change(state, option);
        }
        true
    }

    fn option_from_record(&self, record: &Value) -> Option<SelectOption> {
        let value = scalar_text(record.get(&self.value_field)?)?;
        let label = record
            .get(&self.label_field)
            .and_then(|label| match label {
                // WordPress renders post titles as `{ "rendered": "..." }`.
                Value::Object(object) => object.get("rendered").and_then(scalar_text),
                other => scalar_text(other),
            })
            .unwrap_or_else(|| value.clone());
        Some(SelectOption { value, label })
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
