use bzalpha_client::AuthToken;
use bzalpha_client::ClientResult;
use bzalpha_client::OrderService;
use bzalpha_client::routes;
use bzalpha_contracts::BulkOrderRequest;
use bzalpha_contracts::Currency;
use bzalpha_contracts::PrincipalId;
use bzalpha_contracts::Rank;
use bzalpha_contracts::VesselId;
use chrono::NaiveDate;
use strum::IntoEnumIterator;
use tracing::Level;
use tracing::event;

use crate::ModalForm;
use crate::Notification;
use crate::NotificationSink;
use crate::RemoteSelect;
use crate::SelectOption;

pub const FORM_TITLE: &str = "Add New Order";
pub const CREATED_MESSAGE: &str = "Order created.";
pub const FAILED_MESSAGE: &str = "Failed to create an order.";

/// What the caller already knows when it opens the form, e.g. from a vessel
/// page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormContext {
    pub principal_id: Option<PrincipalId>,
    pub principal_name: Option<String>,
    pub vessel_id: Option<VesselId>,
    pub vessel_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Uncommitted values of the form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDraft {
    owner: Option<PrincipalId>,
    vessel: Option<VesselId>,
    positions: Vec<Rank>,
    pub wage: Option<f64>,
    pub currency: Currency,
    pub port: Option<String>,
    pub uniform: bool,
    pub sign_on: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub contract_plus: Option<i64>,
    pub contract_minus: Option<i64>,
    pub remark: Option<String>,
}

impl FormDraft {
    fn initial(context: &FormContext) -> Self {
        Self {
            owner: None,
            vessel: context.vessel_id,
            positions: Vec::new(),
            wage: None,
            currency: Currency::default(),
            port: None,
            uniform: false,
            sign_on: None,
            deadline: None,
            contract_plus: None,
            contract_minus: None,
            remark: None,
        }
    }

    /// Vessels are listed per owner, so a new owner invalidates the vessel.
    fn select_owner(&mut self, owner: Option<PrincipalId>) {
        self.owner = owner;
        self.vessel = None;
    }

    pub fn owner(&self) -> Option<PrincipalId> {
        self.owner
    }

    pub fn vessel(&self) -> Option<VesselId> {
        self.vessel
    }

    pub fn positions(&self) -> &[Rank] {
        &self.positions
    }

    pub fn add_position(&mut self, rank: Rank) {
        if !self.positions.contains(&rank) {
            self.positions.push(rank);
        }
    }

    pub fn remove_position(&mut self, rank: Rank) {
        self.positions.retain(|position| *position != rank);
    }

    pub fn set_positions(&mut self, ranks: impl IntoIterator<Item = Rank>) {
        self.positions.clear();
        for rank in ranks {
            self.add_position(rank);
        }
    }

    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.vessel.is_none() {
            errors.push(FieldError {
                field: "vessel",
                message: "Vessel is required.",
            });
        }
        if self.positions.is_empty() {
            errors.push(FieldError {
                field: "positions",
                message: "Position is required.",
            });
        }
        errors
    }

    fn to_request(&self) -> Result<BulkOrderRequest, Vec<FieldError>> {
        let errors = self.validate();
        let Some(vessel) = self.vessel.filter(|_| errors.is_empty()) else {
            return Err(errors);
        };

        Ok(BulkOrderRequest {
            vessel,
            positions: self.positions.clone(),
            wage: self.wage,
            currency: self.currency,
            port: non_blank(&self.port),
            uniform: self.uniform,
            sign_on: self.sign_on,
            deadline: self.deadline,
            contract_plus: self.contract_plus,
            contract_minus: self.contract_minus,
            remark: non_blank(&self.remark),
        })
    }
}

/// Blank text is not sent at all; anything else is sent as typed.
fn non_blank(text: &Option<String>) -> Option<String> {
    text.clone().filter(|text| !text.trim().is_empty())
}

fn owner_changed(draft: &mut FormDraft, option: Option<&SelectOption>) {
    draft.select_owner(option.and_then(|option| option.value.parse().ok()));
}

fn vessel_changed(draft: &mut FormDraft, option: Option<&SelectOption>) {
    draft.vessel = option.and_then(|option| option.value.parse().ok());
}

/// The owner is only selectable when the form was opened without an owner
/// or vessel.
#[derive(Debug, Clone)]
pub enum OwnerField {
    Fixed { label: String },
    Selectable(RemoteSelect<FormDraft>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Invalid(Vec<FieldError>),
    Saved(VesselId),
    Failed,
}

pub struct OrderCreationForm {
    context: FormContext,
    pub modal: ModalForm,
    owner_field: OwnerField,
    vessel_select: RemoteSelect<FormDraft>,
    draft: FormDraft,
    field_errors: Vec<FieldError>,
    on_save: Option<Box<dyn FnMut(VesselId)>>,
}

impl OrderCreationForm {
    pub fn new(context: FormContext) -> Self {
        let owner_field = if context.principal_id.is_some() || context.vessel_id.is_some() {
            OwnerField::Fixed {
                label: context.principal_name.clone().unwrap_or_default(),
            }
        } else {
            OwnerField::Selectable(
                RemoteSelect::new(routes::PRINCIPALS)
                    .fields("id", "name")
                    .placeholder("Select owner")
                    .allow_clear(true)
                    .on_change(owner_changed),
            )
        };

        let vessel_select = RemoteSelect::new(routes::VESSELS)
            .placeholder(
                context
                    .vessel_name
                    .clone()
                    .unwrap_or_else(|| "Enter vessel name".to_string()),
            )
            .allow_clear(true)
            .disabled(context.vessel_id.is_some())
            .on_change(vessel_changed);

        let mut form = Self {
            draft: FormDraft::initial(&context),
            context,
            modal: ModalForm::new(FORM_TITLE),
            owner_field,
            vessel_select,
            field_errors: Vec::new(),
            on_save: None,
        };
        form.sync_vessel_params();
        form
    }

    /// Called with the submitted vessel after every successful submit.
    pub fn on_save(mut self, on_save: impl FnMut(VesselId) + 'static) -> Self {
        self.on_save = Some(Box::new(on_save));
        self
    }

    pub fn context(&self) -> &FormContext {
        &self.context
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FormDraft {
        &mut self.draft
    }

    pub fn owner_field(&self) -> &OwnerField {
        &self.owner_field
    }

    pub fn vessel_select(&self) -> &RemoteSelect<FormDraft> {
        &self.vessel_select
    }

    /// Errors of the last rejected submit, shown next to their fields.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn position_options() -> Vec<SelectOption> {
        Rank::iter()
            .map(|rank| SelectOption {
                value: rank.code().to_string(),
                label: rank.name().to_string(),
            })
            .collect()
    }

    pub fn currency_options() -> Vec<SelectOption> {
        Currency::iter()
            .map(|currency| SelectOption {
                value: currency.code().to_string(),
                label: currency.option_label(),
            })
            .collect()
    }

    pub async fn load_owner_options<S: OrderService>(
        &mut self,
        service: &S,
        token: &AuthToken,
        search: Option<&str>,
    ) -> ClientResult<Vec<SelectOption>> {
        match &mut self.owner_field {
            OwnerField::Fixed { .. } => Ok(Vec::new()),
            OwnerField::Selectable(select) => {
                Ok(select.load(service, token, search).await?.to_vec())
            }
        }
    }

    pub async fn load_vessel_options<S: OrderService>(
        &mut self,
        service: &S,
        token: &AuthToken,
        search: Option<&str>,
    ) -> ClientResult<Vec<SelectOption>> {
        Ok(self.vessel_select.load(service, token, search).await?.to_vec())
    }

    /// Picks (or clears) the owner. Returns false when the owner is fixed.
    pub fn choose_owner(&mut self, option: Option<&SelectOption>) -> bool {
        let changed = match &self.owner_field {
            OwnerField::Fixed { .. } => false,
            OwnerField::Selectable(select) => select.change(&mut self.draft, option),
        };
        if changed {
            self.sync_vessel_params();
        }
        changed
    }

    /// Picks (or clears) the vessel. Returns false when the vessel is fixed.
    pub fn choose_vessel(&mut self, option: Option<&SelectOption>) -> bool {
        self.vessel_select.change(&mut self.draft, option)
    }

    fn sync_vessel_params(&mut self) {
        self.vessel_select.extra_params = self
            .context
            .principal_id
            .or(self.draft.owner)
            .map(|principal| vec![("principal".to_string(), principal.to_string())])
            .unwrap_or_default();
    }

    fn reset(&mut self) {
        self.draft = FormDraft::initial(&self.context);
        self.field_errors.clear();
        self.sync_vessel_params();
    }

    /// Validates the draft and, when it is complete, creates the orders.
    ///
    /// An invalid draft never reaches the backend. A failed create keeps the
    /// modal open with the draft untouched so the user can retry.
    pub async fn submit<S, N>(
        &mut self,
        service: &S,
        token: &AuthToken,
        notifications: &mut N,
    ) -> SubmitOutcome
    where
        S: OrderService,
        N: NotificationSink,
    {
        let request = match self.draft.to_request() {
            Ok(request) => request,
            Err(errors) => {
                self.field_errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }
        };
        self.field_errors.clear();

        self.modal.begin_submit();
        match service.create_orders(token, &request).await {
            Ok(()) => {
                if let Some(on_save) = self.on_save.as_mut() {
                    on_save(request.vessel);
                }
                self.reset();
                self.modal.done();
                notifications.notify(Notification::success(CREATED_MESSAGE));
                SubmitOutcome::Saved(request.vessel)
            }
            Err(error) => {
                event!(Level::ERROR, %error, vessel = %request.vessel, "order creation failed");
                self.modal.error();
                notifications.notify(Notification::error(FAILED_MESSAGE));
                SubmitOutcome::Failed
            }
        }
    }
}
