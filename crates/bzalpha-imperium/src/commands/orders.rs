use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use anyhow::bail;
use bzalpha_client::AuthToken;
use bzalpha_client::CookieJar;
use bzalpha_client::OrderService;
use bzalpha_contracts::Currency;
use bzalpha_contracts::OrderId;
use bzalpha_contracts::PrincipalId;
use bzalpha_contracts::Rank;
use bzalpha_contracts::VesselId;
use bzalpha_panel::FormContext;
use bzalpha_panel::OrderCreationForm;
use bzalpha_panel::OrderListView;
use bzalpha_panel::SubmitOutcome;
use chrono::NaiveDate;
use clap::Args;
use clap::Subcommand;
use colored::Colorize;
use tracing::Level;
use tracing::event;

use crate::render;
use crate::render::TerminalNotifications;

#[derive(Subcommand, Debug)]
pub enum OrdersCommands {
    /// Print the orders of a vessel
    List {
        #[arg(long)]
        vessel: VesselId,
    },
    /// Create one order per position for a vessel
    Create(CreateArgs),
    /// Cancel an order. The order is deleted, not trashed
    Delete {
        #[arg(long)]
        vessel: VesselId,
        #[arg(long)]
        id: OrderId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub vessel: Option<VesselId>,
    /// Rank codes, e.g. `--positions C/O,AB`
    #[arg(long, value_delimiter = ',')]
    pub positions: Vec<Rank>,
    #[arg(long)]
    pub owner: Option<PrincipalId>,
    #[arg(long)]
    pub wage: Option<f64>,
    /// Defaults to USD
    #[arg(long)]
    pub currency: Option<Currency>,
    /// Port of joining
    #[arg(long)]
    pub port: Option<String>,
    #[arg(long)]
    pub uniform: bool,
    /// Join date, YYYY-MM-DD
    #[arg(long)]
    pub sign_on: Option<NaiveDate>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub deadline: Option<NaiveDate>,
    /// Months the contract may be extended by
    #[arg(long)]
    pub contract_plus: Option<i64>,
    /// Months the contract may be shortened by
    #[arg(long)]
    pub contract_minus: Option<i64>,
    #[arg(long)]
    pub remark: Option<String>,
}

impl OrdersCommands {
    pub async fn execute<S: OrderService>(self, service: &S, cookie_jar: &CookieJar) -> Result<()> {
        match self {
            OrdersCommands::List { vessel } => {
                let token = cookie_jar.read_token()?;
                let mut view = OrderListView::new(vessel);
                view.mount(service, &token).await;
                render::print_orders(&view.render());
                Ok(())
            }
            OrdersCommands::Create(args) => create(args, service, cookie_jar).await,
            OrdersCommands::Delete { vessel, id, yes } => {
                let token = cookie_jar.read_token()?;
                let mut view = OrderListView::new(vessel);
                view.mount(service, &token).await;

                let Some(dialog) = view.request_delete(id) else {
                    bail!("Order {id} is not listed for vessel {vessel}");
                };
                if !yes && !render::confirm(&dialog)? {
                    println!("{}", format!("Order {id} kept").dimmed());
                    return Ok(());
                }

                view.delete(service, &token, dialog.target).await;
                render::print_orders(&view.render());
                Ok(())
            }
        }
    }
}

async fn create<S: OrderService>(args: CreateArgs, service: &S, cookie_jar: &CookieJar) -> Result<()> {
    // Incomplete drafts fail without touching the cookie file.
    let unresolved = FormContext {
        principal_id: args.owner,
        vessel_id: args.vessel,
        ..FormContext::default()
    };
    let errors = order_form(unresolved, &args).draft().validate();
    if !errors.is_empty() {
        render::print_field_errors(&errors);
        bail!("The order form is incomplete");
    }

    let token = cookie_jar.read_token()?;
    let context = resolve_context(service, &token, args.owner, args.vessel).await;

    let saved_vessel = Rc::new(Cell::new(None));
    let mut form = order_form(context, &args).on_save({
        let saved_vessel = Rc::clone(&saved_vessel);
        move |vessel| saved_vessel.set(Some(vessel))
    });

    form.modal.open();
    match form.submit(service, &token, &mut TerminalNotifications).await {
        SubmitOutcome::Saved(vessel) => {
            event!(Level::INFO, %vessel, "orders created");
        }
        SubmitOutcome::Invalid(errors) => {
            form.modal.cancel();
            render::print_field_errors(&errors);
            bail!("The order form is incomplete");
        }
        SubmitOutcome::Failed => {
            form.modal.cancel();
            bail!("The backend rejected the orders");
        }
    }

    if let Some(vessel) = saved_vessel.take() {
        let mut view = OrderListView::new(vessel);
        view.mount(service, &token).await;
        render::print_orders(&view.render());
    }
    Ok(())
}

fn order_form(context: FormContext, args: &CreateArgs) -> OrderCreationForm {
    let mut form = OrderCreationForm::new(context);
    let draft = form.draft_mut();
    draft.set_positions(args.positions.iter().copied());
    draft.wage = args.wage;
    draft.currency = args.currency.unwrap_or_default();
    draft.port = args.port.clone();
    draft.uniform = args.uniform;
    draft.sign_on = args.sign_on;
    draft.deadline = args.deadline;
    draft.contract_plus = args.contract_plus;
    draft.contract_minus = args.contract_minus;
    draft.remark = args.remark.clone();
    form
}

/// Labels for the fixed owner and vessel, looked up in the directory. The
/// owner defaults to the vessel's principal. Failed lookups are logged and
/// fall back to showing the ids.
async fn resolve_context<S: OrderService>(
    service: &S,
    token: &AuthToken,
    owner: Option<PrincipalId>,
    vessel: Option<VesselId>,
) -> FormContext {
    let mut context = FormContext {
        principal_id: owner,
        principal_name: None,
        vessel_id: vessel,
        vessel_name: None,
    };

    if let Some(vessel) = vessel {
        match service.list_vessels(token, owner, None).await {
            Ok(vessels) => {
                if let Some(found) = vessels.into_iter().find(|candidate| candidate.id == vessel) {
                    context.vessel_name = Some(found.name).filter(|name| !name.is_empty());
                    context.principal_id = context.principal_id.or(found.principal);
                }
            }
            Err(error) => event!(Level::WARN, %error, %vessel, "vessel lookup failed"),
        }
    }

    if let Some(principal) = context.principal_id {
        match service.list_principals(token, None).await {
            Ok(principals) => {
                context.principal_name = principals
                    .into_iter()
                    .find(|candidate| candidate.id == principal)
                    .map(|candidate| candidate.name)
                    .filter(|name| !name.is_empty());
            }
            Err(error) => event!(Level::WARN, %error, %principal, "owner lookup failed"),
        }
        context.principal_name = context
            .principal_name
            .or_else(|| Some(principal.to_string()));
    }

    context
}
