use anyhow::Context;
use anyhow::Result;
use bzalpha_client::CookieJar;
use bzalpha_client::OrderService;
use bzalpha_contracts::PrincipalId;
use bzalpha_panel::FormContext;
use bzalpha_panel::OrderCreationForm;
use bzalpha_panel::SelectOption;
use clap::Subcommand;

use crate::render;

#[derive(Subcommand, Debug)]
pub enum OwnersCommands {
    /// List the owners, optionally narrowed by a search term
    List {
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum VesselsCommands {
    /// List the vessels, optionally only the ones of one owner
    List {
        #[arg(long)]
        owner: Option<PrincipalId>,
        #[arg(long)]
        search: Option<String>,
    },
}

impl OwnersCommands {
    pub async fn execute<S: OrderService>(self, service: &S, cookie_jar: &CookieJar) -> Result<()> {
        match self {
            OwnersCommands::List { search } => {
                let token = cookie_jar.read_token()?;
                let mut form = OrderCreationForm::new(FormContext::default());
                let options = form
                    .load_owner_options(service, &token, search.as_deref())
                    .await
                    .context("Could not load the owners")?;
                render::print_options(&options);
            }
        }
        Ok(())
    }
}

impl VesselsCommands {
    pub async fn execute<S: OrderService>(self, service: &S, cookie_jar: &CookieJar) -> Result<()> {
        match self {
            VesselsCommands::List { owner, search } => {
                let token = cookie_jar.read_token()?;
                let mut form = OrderCreationForm::new(FormContext::default());
                if let Some(owner) = owner {
                    form.choose_owner(Some(&SelectOption {
                        value: owner.to_string(),
                        label: owner.to_string(),
                    }));
                }
                let options = form
                    .load_vessel_options(service, &token, search.as_deref())
                    .await
                    .context("Could not load the vessels")?;
                render::print_options(&options);
            }
        }
        Ok(())
    }
}
