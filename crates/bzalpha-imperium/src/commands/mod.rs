use anyhow::Context;
use anyhow::Result;
use bzalpha_client::CookieJar;
use bzalpha_client::RestOrderService;
use bzalpha_configuration::ClientConfiguration;
use clap::Subcommand;

pub mod directory;
pub mod orders;
pub mod token;

pub use directory::OwnersCommands;
pub use directory::VesselsCommands;
pub use orders::CreateArgs;
pub use orders::OrdersCommands;
pub use token::TokenCommands;

use crate::render;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, list and cancel the orders of a vessel
    Orders {
        #[clap(subcommand)]
        orders_commands: OrdersCommands,
    },
    /// Owners (principals) as offered by the order form
    Owners {
        #[clap(subcommand)]
        owners_commands: OwnersCommands,
    },
    /// Vessels as offered by the order form
    Vessels {
        #[clap(subcommand)]
        vessels_commands: VesselsCommands,
    },
    /// Rank codes accepted by `orders create --positions`
    Ranks,
    /// Currency codes accepted by `orders create --currency`
    Currencies,
    /// Manage the bearer token in the cookie file
    Token {
        #[clap(subcommand)]
        token_commands: TokenCommands,
    },
}

/// The REST client is only built for commands that reach the backend, so
/// the local ones work without `API_URL`.
pub async fn handle_command(command: Commands, configuration: &ClientConfiguration) -> Result<()> {
    let cookie_jar = CookieJar::new(&configuration.cookie_file);

    match command {
        Commands::Orders { orders_commands } => {
            orders_commands
                .execute(&backend(configuration)?, &cookie_jar)
                .await
        }
        Commands::Owners { owners_commands } => {
            owners_commands
                .execute(&backend(configuration)?, &cookie_jar)
                .await
        }
        Commands::Vessels { vessels_commands } => {
            vessels_commands
                .execute(&backend(configuration)?, &cookie_jar)
                .await
        }
        Commands::Ranks => {
            render::print_ranks();
            Ok(())
        }
        Commands::Currencies => {
            render::print_currencies();
            Ok(())
        }
        Commands::Token { token_commands } => token_commands.execute(&cookie_jar),
    }
}

fn backend(configuration: &ClientConfiguration) -> Result<RestOrderService> {
    let api_base = configuration.api_base()?;
    RestOrderService::new(&api_base).context("Could not build the REST client")
}
