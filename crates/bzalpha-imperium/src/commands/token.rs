use anyhow::Context;
use anyhow::Result;
use bzalpha_client::AuthToken;
use bzalpha_client::CookieJar;
use clap::Subcommand;
use colored::Colorize;

#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    /// Store the bearer token issued by the WordPress login
    Set { token: String },
    /// Remove the token, other cookies are kept
    Clear,
}

impl TokenCommands {
    pub fn execute(self, cookie_jar: &CookieJar) -> Result<()> {
        match self {
            TokenCommands::Set { token } => {
                cookie_jar
                    .store_token(&AuthToken::new(token.trim()))
                    .context("Could not store the token")?;
                println!(
                    "{} {}",
                    "Token stored in".green(),
                    cookie_jar.path().display()
                );
            }
            TokenCommands::Clear => {
                cookie_jar
                    .clear_token()
                    .context("Could not clear the token")?;
                println!("{}", "Token cleared".green());
            }
        }
        Ok(())
    }
}
