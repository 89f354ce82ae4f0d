#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
#![warn(clippy::expect_used)]

use clap::{CommandFactory, Parser};

use crate::app_config::AppConfig;
use crate::args::{CliArgs, Command};
use crate::commands::ad::ad_cmd;
use crate::commands::config::config_cmd;
use crate::commands::favorites::favorites_cmd;
use crate::commands::login::{login_cmd, logout_cmd, whoami_cmd};
use crate::commands::register::register_cmd;
use crate::commands::seek::seek_cmd;
use crate::session::{get_session_path, Session};
use crate::web_client::HttpClient;

mod app_config;
mod args;
mod browse;
mod commands;
mod formatters;
mod forms;
mod session;
mod web_client;

#[cfg(test)]
mod test;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = CliArgs::parse();

    let session_path = get_session_path(&args.config.session_path);
    let session = Session::from_path(&session_path)?;
    let config = AppConfig::from_args(&args.config, &session_path, session.as_ref());

    if let Some(command) = args.command {
        match command {
            Command::Config => config_cmd(&config)?,
            Command::Completion(completion) => {
                let mut cmd = CliArgs::command();
                clap_complete::generate(
                    completion.shell,
                    &mut cmd,
                    "rehome",
                    &mut std::io::stdout(),
                );
            }
            Command::Login(login) => {
                let client = HttpClient::new(&config.api_url);
                login_cmd(
                    &client,
                    &login.username,
                    &login.password,
                    &config.api_url,
                    &session_path,
                )?;
            }
            Command::Logout => logout_cmd(&session_path)?,
            Command::Whoami => whoami_cmd(session.as_ref())?,
            Command::Register(register) => {
                let client = HttpClient::new(&config.api_url);
                register_cmd(&client, register)?;
            }
            Command::Seek(seek) => {
                let client = HttpClient::new(&config.api_url);
                seek_cmd(&client, session.as_ref(), &config, seek)?;
            }
            Command::Favorites(favorites) => {
                let client = HttpClient::new(&config.api_url);
                favorites_cmd(&client, session.as_ref(), &config, favorites)?;
            }
            Command::Ad(ad) => {
                let client = HttpClient::new(&config.api_url);
                ad_cmd(&client, session.as_ref(), &config, ad)?;
            }
        }
    }

    Ok(())
}
