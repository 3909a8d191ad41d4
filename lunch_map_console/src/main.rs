#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod console_config;
mod file_slot;
mod terminal_ui;
mod text_map;

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, anyhow};
use clap::{ArgMatches, Command, arg};
use lunch_map::client::ClientState;
use lunch_map::http::ReqwestTransport;
use lunch_map::menu::MenuType;
use lunch_map::restaurant_filter::RestaurantFilter;

use crate::console_config::{ConsoleConfig, read_config_file};
use crate::file_slot::FileSlot;
use crate::terminal_ui::TerminalUi;
use crate::text_map::TextMap;


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let matches = Command::new("Lunch map")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Browse restaurants and their menus from the terminal")
        .subcommand_required(true)
        .arg(arg!(--config <config_file> "Path to a yaml-serialized ConsoleConfig").required(false))
        .arg(
            arg!(--"session-file" <path> "Where the session token is stored between runs")
                .required(false),
        )
        .subcommand(
            Command::new("login")
                .about("Log in and show the restaurant list")
                .arg(arg!(<username> "User name"))
                .arg(arg!(<password> "Password")),
        )
        .subcommand(
            Command::new("register")
                .about("Create a new account")
                .arg(arg!(<username> "User name"))
                .arg(arg!(<password> "Password"))
                .arg(arg!(--email <email> "Email; asked interactively if omitted").required(false)),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the logged in user"))
        .subcommand(
            Command::new("restaurants")
                .about("List restaurants")
                .arg(arg!(--city <city> "Case-insensitive part of the city name").required(false))
                .arg(arg!(--company <company> "Exact company name").required(false)),
        )
        .subcommand(
            Command::new("menu")
                .about("Show a restaurant menu")
                .arg(arg!(<restaurant_id> "Restaurant ID"))
                .arg(
                    arg!(--"type" <menu_type> "Daily or weekly menu")
                        .value_parser(["day", "week"])
                        .default_value("week"),
                ),
        )
        .get_matches();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => read_config_file(&PathBuf::from(path))?,
        None => ConsoleConfig::default(),
    };
    if let Some(path) = matches.get_one::<String>("session-file") {
        config.session_file = PathBuf::from(path);
    }

    let (filter, menu_type) = match matches.subcommand() {
        Some(("restaurants", sub_matches)) => (read_filter(sub_matches), MenuType::default()),
        Some(("menu", sub_matches)) => (
            RestaurantFilter::default(),
            MenuType::from_selector(sub_matches.get_one::<String>("type").unwrap()),
        ),
        _ => (RestaurantFilter::default(), MenuType::default()),
    };
    let client = ClientState::new(
        &config.client,
        Box::new(ReqwestTransport::new()),
        Box::new(FileSlot::new(config.session_file.clone())),
        Box::new(TextMap::new(config.show_markers)),
        Rc::new(TerminalUi::new(filter, menu_type)),
    )
    .context("Invalid client configuration")?;

    async_std::task::block_on(run(&client, &matches))
}

fn read_filter(matches: &ArgMatches) -> RestaurantFilter {
    RestaurantFilter::new(
        matches.get_one::<String>("city").cloned().unwrap_or_default(),
        matches.get_one::<String>("company").cloned().unwrap_or_default(),
    )
}

// User-facing messages are printed by the client itself; errors returned from here only set
// the exit code.
async fn run(client: &ClientState, matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("login", sub_matches)) => {
            client
                .login(
                    sub_matches.get_one::<String>("username").unwrap(),
                    sub_matches.get_one::<String>("password").unwrap(),
                )
                .await?;
        }
        Some(("register", sub_matches)) => {
            client
                .register(
                    sub_matches.get_one::<String>("username").unwrap(),
                    sub_matches.get_one::<String>("password").unwrap(),
                    sub_matches.get_one::<String>("email").map(String::as_str),
                )
                .await?;
        }
        Some(("logout", _)) => client.logout(),
        Some(("whoami", _)) => {
            client.load_current_user().await;
            client.render_session();
        }
        Some(("restaurants", _)) => {
            // Profile is needed to mark the favourite restaurant.
            client.load_current_user().await;
            client.refresh_restaurants().await?;
        }
        Some(("menu", sub_matches)) => {
            client.show_menu(sub_matches.get_one::<String>("restaurant_id").unwrap()).await?;
        }
        _ => return Err(anyhow!("Unknown subcommand")),
    }
    Ok(())
}
