mod api;
mod chart;
mod config;
mod models;
mod resource;
mod screen;
mod session;
mod shell;


use std::error::Error;

use api::ChigoClient;
use config::{Command, Config};
use log::{info, warn};
use screen::{add_place::ADDED, Screen};
use session::{guard, Route, Session};
use shell::Shell;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    config.init_logger();
    info!("# Chi-go Admin #");
    info!("");

    let api = ChigoClient::new(&config)?;
    info!("Using {}", api.inner().base_url());

    let mut session = Session::default();
    if let Some(credentials) = config.credentials() {
        session.login(&api, &credentials).await?;
    }

    let command = config.command();
    if let Command::Shell = command {
        return Shell::new(api, session).run().await;
    }

    let route = guard(command.route(), &session);
    if route == Route::Login {
        warn!("{} needs a session", command.route().title());
        return Err("login required: set --username and --password".into());
    }

    let mut screen = Screen::mount(route, &api).await;
    if let Some(query) = command.query() {
        screen.search(query)?;
    }

    let deletions = command.deletions();
    if !deletions.is_empty() {
        let removed = screen.delete(&api, &deletions).await?;
        info!("Deleted {} of {}", removed, deletions.len());
    }

    if let Some(draft) = command.draft() {
        screen.fill(draft)?;
        if screen.submit(&api).await? {
            println!("{}", ADDED);
        }
    }

    print!("{}", screen);
    Ok(())
}
