use std::{error::Error, io::Write};

use clap::{Parser, Subcommand};
use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    api::AdminApi,
    models::{Credentials, Id},
    screen::{add_place::ADDED, Screen, ScreenError},
    session::{guard, header, Route, Session},
};

const HELP: &str = "\
login <username> <password>   open a session
logout                        close the session
go <route>                    users | posts | places | add | analytics
reload                        fetch the current screen again
search [query...]             filter the current list
edit <id>                     start editing a record
set <field> <value...>        change a field of the record or form
save | cancel                 finish or abandon the edit
delete <id>...                delete one or more records
submit                        send the add-place form
show | help | quit";

#[derive(Parser, Debug)]
#[command(multicall = true, disable_help_subcommand = true)]
struct Line {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    Login {
        username: String,
        password: String,
    },
    Logout,
    Go {
        #[arg(value_enum)]
        route: Route,
    },
    Reload,
    Search {
        query: Vec<String>,
    },
    Edit {
        id: String,
    },
    Set {
        field: String,
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        value: Vec<String>,
    },
    Save,
    Cancel,
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    Submit,
    Show,
    Help,
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue(String),
    Quit,
}

/// Owns the session and the one mounted screen.
pub struct Shell<A> {
    api: A,
    session: Session,
    screen: Screen,
}

impl<A: AdminApi> Shell<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            screen: Screen::Login,
        }
    }

    /// Mounts the landing screen for the current session.
    pub async fn start(&mut self) -> String {
        self.go(Route::Login).await;
        self.render()
    }

    pub async fn run(mut self) -> Result<(), Box<dyn Error>> {
        println!("{}", self.start().await);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        prompt()?;
        while let Some(line) = lines.next_line().await? {
            match self.handle(&line).await {
                Step::Continue(output) if output.is_empty() => {}
                Step::Continue(output) => println!("{}", output),
                Step::Quit => break,
            }
            prompt()?;
        }
        info!("Bye");
        Ok(())
    }

    pub async fn handle(&mut self, line: &str) -> Step {
        let words = match shell_words::split(line) {
            Ok(words) if words.is_empty() => return Step::Continue(String::new()),
            Ok(words) => words,
            Err(e) => return Step::Continue(format!("error: unable to parse command: {}", e)),
        };
        let command = match Line::try_parse_from(words) {
            Ok(line) => line.command,
            Err(e) => return Step::Continue(e.render().to_string().trim_end().to_string()),
        };

        let output = match command {
            ShellCommand::Quit => return Step::Quit,
            ShellCommand::Help => Ok(HELP.to_string()),
            ShellCommand::Login { username, password } => {
                self.login(Credentials { username, password }).await
            }
            command => self.dispatch(command).await.map(|notice| match notice {
                Some(notice) => format!("{}\n\n{}", notice, self.render()),
                None => self.render(),
            }),
        };
        Step::Continue(output.unwrap_or_else(|e| format!("error: {}", e)))
    }

    async fn login(&mut self, credentials: Credentials) -> Result<String, ScreenError> {
        if let Err(e) = self.session.login(&self.api, &credentials).await {
            error!("Error logging in: {}", e);
            return Ok(format!("Login failed for {}", credentials.username));
        }
        self.go(Route::Login).await;
        Ok(self.render())
    }

    /// Runs a screen action; `Some` carries a notice shown above the screen.
    async fn dispatch(&mut self, command: ShellCommand) -> Result<Option<&'static str>, ScreenError> {
        match command {
            ShellCommand::Logout => {
                self.session.logout();
                self.go(Route::Login).await;
            }
            ShellCommand::Go { route } => self.go(route).await,
            ShellCommand::Reload => {
                let route = self.screen.route();
                self.go(route).await;
            }
            ShellCommand::Search { query } => self.screen.search(&query.join(" "))?,
            ShellCommand::Edit { id } => self.screen.edit(&Id::from(id))?,
            ShellCommand::Set { field, value } => self.screen.set(&field, &value.join(" "))?,
            ShellCommand::Save => {
                self.screen.save(&self.api).await?;
            }
            ShellCommand::Cancel => self.screen.cancel()?,
            ShellCommand::Delete { ids } => {
                let ids: Vec<Id> = ids.into_iter().map(Id::from).collect();
                let removed = self.screen.delete(&self.api, &ids).await?;
                info!("Deleted {} of {}", removed, ids.len());
            }
            ShellCommand::Submit => {
                if self.screen.submit(&self.api).await? {
                    return Ok(Some(ADDED));
                }
            }
            ShellCommand::Show => {}
            ShellCommand::Login { .. } | ShellCommand::Help | ShellCommand::Quit => {}
        }
        Ok(None)
    }

    /// Unmounts the current screen and mounts wherever `route` lands.
    async fn go(&mut self, route: Route) {
        let route = guard(route, &self.session);
        self.screen = Screen::mount(route, &self.api).await;
    }

    fn render(&self) -> String {
        let screen = self.screen.to_string();
        match header(self.screen.route(), &self.session) {
            Some(header) => format!("{}\n\n{}", header, screen.trim_end()),
            None => screen.trim_end().to_string(),
        }
    }
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}
