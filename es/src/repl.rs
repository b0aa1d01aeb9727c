//! Interactive terminal front-end: sign-in screen, then the dashboard

use std::sync::Arc;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::dashboard::{Applied, Dashboard};
use crate::render::{render_collection, render_path, submit_label};
use crate::session::{Authenticator, Credentials, Session, View};

/// Parsed dashboard input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardInput {
    /// Blank line
    Nothing,
    /// Generate a path for this topic
    Topic(String),
    /// Replace the search term (empty clears it)
    Search(String),
    List,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one dashboard line
///
/// Topics and search terms are kept verbatim: a topic line is passed on as
/// typed, and the search term is everything after `/search `.
pub fn parse_dashboard_input(line: &str) -> DashboardInput {
    if line.trim().is_empty() {
        return DashboardInput::Nothing;
    }

    let trimmed = line.trim_start();
    if !trimmed.starts_with('/') {
        return DashboardInput::Topic(line.to_string());
    }

    let (cmd, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed.trim_end(), ""));

    match cmd {
        "/search" | "/s" => DashboardInput::Search(rest.trim_end_matches(['\r', '\n']).to_string()),
        "/list" | "/l" => DashboardInput::List,
        "/help" | "/h" => DashboardInput::Help,
        "/quit" | "/q" | "/exit" => DashboardInput::Quit,
        other => DashboardInput::Unknown(other.to_string()),
    }
}

/// Interactive session driving a [`Session`] and a [`Dashboard`]
pub struct DashboardRepl {
    session: Session,
    authenticator: Arc<dyn Authenticator>,
    dashboard: Dashboard,
}

impl DashboardRepl {
    pub fn new(authenticator: Arc<dyn Authenticator>, dashboard: Dashboard) -> Self {
        Self {
            session: Session::new(),
            authenticator,
            dashboard,
        }
    }

    /// Run sign-in, then the dashboard loop, until the user quits
    pub async fn run(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        println!();
        println!("{}", "EdSkill Hub".bold());
        println!("{}", "Learn. Lead. Earn. Empower.".dimmed());
        println!();

        loop {
            let keep_going = match self.session.view() {
                View::Login => self.login_screen(&mut rl).await?,
                View::Dashboard => self.dashboard_screen(&mut rl).await?,
            };
            if !keep_going {
                break;
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// One sign-in attempt; false if the user gave up
    async fn login_screen(&mut self, rl: &mut DefaultEditor) -> Result<bool> {
        let email = match rl.readline("Email: ") {
            Ok(line) => line.trim().to_string(),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(false),
            Err(err) => return Err(eyre::eyre!("Readline error: {}", err)),
        };
        let password = match rl.readline("Password: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(false),
            Err(err) => return Err(eyre::eyre!("Readline error: {}", err)),
        };

        println!("{}", "Signing in...".dimmed());
        let credentials = Credentials::new(email, password);
        let signed_in = self
            .session
            .login(self.authenticator.as_ref(), &credentials)
            .await
            .map(|_| ());
        match signed_in {
            Ok(()) => self.print_welcome(),
            Err(e) => println!("{} {}", "✗".red(), e),
        }

        Ok(true)
    }

    /// Read and handle one dashboard line; false when the user quits
    async fn dashboard_screen(&mut self, rl: &mut DefaultEditor) -> Result<bool> {
        let prompt = format!("{} ", "What do you want to master? >".truecolor(249, 115, 22));
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                return Ok(true);
            }
            Err(ReadlineError::Eof) => {
                println!();
                return Ok(false);
            }
            Err(err) => return Err(eyre::eyre!("Readline error: {}", err)),
        };

        let input = parse_dashboard_input(&line);
        if input != DashboardInput::Nothing {
            let _ = rl.add_history_entry(line.trim());
        }

        match input {
            DashboardInput::Nothing => {}
            DashboardInput::Topic(topic) => self.generate(topic).await,
            DashboardInput::Search(term) => {
                self.dashboard.set_search_term(term);
                print!("{}", render_collection(self.dashboard.paths()));
            }
            DashboardInput::List => print!("{}", render_collection(self.dashboard.paths())),
            DashboardInput::Help => self.print_help(),
            DashboardInput::Quit => return Ok(false),
            DashboardInput::Unknown(cmd) => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
            }
        }

        Ok(true)
    }

    async fn generate(&mut self, topic: String) {
        self.dashboard.set_topic_input(topic);
        if !self.dashboard.can_submit() {
            return;
        }
        if let Err(e) = self.dashboard.submit() {
            println!("{} {}", "✗".red(), e);
            return;
        }

        println!("{}", submit_label(true).dimmed());
        for applied in self.dashboard.settle().await {
            match applied {
                Applied::Recorded => {
                    if let Some(path) = self.dashboard.paths().paths().next() {
                        println!();
                        print!("{}", render_path(path));
                    }
                }
                Applied::Failed(failure) => println!("{} {}", "✗".red(), failure.user_message()),
                Applied::Discarded => {}
            }
        }
    }

    fn print_welcome(&self) {
        let who = self.session.identity().map(|i| i.email.as_str()).unwrap_or("");
        println!();
        println!("{} {}", "My Learning".bold(), who.dimmed());
        println!("{}", "AI-powered roadmaps tailored to your goals.".dimmed());
        println!("Type a topic to generate a roadmap, {} for help", "/help".yellow());
        println!();
        print!("{}", render_collection(self.dashboard.paths()));
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:16} Generate a roadmap for <topic>", "<topic>".yellow());
        println!("  {:16} Filter paths by topic (empty clears)", "/search <term>".yellow());
        println!("  {:16} Show the visible paths", "/list".yellow());
        println!("  {:16} Show this help", "/help".yellow());
        println!("  {:16} Exit", "/quit".yellow());
        println!();
    }
}
