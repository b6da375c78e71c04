// Presentation layer for the terminal front end: command parsing, rendering
// and turning engine results into notifications.

pub mod commands;
pub mod render;

use crate::app::commands::{Command, HELP_TEXT};
use crate::app::render::render_state;
use crate::core::engine::ShoppingListEngine;
use crate::domain::model::ListState;
use crate::domain::ports::{InvoiceSource, SessionStorage};
use crate::utils::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

pub fn notify_error(error: &AppError) -> String {
    tracing::warn!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    format!(
        "❌ {}\n💡 {}",
        error.user_friendly_message(),
        error.recovery_suggestion()
    )
}

/// Runs one command against the engine and returns the text to show.
pub async fn execute<I, S>(engine: &ShoppingListEngine<I, S>, command: Command) -> Outcome
where
    I: InvoiceSource,
    S: SessionStorage,
{
    let text = match command {
        Command::Lookup(input) => match engine.lookup(&input).await {
            Ok(list) => format!(
                "✅ {} produto(s) encontrado(s).\n{}",
                list.len(),
                render_state(&ListState::Loaded(list))
            ),
            Err(e) => notify_error(&e),
        },
        Command::Remove(name) => match engine.remove(&name).await {
            Ok(true) => render_state(&engine.state().await),
            Ok(false) => format!("'{}' não está na lista.", name),
            Err(e) => notify_error(&e),
        },
        Command::Toggle(name) => match engine.toggle_checked(&name).await {
            Some(_) => render_state(&engine.state().await),
            None => format!("'{}' não está na lista.", name),
        },
        Command::Clear => match engine.clear().await {
            Ok(()) => render_state(&engine.state().await),
            Err(e) => notify_error(&e),
        },
        Command::List => render_state(&engine.state().await),
        Command::Help => HELP_TEXT.to_string(),
        Command::Quit => return Outcome::Quit,
    };
    Outcome::Continue(text)
}

/// Parses and runs one input line.
pub async fn execute_line<I, S>(engine: &ShoppingListEngine<I, S>, line: &str) -> Outcome
where
    I: InvoiceSource,
    S: SessionStorage,
{
    match line.parse::<Command>() {
        Ok(command) => execute(engine, command).await,
        Err(e) => Outcome::Continue(notify_error(&e)),
    }
}
