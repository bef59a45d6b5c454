//! admin-console: drive the content API's admin surface from the terminal.
//! Each subcommand replays one console event and prints the resulting region.
#![deny(clippy::all, clippy::pedantic)]

mod handlers;
mod print;

use admin_console::{
    AdminConsole, ConsoleError,
    application::toast::ToastStack,
    config,
    infra::{gateway::Gateway, telemetry},
};

#[tokio::main]
async fn main() -> Result<(), ConsoleError> {
    let (cli, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    let toasts = ToastStack::new(settings.toasts.ttl);
    let gateway = Gateway::new(&settings.api, toasts.clone())?;
    let console = AdminConsole::new(gateway);

    let outcome = handlers::handle(&console, cli.command).await;

    let failures = toasts.error_count();
    let pending = toasts.drain();
    print::print_toasts(&pending);
    outcome?;

    if failures > 0 {
        return Err(ConsoleError::Rejected(format!(
            "{failures} request(s) failed"
        )));
    }
    Ok(())
}
