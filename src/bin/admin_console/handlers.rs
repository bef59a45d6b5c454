#![deny(clippy::all, clippy::pedantic)]

use std::path::Path;

use admin_console::{
    AdminConsole, ConsoleError, ContentType,
    application::actions::AdminAction,
    config::{Command, DashboardArgs},
};

use crate::print::print_json;

pub async fn handle(console: &AdminConsole, command: Command) -> Result<(), ConsoleError> {
    match command {
        Command::Dashboard(args) => dashboard(console, args).await,
        Command::List { content_type } => {
            let content_type = ContentType::from(content_type);
            console.load_list(content_type).await;
            print_json(&console.list(content_type))
        }
        Command::Users => {
            console.load_users().await;
            print_json(&console.users())
        }
        Command::Stats => {
            console.load_stats().await;
            print_json(&console.stats())
        }
        Command::Me => {
            console.load_session().await;
            print_json(&console.session())
        }
        Command::Create {
            content_type,
            fields,
        } => create(console, content_type.into(), &fields).await,
        Command::Update {
            content_type,
            id,
            fields,
        } => update(console, content_type.into(), &id, &fields).await,
        Command::Delete { content_type, id } => {
            let content_type = ContentType::from(content_type);
            let action = AdminAction::Delete { content_type, id };
            if console.dispatch(action).await {
                print_json(&console.list(content_type))?;
            }
            Ok(())
        }
        Command::DeleteUser { id } => {
            if console.dispatch(AdminAction::DeleteUser { id }).await {
                print_json(&console.users())?;
            }
            Ok(())
        }
    }
}

async fn dashboard(console: &AdminConsole, args: DashboardArgs) -> Result<(), ConsoleError> {
    console.bootstrap().await;
    let view = console.view();
    let rendered = if args.html {
        view.render_html()?
    } else {
        serde_json::to_string_pretty(&view)?
    };

    match args.output {
        Some(path) => write_output(&path, rendered).await,
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}

async fn write_output(path: &Path, contents: String) -> Result<(), ConsoleError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ConsoleError::Output {
            path: path.display().to_string(),
            source,
        })
}

async fn create(
    console: &AdminConsole,
    content_type: ContentType,
    fields: &[(String, String)],
) -> Result<(), ConsoleError> {
    apply_fields(console, content_type, fields)?;
    if console.submit(content_type).await {
        print_json(&console.list(content_type))?;
    }
    Ok(())
}

/// Load the list, edit the card's record into the form, then save it.
async fn update(
    console: &AdminConsole,
    content_type: ContentType,
    id: &str,
    fields: &[(String, String)],
) -> Result<(), ConsoleError> {
    console.load_list(content_type).await;
    if !console.toasts().is_empty() {
        return Ok(());
    }

    let action = AdminAction::Edit {
        content_type,
        id: id.to_string(),
    };
    if !console.dispatch(action).await {
        return Err(ConsoleError::invalid_input(format!(
            "no {content_type} record with id `{id}`"
        )));
    }

    apply_fields(console, content_type, fields)?;
    if console.submit(content_type).await {
        print_json(&console.list(content_type))?;
    }
    Ok(())
}

fn apply_fields(
    console: &AdminConsole,
    content_type: ContentType,
    fields: &[(String, String)],
) -> Result<(), ConsoleError> {
    console.with_form_mut(content_type, |form| {
        for (name, value) in fields {
            if !form.set_input(name, value) {
                return Err(ConsoleError::invalid_input(format!(
                    "{content_type} has no field `{name}`"
                )));
            }
        }
        Ok(())
    })
}
