use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use client_core::{Budgets, CrudController, CrudResource, Users};

mod settings;

#[derive(Parser, Debug)]
#[command(about = "Administrative console for the user and budget collections")]
struct Args {
    /// Base URL of the collection API, e.g. http://localhost:8080
    #[arg(long)]
    server_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = settings::load_settings(args.server_url)?;
    tracing::info!(server_url = %settings.server_url, "starting console");

    // One controller per entity type, side by side, nothing shared.
    let mut users: CrudController<Users> = CrudController::new(settings.server_url.clone());
    let mut budgets: CrudController<Budgets> = CrudController::new(settings.server_url);
    users.refresh().await;
    budgets.refresh().await;

    println!("panels: user, budget — type 'help' for commands, 'quit' to exit");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["help"] => print_help(),
            ["user", rest @ ..] => run_panel_command(&mut users, rest).await,
            ["budget", rest @ ..] => run_panel_command(&mut budgets, rest).await,
            [other, ..] => println!("unknown panel '{other}' (expected 'user' or 'budget')"),
        }
    }
    Ok(())
}

async fn run_panel_command<R: CrudResource>(controller: &mut CrudController<R>, command: &[&str]) {
    match command {
        ["list"] => {
            controller.refresh().await;
            if controller.items().is_empty() {
                println!("(no rows)");
            }
            for view in controller.items() {
                println!("{}", R::summarize(view));
            }
        }
        // No value means "assign empty": the only way to blank one field
        // without discarding the whole draft.
        ["set", field, value @ ..] => {
            let value = value.join(" ");
            if controller.set_field(field, &value) {
                println!("{field} = '{value}'");
            } else {
                println!("unknown field '{field}'");
            }
        }
        ["edit", id] => match id.parse::<i64>() {
            Ok(id) => {
                let Some(view) = controller
                    .items()
                    .iter()
                    .find(|view| R::id(view) == id)
                    .cloned()
                else {
                    println!("no row with id {id} in the current list (try 'list')");
                    return;
                };
                controller.select_for_edit(&view);
                println!(
                    "editing {} {id}; adjust fields with 'set', then 'submit'",
                    R::LABEL
                );
            }
            Err(_) => println!("'{id}' is not a valid id"),
        },
        ["submit"] => {
            controller.submit().await;
            println!("{}", controller.status_message());
        }
        ["delete", id] => match id.parse::<i64>() {
            Ok(id) => {
                controller.remove(id).await;
                println!("{}", controller.status_message());
            }
            Err(_) => println!("'{id}' is not a valid id"),
        },
        ["show"] => {
            match serde_json::to_string_pretty(controller.draft()) {
                Ok(draft) => println!("{draft}"),
                Err(err) => println!("draft not serializable: {err}"),
            }
            match controller.edit_target() {
                Some(id) => println!("mode: updating id {id}"),
                None => println!("mode: creating"),
            }
        }
        ["cancel"] => {
            controller.cancel();
            println!("draft discarded, back to create mode");
        }
        _ => println!("unknown command; type 'help'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // set/show never touch the network, so an unreachable base url is fine.
    #[tokio::test]
    async fn set_with_no_value_blanks_a_single_field() {
        let mut controller: CrudController<Budgets> =
            CrudController::new("http://127.0.0.1:9");

        run_panel_command(&mut controller, &["set", "valor", "100"]).await;
        run_panel_command(&mut controller, &["set", "status", "pendente"]).await;
        assert_eq!(controller.draft().valor, "100");

        run_panel_command(&mut controller, &["set", "valor"]).await;
        assert_eq!(controller.draft().valor, "");
        assert_eq!(controller.draft().status, "pendente");
    }
}

fn print_help() {
    println!("<panel> list              fetch and print the collection");
    println!("<panel> set <field> [v]   assign one draft field by wire name (omit the value to blank it)");
    println!("<panel> edit <id>         load a listed row into the draft for update");
    println!("<panel> show              print the draft and the current mode");
    println!("<panel> submit            create, or update the selected row");
    println!("<panel> delete <id>       remove a row");
    println!("<panel> cancel            discard the draft and leave edit mode");
    println!("help | quit");
    println!("panels: user, budget");
}
