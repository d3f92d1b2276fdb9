mod config;
mod terminal;

use std::io::{self, BufRead};
use dotenv::dotenv;
use log::{debug, info, warn};
use codepad_widget::{CodeEntryController, EntryStatus};
use crate::config::Config;
use crate::terminal::{parse_token, Command};

const HELP: &str = "Type key labels (e.g. `1234`), `<` for backspace, `ok` to confirm, `reset` to relabel keys, `quit` to leave.";

fn main() -> eyre::Result<()> {
    // Initialize environment and logger
    dotenv().ok();
    pretty_env_logger::init();

    info!("Codepad starting...");

    debug!("Trying to load config from {}...", Config::path().display());
    let config = if let Some(config) = Config::try_load()? {
        info!("Config loaded.");
        config
    } else {
        info!("Config not found. Using default");
        let config = Config::default();
        config.save()?;
        info!("Default config saved.");
        config
    };

    let settings = config.settings()?;
    let surfaces = terminal::surfaces(&config, io::stdout);
    let mut controller = CodeEntryController::new(settings, surfaces)?;

    info!(
        "Codepad initialized: {} {} required.",
        controller.rules().required.get(),
        controller.rules().allowed,
    );
    println!("{}", HELP);

    for line in io::stdin().lock().lines() {
        let line = line?;
        for token in line.split_whitespace() {
            let commands = match parse_token(token, &controller.key_labels()) {
                Ok(commands) => commands,
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            };

            for command in commands {
                match command {
                    Command::Press(id) => controller.activate(id)?,
                    Command::ResetLabels => controller.reset_labels_to_names()?,
                    Command::Quit => {
                        info!("Quitting without a code.");
                        return Ok(());
                    }
                }
            }

            if controller.is_submitted() {
                info!("Code submitted, keypad locked.");
                return Ok(());
            }
        }

        if controller.status() == EntryStatus::Complete {
            println!("Code complete. Type `ok` to confirm.");
        }
    }

    info!("Input closed without a code.");
    Ok(())
}
