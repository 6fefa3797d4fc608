/*
[INPUT]:  Interactive operator input via CLI
[OUTPUT]: Generated YAML kiosk configuration file
[POS]:    CLI initialization layer
[UPDATE]: When KioskConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::path::PathBuf;

use enigm_desk_kiosk::config::KioskConfig;
use enigm_desk_kiosk::TASK_COUNT;
use enigm_desk_adapter::CardIdentifier;

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to Enigm Desk Init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a kiosk configuration.").dim()
    );

    let theme = ColorfulTheme::default();
    let mut config = KioskConfig::default();

    println!("\n{}", style("--- Serial links ---").bold());
    config.serial.port = Input::with_theme(&theme)
        .with_prompt("Sensor microcontroller port")
        .default(config.serial.port.clone())
        .interact_text()?;
    config.rfid.port = Input::with_theme(&theme)
        .with_prompt("RFID bridge port")
        .default(config.rfid.port.clone())
        .interact_text()?;

    println!("\n{}", style("--- Media ---").bold());
    let clue_path: String = Input::with_theme(&theme)
        .with_prompt("Clue file on the floppy (.txt)")
        .default(config.media.clue_path.display().to_string())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.ends_with(".txt") {
                Ok(())
            } else {
                Err("the clue must be a .txt file")
            }
        })
        .interact_text()?;
    config.media.clue_path = PathBuf::from(clue_path);

    let folder: String = Input::with_theme(&theme)
        .with_prompt("Picture frame folder")
        .default(config.pictures.folder.display().to_string())
        .interact_text()?;
    config.pictures.folder = PathBuf::from(folder);

    println!("\n{}", style("--- Task roster ---").bold());
    let keep_cards = Confirm::with_theme(&theme)
        .with_prompt("Keep the default badge roster?")
        .default(true)
        .interact()?;
    if !keep_cards {
        let mut cards = Vec::with_capacity(TASK_COUNT);
        for task in 1..=TASK_COUNT {
            let card: String = Input::with_theme(&theme)
                .with_prompt(format!("Task {task} badge (5 bytes, e.g. 25,201,83,179,48)"))
                .validate_with(|input: &String| parse_card(input).map(|_| ()))
                .interact_text()?;
            cards.push(parse_card(&card).map_err(anyhow::Error::msg)?);
        }
        config.rfid.cards = cards;
    }

    config.validate().context("generated configuration is invalid")?;

    let yaml = serde_yaml::to_string(&config).context("failed to serialize config to YAML")?;

    std::fs::write(&output, yaml)
        .context(format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}

/// Parse a comma or space separated list of decimal bytes.
fn parse_card(input: &str) -> Result<CardIdentifier, String> {
    let bytes = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<u8>().map_err(|_| format!("'{part}' is not a byte")))
        .collect::<Result<Vec<u8>, String>>()?;
    CardIdentifier::try_from(bytes).map_err(|err| err.to_string())
}
