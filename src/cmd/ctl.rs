//! Terminal counterpart of the browser dashboard.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;

use crate::client::{ClientError, DashboardClient, Notice, Snapshot};

const TANK_BAR_CELLS: usize = 20;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
    #[error("The command did not succeed")]
    Unsuccessful,
}

#[derive(Parser, Debug)]
pub struct CtlArgs {
    /// Base URL of the gateway.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    url: String,
    #[command(subcommand)]
    action: CtlAction,
}

#[derive(Subcommand, Debug)]
pub enum CtlAction {
    /// Shows dashboard metrics and sensor readings.
    Status,
    /// Starts spraying.
    Start,
    /// Stops spraying.
    Stop,
    /// Halts the robot immediately.
    Estop {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn execute(args: CtlArgs) -> Result<(), Error> {
    let client = DashboardClient::new(&args.url)?;

    let notice = match args.action {
        CtlAction::Status => match client.refresh().await {
            Ok(snapshot) => {
                println!("{}", render_snapshot(&snapshot));
                return Ok(());
            }
            Err(e) => Notice::Transport(e.to_string()),
        },
        CtlAction::Start => client.start().await,
        CtlAction::Stop => client.stop().await,
        CtlAction::Estop { yes } => client.emergency_stop(|| yes || confirm_on_stdin()).await,
    };

    println!("{notice}");
    match notice {
        Notice::Success(_) | Notice::Cancelled => Ok(()),
        Notice::Failure(_) | Notice::Transport(_) => Err(Error::Unsuccessful),
    }
}

fn confirm_on_stdin() -> bool {
    print!("Trigger EMERGENCY STOP? This halts the robot immediately. [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_snapshot(snapshot: &Snapshot) -> String {
    let dashboard = &snapshot.dashboard;
    let sensors = &snapshot.sensors;
    let filled = usize::from(snapshot.tank_bar_width()) * TANK_BAR_CELLS / 100;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(TANK_BAR_CELLS - filled));

    [
        format!("Spraying time : {}", render_value(&dashboard.summary_time)),
        format!("Dosage used   : {} L", render_value(&dashboard.dosage_used)),
        format!("Area covered  : {} acres", render_value(&dashboard.area_covered)),
        format!("Battery       : {}%", render_value(&dashboard.battery_level)),
        format!("Tank level    : {} [{}]", render_value(&sensors.tank_level), bar),
        format!(
            "Weather       : {} ({})",
            render_value(&sensors.weather_value),
            render_value(&sensors.weather_note)
        ),
    ]
    .join("\n")
}
