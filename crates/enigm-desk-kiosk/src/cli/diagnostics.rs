/*
[INPUT]:  Kiosk configuration, live serial links
[OUTPUT]: Printed sensor states and badge scan results
[POS]:    CLI hardware diagnostics (sensors, scan)
[UPDATE]: When sensors, the RFID bridge or the roster change
*/

use anyhow::{Context, Result};
use console::style;

use enigm_desk_adapter::{
    CardScanner, RfidReader, SensorClient, SensorName, SensorBus, SensorResponse,
    SerialTagDevice,
};
use enigm_desk_kiosk::config::KioskConfig;

/// Query every sensor once and print the typed response.
pub fn run_sensors(config: &KioskConfig) -> Result<()> {
    let link = config.sensor_link();
    let mut client = SensorClient::open(&link)
        .with_context(|| format!("open sensor link {}", link.port))?;

    println!("{}", style(format!("Sensors on {}", link.port)).bold().cyan());
    for sensor in SensorName::ALL {
        let response = client
            .query_response(sensor)
            .with_context(|| format!("query {sensor} on {}", link.port))?;
        println!("  {:<10} {}", sensor.to_string(), describe(&response));
    }

    client.shutdown();
    Ok(())
}

/// Scan one badge and report which task it belongs to.
pub fn run_scan(config: &KioskConfig) -> Result<()> {
    let roster = config.roster()?;
    let link = config.rfid_link();
    let device = SerialTagDevice::open(&link)
        .with_context(|| format!("open rfid bridge {}", link.port))?;
    let mut reader = RfidReader::new(device);

    println!("{}", style("Place a badge on the reader...").dim());
    match reader.scan() {
        Ok(card) => {
            println!("Badge {}", style(card).bold());
            match roster.iter().position(|slot| *slot == card) {
                Some(index) => println!("Unlocks task {}", style(index + 1).green()),
                None => println!("{}", style("Not in the roster").yellow()),
            }
        }
        Err(err) => println!("{} {err}", style("Scan failed:").red()),
    }
    Ok(())
}

fn describe(response: &SensorResponse) -> String {
    match response {
        SensorResponse::Activated => style("activated").green().to_string(),
        SensorResponse::NotActivated => style("not activated").dim().to_string(),
        SensorResponse::Malformed(line) => {
            style(format!("malformed reply {line:?}")).yellow().to_string()
        }
    }
}
