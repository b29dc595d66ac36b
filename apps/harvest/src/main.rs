use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{render_text, FormController, SimulationClient, ViewState};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Estimate the daily water yield of a collector at a location.
#[derive(Parser, Debug)]
#[command(name = "harvest", version)]
struct Args {
    /// Base URL of the simulation server.
    #[arg(long, env = "HARVEST_SERVER_URL", default_value = "http://127.0.0.1:8000")]
    server_url: String,
    /// City name; prompted for when omitted.
    #[arg(long)]
    location: Option<String>,
    /// Collector surface area in square metres; prompted for when omitted.
    #[arg(long, allow_hyphen_values = true)]
    surface_area: Option<String>,
    /// Keep prompting for new submissions until end of input.
    #[arg(long)]
    repeat: bool,
}

struct FormFields {
    location: String,
    surface_area: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let client = SimulationClient::new(&args.server_url)
        .with_context(|| format!("invalid server url '{}'", args.server_url))?;
    debug!(url = %client.simulate_url(), "harvest: using simulation endpoint");
    let controller = FormController::new(Arc::new(client));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut prefilled = Some((args.location.clone(), args.surface_area.clone()));
    let mut last_failed = false;

    loop {
        let (location, surface_area) = prefilled.take().unwrap_or((None, None));
        let Some(fields) = read_form(&mut input, location, surface_area)? else {
            break;
        };

        let pending = controller.begin(&fields.location, &fields.surface_area);
        println!("{}", render_text(&controller.current()));
        let submission = controller.finish(pending).await;
        println!("{}\n", render_text(&submission.view));
        last_failed = matches!(submission.view, ViewState::Error(_));

        if !args.repeat {
            break;
        }
    }

    Ok(if last_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Fills whichever fields were not given on the command line. `None` on end of input.
fn read_form(
    input: &mut impl BufRead,
    location: Option<String>,
    surface_area: Option<String>,
) -> Result<Option<FormFields>> {
    let location = match location {
        Some(value) => value,
        None => match prompt(input, "Location")? {
            Some(value) => value,
            None => return Ok(None),
        },
    };
    let surface_area = match surface_area {
        Some(value) => value,
        None => match prompt(input, "Surface area (m²)")? {
            Some(value) => value,
            None => return Ok(None),
        },
    };
    Ok(Some(FormFields {
        location,
        surface_area,
    }))
}

fn prompt(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn flags_skip_prompts() {
        let mut input = Cursor::new(Vec::new());
        let fields = read_form(&mut input, Some("Austin".into()), Some("50".into()))
            .expect("read")
            .expect("fields");
        assert_eq!(fields.location, "Austin");
        assert_eq!(fields.surface_area, "50");
    }

    #[test]
    fn missing_fields_are_prompted() {
        let mut input = Cursor::new(b"Lima\r\n12.5\n".to_vec());
        let fields = read_form(&mut input, None, None)
            .expect("read")
            .expect("fields");
        assert_eq!(fields.location, "Lima");
        assert_eq!(fields.surface_area, "12.5");
    }

    #[test]
    fn end_of_input_stops_the_loop() {
        let mut input = Cursor::new(b"Lima\n".to_vec());
        assert!(read_form(&mut input, None, None).expect("read").is_none());
    }

    #[test]
    fn surface_area_flag_accepts_negative_values() {
        let args = Args::try_parse_from([
            "harvest",
            "--server-url",
            "http://localhost:9000",
            "--surface-area",
            "-3",
        ])
        .expect("args");
        assert_eq!(args.surface_area.as_deref(), Some("-3"));
        assert!(!args.repeat);
    }
}
