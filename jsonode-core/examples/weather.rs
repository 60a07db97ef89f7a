//! Example: Probe a weather API response without trusting its shape.
//!
//! Reads a JSON body from stdin (or uses a built-in sample) and prints the
//! fields a display would show, falling back when a field is missing.
//!
//! Run with: RUST_LOG=debug cargo run --example weather < response.json

use std::io::{IsTerminal, Read};

use jsonode_core::parse;
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = r#"{
  "weather": [{"main": "Clouds", "description": "overcast clouds"}],
  "main": {"temp": 281.9, "humidity": 81},
  "wind": {"speed": 5.1},
  "name": "Amesbury",
}"#;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

fn main() {
    init_tracing();

    let mut body = String::new();
    let stdin = std::io::stdin();
    if stdin.is_terminal() || stdin.lock().read_to_string(&mut body).is_err() || body.is_empty() {
        body = SAMPLE.to_string();
    }

    let doc = match parse(&body) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(error = %e, "weather response unreadable");
            println!("Weather data unavailable");
            return;
        }
    };

    let kelvin = doc["main"]["temp"].as_double();
    let conditions = doc["weather"][0]["description"].value();
    let place = doc["name"].value();

    println!("Location:    {}", if place.is_empty() { "unknown" } else { &*place });
    if doc["main"]["temp"].is_number() {
        println!("Temperature: {:.1} °C", kelvin - 273.15);
    } else {
        println!("Temperature: n/a");
    }
    println!("Humidity:    {}%", doc["main"]["humidity"].as_int());
    println!("Wind:        {:.1} m/s", doc["wind"]["speed"].as_float());
    println!(
        "Conditions:  {}",
        if conditions.is_empty() { "n/a" } else { &*conditions }
    );

    println!("\n{}", doc.to_pretty_json());
}
