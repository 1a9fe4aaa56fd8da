use clap::{Parser, Subcommand};
use format_num::format_num;
use hullspeed::{MethodSelector, Ship};
use hullspeed::units::SpeedUnit;

use std::error::Error;

// Command line parsing {{{1
//
#[derive(Parser)]
#[command(version)]
#[command(about = "Ship resistance and propulsion prediction", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    #[arg(help = "Resistance method: holtrop or lang-mao")]
    method: Option<String>,

    #[arg(short, long, default_value = "kn")]
    #[arg(help = "Speed unit for input and tabulation: kn or mps")]
    unit: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resistance and propulsion report for a ship file
    Report {
        file: String,

        #[arg(short, long)]
        #[arg(help = "Evaluate at this speed instead of the stored one")]
        speed: Option<f64>,
    },

    /// Tabulate total resistance over a range of speeds
    Sweep {
        file: String,

        #[arg(long, default_value_t = 5.0)]
        #[arg(help = "First speed")]
        from: f64,

        #[arg(long, default_value_t = 20.0)]
        #[arg(help = "Last speed")]
        to: f64,

        #[arg(long, default_value_t = 1.0)]
        #[arg(help = "Speed increment")]
        step: f64,
    },
}

// Report and Sweep {{{1
//
fn report(mut ship: Ship, speed: Option<f64>, unit: SpeedUnit)
    -> Result<(), Box<dyn Error>>
{
    if let Some(speed) = speed {
        ship.set_speed(unit.to_mps(speed));
    }

    println!("{}", ship.report()?);
    Ok(())
}

fn sweep(mut ship: Ship, from: f64, to: f64, step: f64, unit: SpeedUnit)
    -> Result<(), Box<dyn Error>>
{
    if step <= 0.0 || to < from {
        return Err("sweep range must run forward with a positive step".into());
    }

    println!("{:>8} {:>12} {:>12}", unit.to_string(), "kN", "kW effective");

    let mut speed = from;
    while speed <= to + 1e-9 {
        ship.set_speed(unit.to_mps(speed));
        let resistance = ship.calculate_total_resistance()?;
        let power = ship.effective_power()?;

        println!("{:>8.1} {:>12} {:>12}",
            speed,
            format_num!(",.2", resistance / 1000.0),
            format_num!(",.1", power / 1000.0),
        );
        speed += step;
    }

    Ok(())
}

// Main {{{1
//
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let method = cli.method;
    let unit = SpeedUnit::from(cli.unit.as_str());

    let load = move |file: String| -> Result<Ship, Box<dyn Error>> {
        let mut ship = Ship::load(file)?;
        if let Some(name) = &method {
            ship.set_method(MethodSelector::from(name.as_str()));
        }
        Ok(ship)
    };

    match cli.command {
        Commands::Report { file, speed } =>
            report(load(file)?, speed, unit),

        Commands::Sweep { file, from, to, step } =>
            sweep(load(file)?, from, to, step, unit),
    }
}
