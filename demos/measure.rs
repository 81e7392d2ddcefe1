// Repeated measurement example
//
// Selects a channel and prints a measurement every second.

use clap::Parser;
use hp54620a_rs::{Function, Hp54620a, PrologixBus};
use std::thread;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "measure")]
#[command(about = "Periodically read an automatic measurement from an HP 54620A")]
struct Args {
    /// Serial port of the Prologix controller
    #[arg(short, long, default_value = "/dev/ttyUSB0")]
    port: String,

    /// GPIB address of the analyzer
    #[arg(short, long, default_value_t = 7)]
    address: u8,

    /// Logic channel to measure
    #[arg(short, long, default_value_t = 0)]
    channel: u8,

    /// Measurement to take
    #[arg(short, long, default_value = "freq", value_parser = ["freq", "period", "duty", "pwidth", "nwidth", "delay", "hold"])]
    function: String,

    /// Number of readings (0 runs forever)
    #[arg(short, long, default_value_t = 10)]
    count: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    let function = match args.function.as_str() {
        "period" => Function::Period,
        "duty" => Function::DutyCycle,
        "pwidth" => Function::PositiveWidth,
        "nwidth" => Function::NegativeWidth,
        "delay" => Function::Delay,
        "hold" => Function::Hold,
        _ => Function::Frequency,
    };

    let mut analyzer = Hp54620a::new(PrologixBus::new(&args.port)?, args.address);
    analyzer.source_measure(args.channel)?;
    analyzer.show_measure(true)?;

    let mut taken = 0;
    while args.count == 0 || taken < args.count {
        match analyzer.measure(function)? {
            Some(value) => println!("{:?} on channel {}: {}", function, args.channel, value),
            None => println!("{:?} on channel {}: no value", function, args.channel),
        }
        taken += 1;
        thread::sleep(Duration::from_secs(1));
    }

    analyzer.local()?;
    Ok(())
}
