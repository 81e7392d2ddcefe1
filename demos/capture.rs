// Single-shot capture example
//
// Arms a single acquisition, transfers one pod and prints the resulting DataFrame.

use clap::Parser;
use hp54620a_rs::{ChannelGroup, Hp54620a, PrologixBus, TriggerEdge, TriggerMode};
use std::thread;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "capture")]
#[command(about = "Capture one pod of an HP 54620A into a DataFrame")]
struct Args {
    /// Serial port of the Prologix controller
    #[arg(short, long, default_value = "/dev/ttyUSB0")]
    port: String,

    /// GPIB address of the analyzer
    #[arg(short, long, default_value_t = 7)]
    address: u8,

    /// Capture channels 8-15 instead of 0-7
    #[arg(long)]
    upper_pod: bool,

    /// Channel to trigger on (rising edge)
    #[arg(short, long, default_value_t = 0)]
    trigger_channel: u8,

    /// Full-screen time range, e.g. 1MS
    #[arg(short, long, default_value = "1MS")]
    range: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let pod = if args.upper_pod {
        ChannelGroup::Channel8To15
    } else {
        ChannelGroup::Channel0To7
    };

    let mut analyzer = Hp54620a::new(PrologixBus::new(&args.port)?, args.address);
    analyzer.set_timebase_range(&args.range)?;
    analyzer.set_trigger_edge(args.trigger_channel, TriggerEdge::Rising)?;
    analyzer.set_trigger_mode(TriggerMode::Normal)?;
    analyzer.run_single()?;

    // Give the acquisition time to complete
    thread::sleep(Duration::from_secs(2));

    match analyzer.read_waveform(pod)? {
        Some(capture) => {
            println!("Captured {} samples", capture.samples.len());
            println!("{}", capture.to_dataframe()?);
        }
        None => println!("The analyzer returned no usable data"),
    }

    analyzer.local()?;
    Ok(())
}
