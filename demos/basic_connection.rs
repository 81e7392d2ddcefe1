// Basic connection example
//
// This example opens a Prologix controller and identifies the HP 54620A behind it.

use hp54620a_rs::{Hp54620a, PrologixBus};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (optional)
    env_logger::init();

    println!("HP 54620A Connection Example");
    println!("============================\n");

    println!("1. Opening Prologix controller on /dev/ttyUSB0...");
    let mut bus = PrologixBus::new("/dev/ttyUSB0")?;
    println!("Controller firmware: {}\n", bus.version()?);

    println!("2. Identifying the analyzer at GPIB address 7...");
    let mut analyzer = Hp54620a::new(bus, 7);
    let idn = analyzer.get_idn()?;
    println!("{} answers: {}\n", analyzer, idn);

    println!("3. Writing a greeting on the screen...");
    analyzer.set_display_row(1)?;
    analyzer.set_display_column(0)?;
    analyzer.set_display_text("Hello from Rust")?;

    println!("4. Handing the front panel back");
    analyzer.local()?;

    Ok(())
}
