use crate::gpib_bus::{GpibBus, GpibBusError};
use serialport::SerialPort;
use std::io::{ErrorKind, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

/// Highest primary address on a GPIB bus
pub const MAX_GPIB_ADDRESS: u8 = 30;

/// Serial and controller settings for a Prologix GPIB-USB adapter
#[derive(Debug, Clone)]
pub struct PrologixSettings {
    pub baud_rate: u32,
    /// How long to wait for a full reply line on the serial side
    pub read_timeout: Duration,
    /// Controller side timeout between bytes on the GPIB bus (`++read_tmo_ms`, 1..=3000 ms)
    pub gpib_read_timeout: Duration,
}

impl Default for PrologixSettings {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            read_timeout: Duration::from_secs(3),
            gpib_read_timeout: Duration::from_millis(1200),
        }
    }
}

/// A Prologix controller driving the GPIB bus through `++` commands.
pub struct PrologixBus<P = Box<dyn SerialPort>> {
    port: P,
    address: Option<u8>,
    settings: PrologixSettings,
}

impl PrologixBus {
    const SERIAL_TIMEOUT: Duration = Duration::from_millis(10);

    /// Open the controller on a serial port with default settings
    pub fn new(port: &str) -> Result<Self, GpibBusError> {
        Self::with_settings(port, PrologixSettings::default())
    }

    pub fn with_settings(port: &str, settings: PrologixSettings) -> Result<Self, GpibBusError> {
        let serial = serialport::new(port, settings.baud_rate)
            .timeout(Self::SERIAL_TIMEOUT)
            .open()?;
        serial.clear(serialport::ClearBuffer::All)?;

        log::debug!("Connected to Prologix controller on {}", port);
        Self::from_port(serial, settings)
    }
}

impl<P: Read + Write> PrologixBus<P> {
    /// Wrap an already open byte stream and put the controller in controller mode
    pub fn from_port(port: P, settings: PrologixSettings) -> Result<Self, GpibBusError> {
        let mut bus = Self {
            port,
            address: None,
            settings,
        };

        log::debug!("Switching Prologix to controller mode without read-after-write");
        bus.send_line("++mode 1")?;
        bus.send_line("++auto 0")?;
        let tmo_ms = bus.settings.gpib_read_timeout.as_millis();
        bus.send_line(&format!("++read_tmo_ms {}", tmo_ms))?;
        Ok(bus)
    }

    /// Firmware version string of the controller
    pub fn version(&mut self) -> Result<String, GpibBusError> {
        self.send_line("++ver")?;
        self.read_line("++ver")
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }

    fn send_line(&mut self, line: &str) -> Result<(), GpibBusError> {
        let line_with_newline = format!("{}\n", line);
        self.port.write_all(line_with_newline.as_bytes())?;
        self.port.flush()?;
        Ok(())
    }

    fn read_line(&mut self, command: &str) -> Result<String, GpibBusError> {
        let mut response = Vec::new();
        let now = Instant::now();

        loop {
            let mut byte = [0u8; 1];
            match self.port.read_exact(&mut byte) {
                Ok(_) => {
                    if byte[0] == b'\n' {
                        break;
                    }
                    response.push(byte[0]);
                }
                Err(e) if e.kind() == ErrorKind::TimedOut => {
                    if now.elapsed() >= self.settings.read_timeout {
                        return Err(GpibBusError::Timeout {
                            command: command.to_string(),
                            partial: String::from_utf8_lossy(&response).to_string(),
                        });
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        let line = String::from_utf8(response)?;
        Ok(line.trim_end_matches('\r').to_string())
    }
}

fn check_address(address: u8) -> Result<u8, GpibBusError> {
    if address > MAX_GPIB_ADDRESS {
        return Err(GpibBusError::InvalidAddress(address));
    }
    Ok(address)
}

impl<P: Read + Write> GpibBus for PrologixBus<P> {
    fn address(&self) -> Option<u8> {
        self.address
    }

    fn set_address(&mut self, address: u8) -> Result<(), GpibBusError> {
        let address = check_address(address)?;
        log::debug!("Selecting GPIB address {}", address);
        self.send_line(&format!("++addr {}", address))?;
        self.address = Some(address);
        Ok(())
    }

    fn write(&mut self, command: &str, sleep: Option<Duration>) -> Result<(), GpibBusError> {
        self.send_line(command)?;
        if let Some(sleep) = sleep {
            thread::sleep(sleep);
        }
        Ok(())
    }

    fn query(&mut self, command: &str, sleep: Option<Duration>) -> Result<String, GpibBusError> {
        self.write(command, sleep)?;
        self.read_line(command)
    }

    fn get_idn(&mut self) -> Result<String, GpibBusError> {
        self.send_line("*IDN?")?;
        self.query("++read eoi", None)
    }

    fn local(&mut self) -> Result<(), GpibBusError> {
        self.send_line("++loc")
    }
}
