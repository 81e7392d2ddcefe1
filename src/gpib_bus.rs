use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum GpibBusError {
    #[error("Serial port error: {0}")]
    SerialPort(#[from] serialport::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Timeout error: no line terminator after '{command}', got '{partial}'")]
    Timeout { command: String, partial: String },

    #[error("GPIB address {0} out of range, must be between 0 and 30")]
    InvalidAddress(u8),
}

/// A GPIB controller shared by every instrument on the bus.
///
/// The controller remembers which primary address it last talked to; drivers
/// compare it with their own before sending anything.
pub trait GpibBus {
    /// Address selected by the last `set_address`, if any
    fn address(&self) -> Option<u8>;

    fn set_address(&mut self, address: u8) -> Result<(), GpibBusError>;

    /// Send one command, then sleep for `sleep` if given
    fn write(&mut self, command: &str, sleep: Option<Duration>) -> Result<(), GpibBusError>;

    /// Send one command, sleep for `sleep` if given, then read one reply line
    fn query(&mut self, command: &str, sleep: Option<Duration>) -> Result<String, GpibBusError>;

    fn get_idn(&mut self) -> Result<String, GpibBusError>;

    /// Return the addressed instrument to front panel control
    fn local(&mut self) -> Result<(), GpibBusError>;
}

impl<B: GpibBus + ?Sized> GpibBus for &mut B {
    fn address(&self) -> Option<u8> {
        (**self).address()
    }

    fn set_address(&mut self, address: u8) -> Result<(), GpibBusError> {
        (**self).set_address(address)
    }

    fn write(&mut self, command: &str, sleep: Option<Duration>) -> Result<(), GpibBusError> {
        (**self).write(command, sleep)
    }

    fn query(&mut self, command: &str, sleep: Option<Duration>) -> Result<String, GpibBusError> {
        (**self).query(command, sleep)
    }

    fn get_idn(&mut self) -> Result<String, GpibBusError> {
        (**self).get_idn()
    }

    fn local(&mut self) -> Result<(), GpibBusError> {
        (**self).local()
    }
}

/// Cloneable handle so several drivers can sit on one controller.
///
/// Single-threaded only. Calls must not be made re-entrantly from inside another call.
#[derive(Debug)]
pub struct SharedBus<B> {
    inner: Rc<RefCell<B>>,
}

impl<B> Clone for SharedBus<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<B: GpibBus> SharedBus<B> {
    pub fn new(bus: B) -> Self {
        Self {
            inner: Rc::new(RefCell::new(bus)),
        }
    }

    /// Inspect the underlying bus
    pub fn borrow(&self) -> Ref<'_, B> {
        self.inner.borrow()
    }

    /// Recover the bus once every other handle has been dropped
    pub fn try_into_inner(self) -> Result<B, Self> {
        Rc::try_unwrap(self.inner)
            .map(RefCell::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<B: GpibBus> GpibBus for SharedBus<B> {
    fn address(&self) -> Option<u8> {
        self.inner.borrow().address()
    }

    fn set_address(&mut self, address: u8) -> Result<(), GpibBusError> {
        self.inner.borrow_mut().set_address(address)
    }

    fn write(&mut self, command: &str, sleep: Option<Duration>) -> Result<(), GpibBusError> {
        self.inner.borrow_mut().write(command, sleep)
    }

    fn query(&mut self, command: &str, sleep: Option<Duration>) -> Result<String, GpibBusError> {
        self.inner.borrow_mut().query(command, sleep)
    }

    fn get_idn(&mut self) -> Result<String, GpibBusError> {
        self.inner.borrow_mut().get_idn()
    }

    fn local(&mut self) -> Result<(), GpibBusError> {
        self.inner.borrow_mut().local()
    }
}
