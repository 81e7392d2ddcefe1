//! # HP 54620A RS
//!
//! A Rust library for controlling the HP 54620A 16 channel logic analyzer over GPIB.
//!
//! Every driver method turns into one ASCII command on the bus. Measurement and preamble
//! queries read the reply back after a short settle delay and parse it; replies that are
//! empty or not numeric come back as `None` instead of an error.
//!
//! ## Features
//!
//! - **Pluggable transport**: anything implementing [`GpibBus`] can carry the commands
//! - **Prologix support**: [`PrologixBus`] drives a Prologix GPIB-USB controller through `serialport`
//! - **Shared bus**: [`SharedBus`] lets several instruments on one controller take turns,
//!   each driver reselecting its own address when needed
//! - **Typed options**: thresholds, triggers, timebase and display settings are enums
//! - **Waveform transfer**: pod data as a `polars` DataFrame with one column per channel
//!
//! ## Examples
//!
//! ### Measuring a frequency
//!
//! ```rust,no_run
//! use hp54620a_rs::{Function, Hp54620a, PrologixBus};
//!
//! let bus = PrologixBus::new("/dev/ttyUSB0")?;
//! let mut analyzer = Hp54620a::new(bus, 7);
//!
//! println!("Connected to {}", analyzer.get_idn()?);
//! analyzer.source_measure(0)?;
//! match analyzer.measure(Function::Frequency)? {
//!     Some(hz) => println!("Channel 0 runs at {} Hz", hz),
//!     None => println!("No valid measurement"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Labels and thresholds
//!
//! ```rust,no_run
//! use hp54620a_rs::{ChannelGroup, Hp54620a, PrologixBus, ThresholdType};
//!
//! let mut analyzer = Hp54620a::new(PrologixBus::new("/dev/ttyUSB0")?, 7);
//!
//! analyzer.set_threshold(ChannelGroup::Channel0To7, ThresholdType::User(1.4))?;
//! analyzer.set_label_text(&["SCL", "SDA"])?;
//! analyzer.display_label(true)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Two instruments on one controller
//!
//! ```rust,no_run
//! use hp54620a_rs::{Hp54620a, PrologixBus, SharedBus};
//!
//! let bus = SharedBus::new(PrologixBus::new("/dev/ttyUSB0")?);
//! let mut left = Hp54620a::new(bus.clone(), 7);
//! let mut right = Hp54620a::new(bus, 8);
//!
//! left.run_single()?;
//! right.run_single()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod gpib_bus;
pub mod hp_54620a;
pub mod options;
pub mod prologix;
pub mod waveform;

// Re-export the main types for convenience
pub use options::{
    AcquireType, ChannelGroup, Function, Grid, PixelColor, ThresholdType, TimeBaseMode,
    TimeBaseReference, TriggerEdge, TriggerMode, TriggerType, WaveformFormat,
};

pub use gpib_bus::{GpibBus, GpibBusError, SharedBus};

pub use prologix::{PrologixBus, PrologixSettings};

pub use hp_54620a::{Hp54620a, Hp54620aError};

pub use waveform::{WaveformCapture, WaveformPreamble};
