use crate::gpib_bus::{GpibBus, GpibBusError};
use crate::options::{
    AcquireType, ChannelGroup, Function, Grid, PixelColor, ThresholdType, TimeBaseMode,
    TimeBaseReference, TriggerEdge, TriggerMode, TriggerType, WaveformFormat,
};
use crate::waveform::{WaveformCapture, WaveformPreamble};
use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Hp54620aError {
    #[error("GPIB bus error: {0}")]
    Bus(#[from] GpibBusError),

    #[error("Channel {0} out of range, must be between 0 and 15")]
    ChannelOutOfRange(u8),

    #[error("Pixel ({x}, {y}) is off screen (x 0..=500, y 0..=275)")]
    PixelOutOfRange { x: u16, y: u16 },

    #[error("Display column {0} out of range (0..=62)")]
    ColumnOutOfRange(u8),

    #[error("Display row {0} out of range (1..=20)")]
    RowOutOfRange(u8),

    #[error("{0} labels given but the instrument only has 16 channels")]
    TooManyLabels(usize),
}

/// HP 54620A 16 channel logic analyzer on a GPIB bus
pub struct Hp54620a<B: GpibBus> {
    bus: B,
    address: u8,
    first_time: bool,
    settle_delay: Duration,
}

impl<B: GpibBus> Hp54620a<B> {
    pub const CHANNELS: u8 = 16;
    pub const MAX_LABEL_LEN: usize = 6;
    pub const MAX_TEXT_LEN: usize = 64;
    pub const PIXEL_X_MAX: u16 = 500;
    pub const PIXEL_Y_MAX: u16 = 275;
    pub const DISPLAY_COLUMNS: RangeInclusive<u8> = 0..=62;
    pub const DISPLAY_ROWS: RangeInclusive<u8> = 1..=20;

    /// Wait between a query command and reading back its reply
    pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(400);
    const PIXEL_SETTLE_DELAY: Duration = Duration::from_millis(15);

    // Controller commands: terminate replies with LF, read the addressed device
    const END_OF_RECORD: &str = "++eor 2";
    const READ: &str = "++read";

    /// Create a driver for the instrument at `address`.
    ///
    /// Nothing is sent until the first command, which selects the address.
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            first_time: true,
            settle_delay: Self::DEFAULT_SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn into_bus(self) -> B {
        self.bus
    }

    /// Select this instrument on the bus unless it is already selected
    fn pre_command(&mut self) -> Result<(), Hp54620aError> {
        if self.first_time || self.bus.address() != Some(self.address) {
            log::debug!("Selecting HP 54620A at GPIB address {}", self.address);
            self.bus.set_address(self.address)?;
            self.bus.write(Self::END_OF_RECORD, None)?;
            self.first_time = false;
        }
        Ok(())
    }

    fn send(&mut self, command: &str) -> Result<(), Hp54620aError> {
        self.pre_command()?;
        self.bus.write(command, None)?;
        Ok(())
    }

    fn read_reply(&mut self) -> Result<String, Hp54620aError> {
        Ok(self.bus.query(Self::READ, Some(self.settle_delay))?)
    }

    fn check_channel(channel: u8) -> Result<u8, Hp54620aError> {
        if channel >= Self::CHANNELS {
            return Err(Hp54620aError::ChannelOutOfRange(channel));
        }
        Ok(channel)
    }

    fn on_off(on: bool) -> &'static str {
        if on {
            "ON"
        } else {
            "OFF"
        }
    }

    /// Identification string of the instrument
    pub fn get_idn(&mut self) -> Result<String, Hp54620aError> {
        self.pre_command()?;
        Ok(self.bus.get_idn()?)
    }

    /// Reset the instrument to its default state
    pub fn reset(&mut self) -> Result<(), Hp54620aError> {
        self.send("*RST")
    }

    /// Set the logic threshold of a pod
    pub fn set_threshold(
        &mut self,
        group: ChannelGroup,
        threshold: ThresholdType,
    ) -> Result<(), Hp54620aError> {
        let value = match threshold {
            ThresholdType::User(volts) => format!(",{}", volts),
            _ => String::new(),
        };
        self.send(&format!(
            ":LCH:THR {},{}{}",
            group.as_str(),
            threshold.as_str(),
            value
        ))
    }

    pub fn autoscale(&mut self) -> Result<(), Hp54620aError> {
        self.send(":AUT")
    }

    pub fn set_grid(&mut self, grid: Grid) -> Result<(), Hp54620aError> {
        self.send(&format!(":DISP:GRID {}", grid.as_str()))
    }

    /// Invert the display colors. Has no visible effect on some firmware revisions.
    pub fn set_inverse_display(&mut self, on: bool) -> Result<(), Hp54620aError> {
        self.send(&format!(":DISP:INV {}", Self::on_off(on)))
    }

    pub fn display_label(&mut self, on: bool) -> Result<(), Hp54620aError> {
        self.send(&format!(":DISP:LAB {}", Self::on_off(on)))
    }

    /// Set the label of one channel, truncated to 6 characters
    pub fn set_channel_label(&mut self, channel: u8, label: &str) -> Result<(), Hp54620aError> {
        let channel = Self::check_channel(channel)?;
        let label: String = label.chars().take(Self::MAX_LABEL_LEN).collect();
        self.send(&format!(":LCH:LAB LCHAN{},\"{}\"", channel, label))
    }

    /// Run an automatic measurement.
    ///
    /// Returns `Ok(None)` when the reply is empty or not a number.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn measure(&mut self, function: Function) -> Result<Option<f64>, Hp54620aError> {
        self.send(&format!(":MEAS:{}?", function.as_str()))?;
        let reply = self.read_reply()?;
        let value = reply.trim().parse::<f64>().ok();
        if value.is_none() {
            log::debug!("Unparseable measurement reply: {:?}", reply);
        }
        Ok(value)
    }

    /// Show the measurement results on screen
    pub fn show_measure(&mut self, on: bool) -> Result<(), Hp54620aError> {
        self.send(&format!(":MEAS:SHOW {}", Self::on_off(on)))
    }

    /// Channel used by `measure`
    pub fn source_measure(&mut self, channel: u8) -> Result<(), Hp54620aError> {
        let channel = Self::check_channel(channel)?;
        self.send(&format!(":MEAS:SOUR LCHAN{}", channel))
    }

    pub fn run(&mut self) -> Result<(), Hp54620aError> {
        self.send(":RUN")
    }

    pub fn run_single(&mut self) -> Result<(), Hp54620aError> {
        self.send(":RUNS")
    }

    pub fn stop(&mut self) -> Result<(), Hp54620aError> {
        self.send(":STOP")
    }

    /// Set the timebase delay. Accepts plain seconds or text with an S, MS, US or NS suffix.
    pub fn set_timebase_delay(&mut self, delay: impl fmt::Display) -> Result<(), Hp54620aError> {
        self.send(&format!(":TIM:DEL {}", delay))
    }

    /// Set the full-screen timebase range. Units as for `set_timebase_delay`.
    pub fn set_timebase_range(&mut self, range: impl fmt::Display) -> Result<(), Hp54620aError> {
        self.send(&format!(":TIM:RANG {}", range))
    }

    pub fn set_timebase_mode(&mut self, mode: TimeBaseMode) -> Result<(), Hp54620aError> {
        self.send(&format!("TIMebase:MODE {}", mode.as_str()))
    }

    pub fn set_timebase_reference(
        &mut self,
        reference: TimeBaseReference,
    ) -> Result<(), Hp54620aError> {
        self.send(&format!(":TIM:REF {}", reference.as_str()))
    }

    pub fn enable_vernier(&mut self, on: bool) -> Result<(), Hp54620aError> {
        self.send(&format!(":TIM:VERN {}", Self::on_off(on)))
    }

    pub fn set_trigger_type(&mut self, trigger: TriggerType) -> Result<(), Hp54620aError> {
        self.send(&format!(":TRIG:TYPE {}", trigger.as_str()))
    }

    /// Set the edge that triggers on `channel`
    pub fn set_trigger_edge(&mut self, channel: u8, edge: TriggerEdge) -> Result<(), Hp54620aError> {
        let channel = Self::check_channel(channel)?;
        self.send(&format!(":TRIG:EDGE LCHAN{},{}", channel, edge.as_str()))
    }

    pub fn set_trigger_mode(&mut self, mode: TriggerMode) -> Result<(), Hp54620aError> {
        self.send(&format!(":TRIG:MODE {}", mode.as_str()))
    }

    pub fn set_acquire_type(&mut self, acquire: AcquireType) -> Result<(), Hp54620aError> {
        self.send(&format!(":ACQ:TYPE {}", acquire.as_str()))
    }

    /// Read the waveform preamble. Returns `Ok(None)` for a malformed reply.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn get_waveform_preamble(&mut self) -> Result<Option<WaveformPreamble>, Hp54620aError> {
        self.send("WAV:PRE?")?;
        let reply = self.read_reply()?;
        let preamble = WaveformPreamble::parse(&reply);
        if preamble.is_none() {
            log::debug!("Unparseable waveform preamble: {:?}", reply);
        }
        Ok(preamble)
    }

    pub fn set_waveform_source(&mut self, source: ChannelGroup) -> Result<(), Hp54620aError> {
        self.send(&format!(":WAV:SOUR {}", source.as_str()))
    }

    pub fn set_waveform_format(&mut self, format: WaveformFormat) -> Result<(), Hp54620aError> {
        self.send(&format!(":WAV:FORM {}", format.as_str()))
    }

    pub fn set_waveform_points(&mut self, points: u32) -> Result<(), Hp54620aError> {
        self.send(&format!(":WAV:POIN {}", points))
    }

    /// Transfer the acquired data of one pod in ASCII format.
    ///
    /// Returns `Ok(None)` if the preamble or the data can't be parsed.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn read_waveform(
        &mut self,
        source: ChannelGroup,
    ) -> Result<Option<WaveformCapture>, Hp54620aError> {
        self.set_waveform_source(source)?;
        self.set_waveform_format(WaveformFormat::Ascii)?;

        let Some(preamble) = self.get_waveform_preamble()? else {
            return Ok(None);
        };

        self.send(":WAV:DATA?")?;
        let reply = self.read_reply()?;
        let Some(samples) = WaveformCapture::parse_samples(&reply) else {
            log::debug!("Unparseable waveform data ({} bytes)", reply.len());
            return Ok(None);
        };

        Ok(Some(WaveformCapture {
            source,
            preamble,
            samples,
        }))
    }

    /// Set the order of the channel labels on screen
    pub fn set_label_order(&mut self, order: &[u8]) -> Result<(), Hp54620aError> {
        let order = order
            .iter()
            .map(|&channel| Self::check_channel(channel).map(|c| c.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        self.send(&format!(":DISP:ORD {}", order.join(",")))
    }

    /// Set the labels of consecutive channels starting at channel 0
    pub fn set_label_text<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<(), Hp54620aError> {
        if labels.len() > usize::from(Self::CHANNELS) {
            return Err(Hp54620aError::TooManyLabels(labels.len()));
        }
        for (channel, label) in (0..Self::CHANNELS).zip(labels) {
            self.set_channel_label(channel, label.as_ref())?;
        }
        Ok(())
    }

    /// Draw one pixel, x in 0..=500 and y in 0..=275
    pub fn set_pixel(&mut self, x: u16, y: u16, color: PixelColor) -> Result<(), Hp54620aError> {
        if x > Self::PIXEL_X_MAX || y > Self::PIXEL_Y_MAX {
            return Err(Hp54620aError::PixelOutOfRange { x, y });
        }
        self.pre_command()?;
        self.bus.write(
            &format!(":DISP:PIX {},{},{}", x, y, color.as_str()),
            Some(Self::PIXEL_SETTLE_DELAY),
        )?;
        Ok(())
    }

    /// Column for the next `set_display_text`
    pub fn set_display_column(&mut self, column: u8) -> Result<(), Hp54620aError> {
        if !Self::DISPLAY_COLUMNS.contains(&column) {
            return Err(Hp54620aError::ColumnOutOfRange(column));
        }
        self.send(&format!(":DISP:COL {}", column))
    }

    /// Row for the next `set_display_text`
    pub fn set_display_row(&mut self, row: u8) -> Result<(), Hp54620aError> {
        if !Self::DISPLAY_ROWS.contains(&row) {
            return Err(Hp54620aError::RowOutOfRange(row));
        }
        self.send(&format!(":DISP:ROW {}", row))
    }

    /// Clear custom text and go back to showing measurements
    pub fn set_display_normal(&mut self) -> Result<(), Hp54620aError> {
        self.send(":DISP:TEXT BLANK")
    }

    /// Write custom text at the current row and column, truncated to 64 characters
    pub fn set_display_text(&mut self, text: &str) -> Result<(), Hp54620aError> {
        let text: String = text.chars().take(Self::MAX_TEXT_LEN).collect();
        self.send(&format!(":DISP:LINE \"{}\"", text))
    }

    /// Give the front panel back to the user
    pub fn local(&mut self) -> Result<(), Hp54620aError> {
        self.pre_command()?;
        Ok(self.bus.local()?)
    }
}

impl<B: GpibBus> fmt::Display for Hp54620a<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HP 54620A address: {}", self.address)
    }
}
