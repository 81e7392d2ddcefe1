use crate::options::ChannelGroup;
use polars::prelude::*;

const TIME_COLUMN_NAME: &str = "time";
const SAMPLE_COLUMN_NAME: &str = "sample";

/// Scaling record returned by `WAV:PRE?`
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformPreamble {
    pub format: i32,
    pub waveform_type: i32,
    pub points: u32,
    pub count: u32,
    pub x_increment: f64,
    pub x_origin: f64,
    pub x_reference: f64,
    pub y_increment: f64,
    pub y_origin: f64,
    pub y_reference: f64,
}

impl WaveformPreamble {
    /// Parse the ten comma separated preamble fields.
    ///
    /// Returns `None` for short or malformed replies. Fields past the tenth are ignored.
    pub fn parse(reply: &str) -> Option<Self> {
        let fields: Vec<&str> = reply.trim().split(',').map(str::trim).collect();
        let &[format, waveform_type, points, count, x_increment, x_origin, x_reference, y_increment, y_origin, y_reference] =
            fields.get(..10)?
        else {
            return None;
        };

        Some(Self {
            format: format.parse().ok()?,
            waveform_type: waveform_type.parse().ok()?,
            points: points.parse().ok()?,
            count: count.parse().ok()?,
            x_increment: x_increment.parse().ok()?,
            x_origin: x_origin.parse().ok()?,
            x_reference: x_reference.parse().ok()?,
            y_increment: y_increment.parse().ok()?,
            y_origin: y_origin.parse().ok()?,
            y_reference: y_reference.parse().ok()?,
        })
    }

    /// Time of the sample at `index`, relative to the trigger
    pub fn time_at(&self, index: usize) -> f64 {
        (index as f64 - self.x_reference) * self.x_increment + self.x_origin
    }
}

/// One pod's worth of samples read with `:WAV:DATA?`
#[derive(Debug, Clone)]
pub struct WaveformCapture {
    pub source: ChannelGroup,
    pub preamble: WaveformPreamble,
    /// One bitmap per sample, bit n is channel `source.first_channel() + n`
    pub samples: Vec<u16>,
}

impl WaveformCapture {
    /// Parse an ASCII `:WAV:DATA?` reply.
    ///
    /// Each sample must be an unsigned 16-bit integer, optionally with a leading `+`.
    /// An optional `#<n><length>` block header is skipped. Empty or malformed data yields `None`.
    pub fn parse_samples(reply: &str) -> Option<Vec<u16>> {
        let mut data = reply.trim();
        if let Some(header) = data.strip_prefix('#') {
            let digits = header.chars().next()?.to_digit(10)? as usize;
            data = header.get(1 + digits..)?.trim();
        }
        if data.is_empty() {
            return None;
        }

        data.split(',')
            .map(|value| {
                let value = value.trim();
                value.strip_prefix('+').unwrap_or(value).parse::<u16>().ok()
            })
            .collect()
    }

    /// Logic level of `channel` (absolute, 0..=15) at every sample, `None` if the
    /// channel is not in this capture's pod
    pub fn channel(&self, channel: u8) -> Option<Vec<bool>> {
        let bit = channel.checked_sub(self.source.first_channel())?;
        if bit >= ChannelGroup::WIDTH {
            return None;
        }
        Some(self.samples.iter().map(|s| (s >> bit) & 1 == 1).collect())
    }

    /// Build a DataFrame with a time column, the raw samples and one boolean column per channel
    pub fn to_dataframe(&self) -> Result<DataFrame, PolarsError> {
        let time: Vec<f64> = (0..self.samples.len())
            .map(|i| self.preamble.time_at(i))
            .collect();
        let raw: Vec<u32> = self.samples.iter().map(|&s| u32::from(s)).collect();

        let mut columns: Vec<Column> = vec![
            Series::new(TIME_COLUMN_NAME.into(), time).into(),
            Series::new(SAMPLE_COLUMN_NAME.into(), raw).into(),
        ];

        let first = self.source.first_channel();
        for channel in first..first + ChannelGroup::WIDTH {
            let values = self.channel(channel).unwrap_or_default();
            columns.push(Series::new(format!("bit_{}", channel).into(), values).into());
        }

        DataFrame::new(columns)
    }
}
