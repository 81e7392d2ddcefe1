//! Enumerated option sets accepted by the HP 54620A.
//!
//! Each enum maps to the mnemonic the instrument expects on the bus through `as_str()`.

/// One of the two 8-channel logic pods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelGroup {
    Channel0To7,
    Channel8To15,
}

impl ChannelGroup {
    /// Number of logic channels in a pod
    pub const WIDTH: u8 = 8;

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelGroup::Channel0To7 => "LCHAN0_7",
            ChannelGroup::Channel8To15 => "LCHAN8_15",
        }
    }

    /// Index of the lowest channel in this pod
    pub fn first_channel(&self) -> u8 {
        match self {
            ChannelGroup::Channel0To7 => 0,
            ChannelGroup::Channel8To15 => 8,
        }
    }
}

/// Logic threshold family. `User` carries the threshold voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdType {
    Cmos,
    Ecl,
    Ttl,
    User(f64),
}

impl ThresholdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdType::Cmos => "CMOS",
            ThresholdType::Ecl => "ECL",
            ThresholdType::Ttl => "TTL",
            ThresholdType::User(_) => "USER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grid {
    Off,
    Frame,
    Full,
}

impl Grid {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grid::Off => "OFF",
            Grid::Frame => "FRAM",
            Grid::Full => "FULL",
        }
    }
}

/// Automatic measurement functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Delay,
    DutyCycle,
    Frequency,
    Period,
    Hold,
    NegativeWidth,
    PositiveWidth,
}

impl Function {
    pub fn as_str(&self) -> &'static str {
        match self {
            Function::Delay => "DEL",
            Function::DutyCycle => "DUTY",
            Function::Frequency => "FREQ",
            Function::Period => "PER",
            Function::Hold => "HOLD",
            Function::NegativeWidth => "NWID",
            Function::PositiveWidth => "PWID",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBaseMode {
    Main,
    Delayed,
}

impl TimeBaseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeBaseMode::Main => "NORM",
            TimeBaseMode::Delayed => "DEL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBaseReference {
    Left,
    Center,
    Right,
}

impl TimeBaseReference {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeBaseReference::Left => "LEFT",
            TimeBaseReference::Center => "CENT",
            TimeBaseReference::Right => "RIGH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerType {
    Edge,
    Pattern,
    Advanced,
}

impl TriggerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::Edge => "EDGE",
            TriggerType::Pattern => "PATTERN",
            TriggerType::Advanced => "ADVANCED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEdge {
    Rising,
    Falling,
    EitherEdge,
}

impl TriggerEdge {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerEdge::Rising => "RIS",
            TriggerEdge::Falling => "FALL",
            TriggerEdge::EitherEdge => "EITH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    Normal,
    Auto,
}

impl TriggerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerMode::Normal => "NORM",
            TriggerMode::Auto => "AUTO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireType {
    Auto,
    Normal,
    Glitch,
}

impl AcquireType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcquireType::Auto => "AUTO",
            AcquireType::Normal => "NORM",
            AcquireType::Glitch => "GLIT",
        }
    }
}

/// Brightness of a pixel drawn with `set_pixel`.
///
/// Firmware seen so far ignores `FullBright` and leaves the pixel unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelColor {
    Off,
    HalfBright,
    FullBright,
}

impl PixelColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PixelColor::Off => "0",
            PixelColor::HalfBright => "1",
            PixelColor::FullBright => "2",
        }
    }
}

/// Encoding of `:WAV:DATA?` replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformFormat {
    Ascii,
    Byte,
    Word,
}

impl WaveformFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaveformFormat::Ascii => "ASC",
            WaveformFormat::Byte => "BYTE",
            WaveformFormat::Word => "WORD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_group_as_str() {
        assert_eq!(ChannelGroup::Channel0To7.as_str(), "LCHAN0_7");
        assert_eq!(ChannelGroup::Channel8To15.as_str(), "LCHAN8_15");
        assert_eq!(ChannelGroup::Channel8To15.first_channel(), 8);
    }

    #[test]
    fn test_threshold_type_as_str() {
        assert_eq!(ThresholdType::Cmos.as_str(), "CMOS");
        assert_eq!(ThresholdType::Ecl.as_str(), "ECL");
        assert_eq!(ThresholdType::Ttl.as_str(), "TTL");
        assert_eq!(ThresholdType::User(1.4).as_str(), "USER");
    }

    #[test]
    fn test_function_as_str() {
        assert_eq!(Function::Delay.as_str(), "DEL");
        assert_eq!(Function::DutyCycle.as_str(), "DUTY");
        assert_eq!(Function::Frequency.as_str(), "FREQ");
        assert_eq!(Function::Period.as_str(), "PER");
        assert_eq!(Function::Hold.as_str(), "HOLD");
        assert_eq!(Function::NegativeWidth.as_str(), "NWID");
        assert_eq!(Function::PositiveWidth.as_str(), "PWID");
    }

    #[test]
    fn test_timebase_as_str() {
        assert_eq!(TimeBaseMode::Main.as_str(), "NORM");
        assert_eq!(TimeBaseMode::Delayed.as_str(), "DEL");
        assert_eq!(TimeBaseReference::Left.as_str(), "LEFT");
        assert_eq!(TimeBaseReference::Center.as_str(), "CENT");
        assert_eq!(TimeBaseReference::Right.as_str(), "RIGH");
    }

    #[test]
    fn test_trigger_as_str() {
        assert_eq!(TriggerType::Edge.as_str(), "EDGE");
        assert_eq!(TriggerType::Pattern.as_str(), "PATTERN");
        assert_eq!(TriggerType::Advanced.as_str(), "ADVANCED");
        assert_eq!(TriggerEdge::Rising.as_str(), "RIS");
        assert_eq!(TriggerEdge::Falling.as_str(), "FALL");
        assert_eq!(TriggerEdge::EitherEdge.as_str(), "EITH");
        assert_eq!(TriggerMode::Normal.as_str(), "NORM");
        assert_eq!(TriggerMode::Auto.as_str(), "AUTO");
    }

    #[test]
    fn test_display_options_as_str() {
        assert_eq!(Grid::Off.as_str(), "OFF");
        assert_eq!(Grid::Frame.as_str(), "FRAM");
        assert_eq!(Grid::Full.as_str(), "FULL");
        assert_eq!(AcquireType::Auto.as_str(), "AUTO");
        assert_eq!(AcquireType::Normal.as_str(), "NORM");
        assert_eq!(AcquireType::Glitch.as_str(), "GLIT");
    }

    #[test]
    fn test_pixel_color_as_str() {
        assert_eq!(PixelColor::Off.as_str(), "0");
        assert_eq!(PixelColor::HalfBright.as_str(), "1");
        assert_eq!(PixelColor::FullBright.as_str(), "2");
    }

    #[test]
    fn test_waveform_format_as_str() {
        assert_eq!(WaveformFormat::Ascii.as_str(), "ASC");
        assert_eq!(WaveformFormat::Byte.as_str(), "BYTE");
        assert_eq!(WaveformFormat::Word.as_str(), "WORD");
    }
}
