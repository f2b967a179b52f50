//! Modem configuration: topic prefix and UART line properties.

use core::fmt;

use at_proto::DEFAULT_TOPIC_PREFIX;

/// Firmware version reported by `ATI`.
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported baud rates, indexed by [`UartProperties::baudrate_index`].
pub const BAUD_RATES: [u32; 16] = [
    110, 150, 300, 1_200, 2_400, 4_800, 9_600, 19_200, 31_250, 38_400, 57_600, 115_200, 230_400,
    460_800, 921_600, 1_000_000,
];

/// Index of 115200 baud in [`BAUD_RATES`].
pub const DEFAULT_BAUDRATE_INDEX: u8 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Odd,
    Even,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

/// Console UART line settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartProperties {
    pub baudrate_index: u8,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl UartProperties {
    /// 115200 baud, 8N1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            baudrate_index: DEFAULT_BAUDRATE_INDEX,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }

    /// Baud rate for the configured index, `None` if out of range.
    #[must_use]
    pub fn baudrate(&self) -> Option<u32> {
        BAUD_RATES.get(usize::from(self.baudrate_index)).copied()
    }
}

impl Default for UartProperties {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats as `115200 8N1`.
impl fmt::Display for UartProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.baudrate() {
            Some(baud) => write!(f, "{baud} ")?,
            None => f.write_str("? ")?,
        }
        let bits = match self.data_bits {
            DataBits::Seven => '7',
            DataBits::Eight => '8',
        };
        let parity = match self.parity {
            Parity::None => 'N',
            Parity::Odd => 'O',
            Parity::Even => 'E',
        };
        let stop = match self.stop_bits {
            StopBits::One => '1',
            StopBits::Two => '2',
        };
        write!(f, "{bits}{parity}{stop}")
    }
}

/// Interpreter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModemConfig {
    /// Prepended to every publish topic, before the device id.
    pub topic_prefix: &'static str,
    pub uart: UartProperties,
}

impl ModemConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            topic_prefix: DEFAULT_TOPIC_PREFIX,
            uart: UartProperties::new(),
        }
    }
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_default_is_115200_8n1() {
        let props = UartProperties::default();
        assert_eq!(props.baudrate(), Some(115_200));
        assert_eq!(props.to_string(), "115200 8N1");
    }

    #[test]
    fn test_baudrate_index_out_of_range() {
        let props = UartProperties {
            baudrate_index: 16,
            ..UartProperties::new()
        };
        assert_eq!(props.baudrate(), None);
        assert_eq!(props.to_string(), "? 8N1");
    }

    #[test]
    fn test_custom_line_settings() {
        let props = UartProperties {
            baudrate_index: 6,
            data_bits: DataBits::Seven,
            parity: Parity::Even,
            stop_bits: StopBits::Two,
        };
        assert_eq!(props.to_string(), "9600 7E2");
    }

    #[test]
    fn test_default_topic_prefix() {
        assert_eq!(ModemConfig::default().topic_prefix, "server/");
    }
}
