//! Leveled logging of the driver.
//! Messages are sent to `defmt` when the `log` feature is enabled and are
//! filtered by the verbosity configured in each device.



/// Verbosity of a device's log output.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "log", derive(defmt::Format))]
#[repr(u8)]
pub enum LogLevel {
    /// No output.
    Off = 0,

    /// Only unrecoverable failures.
    Critical = 1,

    /// Failures of an operation.
    Error = 2,

    /// Recoverable anomalies.
    Warning = 3,

    /// Operations performed on the device.
    Info = 4,

    /// Every register access and mode transition.
    Debug = 5,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Error
    }
}

impl From<u8> for LogLevel {
    fn from(level: u8) -> Self {
        match level {
            0 => LogLevel::Off,
            1 => LogLevel::Critical,
            2 => LogLevel::Error,
            3 => LogLevel::Warning,
            4 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }
}

impl LogLevel {
    /// Returns `true` if a message of the given level passes this verbosity.
    pub fn allows(self, message: LogLevel) -> bool {
        (message != LogLevel::Off) && (message <= self)
    }
}



/// Forwards a message to the `defmt` sink if the device verbosity allows it.
macro_rules! emit {
    ($device:expr, $level:ident, $sink:ident, $($arg:tt)+) => {{
        #[cfg(feature = "log")]
        {
            if $device.log_level().allows( $crate::LogLevel::$level ) {
                defmt::$sink!($($arg)+);
            }
        }
    }};
}

macro_rules! critical {
    ($device:expr, $($arg:tt)+) => { emit!($device, Critical, error, $($arg)+) };
}

macro_rules! error {
    ($device:expr, $($arg:tt)+) => { emit!($device, Error, error, $($arg)+) };
}

macro_rules! warning {
    ($device:expr, $($arg:tt)+) => { emit!($device, Warning, warn, $($arg)+) };
}

macro_rules! info {
    ($device:expr, $($arg:tt)+) => { emit!($device, Info, info, $($arg)+) };
}

macro_rules! debug {
    ($device:expr, $($arg:tt)+) => { emit!($device, Debug, debug, $($arg)+) };
}



#[cfg(test)]
mod test {
    use super::LogLevel;

    #[test]
    fn verbosity_filters_messages() {
        assert!(LogLevel::Error.allows(LogLevel::Critical));
        assert!(LogLevel::Error.allows(LogLevel::Error));
        assert!(!LogLevel::Error.allows(LogLevel::Info));
        assert!(LogLevel::Debug.allows(LogLevel::Info));
        assert!(!LogLevel::Off.allows(LogLevel::Critical));
        assert!(!LogLevel::Debug.allows(LogLevel::Off));
    }

    #[test]
    fn levels_from_raw() {
        assert_eq!(LogLevel::from(0), LogLevel::Off);
        assert_eq!(LogLevel::from(2), LogLevel::Error);
        assert_eq!(LogLevel::from(4), LogLevel::Info);
        assert_eq!(LogLevel::from(9), LogLevel::Debug);
        assert_eq!(LogLevel::default(), LogLevel::Error);
    }
}
