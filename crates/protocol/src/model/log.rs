//! Log records and their per-module status vocabulary

use std::fmt;

use super::Timestamp;

/// Component a log record comes from
///
/// `Unknown` (0) is the suppression sentinel: such records are never
/// emitted downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Module {
    #[default]
    Unknown = 0,
    System = 1,
    Session = 2,
    Subscription = 3,
    Service = 4,
    Heartbeat = 5,
}

impl Module {
    /// Parse from raw byte value
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::System,
            2 => Self::Session,
            3 => Self::Subscription,
            4 => Self::Service,
            5 => Self::Heartbeat,
            _ => Self::Unknown,
        }
    }

    /// Convert to raw byte value
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Records from this module are dropped before encoding
    #[inline]
    pub const fn is_suppressed(self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::System => "System",
            Self::Session => "Session",
            Self::Subscription => "Subscription",
            Self::Service => "Service",
            Self::Heartbeat => "Heartbeat",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declares a module status enum with its byte mapping and display name
macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            #[default]
            Unknown = 0,
            $($variant = $value),+
        }

        impl $name {
            /// Parse from raw byte value
            #[inline]
            pub const fn from_u8(value: u8) -> Self {
                match value {
                    $($value => Self::$variant,)+
                    _ => Self::Unknown,
                }
            }

            /// Convert to raw byte value
            #[inline]
            pub const fn as_u8(self) -> u8 {
                self as u8
            }

            pub const fn as_str(self) -> &'static str {
                match self {
                    Self::Unknown => "Unknown",
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl From<$name> for u8 {
            fn from(status: $name) -> u8 {
                status.as_u8()
            }
        }
    };
}

status_enum!(
    /// Status reported by the session module
    SessionStatus {
        ConnectionUp = 1,
        Started = 2,
        ConnectionDown = 3,
        Terminated = 4,
        InvalidOptions = 5,
        Failure = 6,
    }
);

status_enum!(
    /// Status reported by the subscription module
    SubscriptionStatus {
        Started = 1,
        StreamsActivated = 2,
        Terminated = 3,
        Success = 4,
        Failure = 5,
    }
);

status_enum!(
    /// Status reported by the service module
    ServiceStatus {
        Opened = 1,
        Closed = 2,
        Failure = 3,
    }
);

status_enum!(
    /// Status reported by the system and heartbeat modules
    SystemStatus {
        Info = 1,
        Warning = 2,
        Error = 3,
    }
);

/// Display name of a status byte, interpreted in the module's vocabulary
pub fn status_name(module: Module, status: u8) -> &'static str {
    match module {
        Module::Session => SessionStatus::from_u8(status).as_str(),
        Module::Subscription => SubscriptionStatus::from_u8(status).as_str(),
        Module::Service => ServiceStatus::from_u8(status).as_str(),
        Module::System | Module::Heartbeat => SystemStatus::from_u8(status).as_str(),
        Module::Unknown => "Unknown",
    }
}

/// One diagnostic line from the feed adapter or the pipeline itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: Timestamp,
    pub module: Module,
    /// Module-dependent status, see [`status_name`]
    pub status: u8,
    pub correlation_id: u64,
    pub message: String,
}

impl LogRecord {
    /// Build a record stamped with the current time
    pub fn new(
        module: Module,
        status: impl Into<u8>,
        correlation_id: u64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Timestamp::now(),
            module,
            status: status.into(),
            correlation_id,
            message: message.into(),
        }
    }

    /// Status name in this record's module vocabulary
    pub fn status_name(&self) -> &'static str {
        status_name(self.module, self.status)
    }
}
