//! Error types.

#[cfg(feature = "std")]
use std::error;
use std::fmt;

/// Error value returned by the checked operations of a `RingBuffer`.
///
/// Every variant is local to one call: `Full` and `Empty` leave the queue
/// untouched and are meant to be retried once the other side has made
/// progress.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub enum Error {
    /// `init` was asked for a capacity of zero, or for more slots than the
    /// storage or the counter domain can address.
    InvalidCapacity {
        /// The capacity that was requested.
        capacity: usize,
        /// The largest capacity the storage and counter could have held.
        max: usize,
    },
    /// `write` was called on a full queue.
    Full {
        /// The byte that could not be stored.
        element: u8,
    },
    /// `read` was called on an empty queue.
    Empty,
}

impl Error {
    fn as_str(&self) -> &'static str {
        match *self {
            Error::InvalidCapacity { .. } => "invalid capacity",
            Error::Full { .. } => "ring buffer full",
            Error::Empty => "ring buffer empty",
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for Error {
    fn description(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidCapacity { capacity, max } => {
                write!(f, "{}: {} (expected 1..={})", self.as_str(), capacity, max)
            }
            Error::Full { element } => write!(f, "{}, dropped {}", self.as_str(), element),
            Error::Empty => write!(f, "{}", self.as_str()),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidCapacity { capacity, max } => {
                write!(f, "InvalidCapacity {{ capacity: {}, max: {} }}", capacity, max)
            }
            Error::Full { element } => write!(f, "Full {{ element: {} }}", element),
            Error::Empty => write!(f, "Empty"),
        }
    }
}
