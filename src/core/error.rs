//! Error types for the native layer
//!
//! Uses Rust's Result pattern; the native-method glue flattens results to the
//! integer sentinels the VM expects with [`raw_result`].

/// Native layer error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum HalError {
    /// No error
    None = 0,

    // ============ Descriptor errors ============
    /// Every descriptor slot is occupied
    DescFull = 11001,
    /// Descriptor outside the table
    DescInvalid = 11002,
    /// Descriptor slot is not occupied
    DescFree = 11003,

    // ============ Event queue errors ============
    /// Interrupt-request pool has no free node
    IrqPoolEmpty = 12001,
    /// Same requestor already waits on this event type
    IrqRequestExists = 12002,
    /// No request with this number and type
    IrqNotFound = 12003,
    /// Cannot register a wait from ISR
    StoreIsr = 12004,
    /// Requestor id has no event number
    IrqRequestorInvalid = 12005,

    // ============ GPIO errors ============
    /// Pin cannot carry an edge mask
    GpioPinInvalid = 13001,

    // ============ Timer errors ============
    /// Timer table full
    TimerTableFull = 13101,
    /// Zero delay specified
    TimerDelayInvalid = 13102,
}

/// Result type alias for native layer operations
pub type HalResult<T> = Result<T, HalError>;

impl HalError {
    /// Value handed back across the VM boundary on failure
    ///
    /// Every error flattens to this one sentinel; the VM never sees the code.
    pub const RAW: i32 = -1;

    #[inline]
    pub fn is_ok(self) -> bool {
        self == HalError::None
    }

    #[inline]
    pub fn is_err(self) -> bool {
        self != HalError::None
    }

    /// Numeric error code
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// Flatten a descriptor or event-number result to the native return convention
///
/// Success yields the non-negative value, failure yields [`HalError::RAW`].
#[inline]
pub fn raw_result<T: TryInto<i32>>(result: HalResult<T>) -> i32 {
    match result {
        Ok(v) => v.try_into().unwrap_or(i32::MAX),
        Err(_) => HalError::RAW,
    }
}
