use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
};
use tracing::{error, warn};

/// Crate-wide error. Most conditions are plain messages, but the capture
/// state machine distinguishes a few kinds that callers match on.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum RmError {
    /// a shape constructed already complete violates its point-count rule
    InvalidShape(String),
    /// `add_point` on a line crossing that already holds all of its points
    OverCapture(String),
    /// side-panel append while no group is open
    MissingActiveGroup(String),
    /// session operation before image metrics are known
    NotReady(String),
    Msg(String),
}

impl RmError {
    pub fn new(msg: &str) -> RmError {
        RmError::Msg(msg.to_string())
    }
    pub fn msg(&self) -> &str {
        match self {
            RmError::InvalidShape(msg)
            | RmError::OverCapture(msg)
            | RmError::MissingActiveGroup(msg)
            | RmError::NotReady(msg)
            | RmError::Msg(msg) => msg,
        }
    }
}
impl Display for RmError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.msg())
    }
}
impl Error for RmError {}
impl From<&str> for RmError {
    fn from(value: &str) -> Self {
        RmError::new(value)
    }
}
/// ROI Mark's result type with [`RmError`](RmError) as error type.
pub type RmResult<U> = Result<U, RmError>;

pub fn trace_ok_err<T, E>(x: Result<T, E>) -> Option<T>
where
    E: Debug,
{
    match x {
        Ok(x) => Some(x),
        Err(e) => {
            error!("{e:?}");
            None
        }
    }
}
pub fn trace_ok_warn<T, E>(x: Result<T, E>) -> Option<T>
where
    E: Debug,
{
    match x {
        Ok(x) => Some(x),
        Err(e) => {
            warn!("{e:?}");
            None
        }
    }
}
/// Creates an [`RmError`](RmError) with a formatted message.
/// ```rust
/// # use std::error::Error;
/// use roimark_domain::{rmerr, result::RmError};
/// # fn main() -> Result<(), Box<dyn Error>> {
/// assert_eq!(rmerr!("some error {}", 1), RmError::new(format!("some error {}", 1).as_str()));
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! rmerr {
    ($s:literal) => {
        $crate::result::RmError::new(format!($s).as_str())
    };
    ($s:literal, $( $exps:expr ),*) => {
        $crate::result::RmError::new(format!($s, $($exps,)*).as_str())
    }
}

pub fn to_rm<E: Debug>(e: E) -> RmError {
    rmerr!(
        "original error type is '{:?}', error message is '{:?}'",
        std::any::type_name::<E>(),
        e
    )
}
