use std::fmt;

use color_eyre::eyre;

/// Outcome of one outbound notification.
#[derive(Debug)]
pub enum Delivery {
    Failed(eyre::Report),
    Sent,
}

impl Delivery {
    pub fn is_sent(&self) -> bool {
        matches!(self, Delivery::Sent)
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delivery::Failed(err) => write!(f, "failed: {}", err),
            Delivery::Sent => f.write_str("sent"),
        }
    }
}

impl<T> From<Result<T, eyre::Report>> for Delivery {
    fn from(res: Result<T, eyre::Report>) -> Self {
        match res {
            Ok(_) => Self::Sent,
            Err(err) => Self::Failed(err),
        }
    }
}
