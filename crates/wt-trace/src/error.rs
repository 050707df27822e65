use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidParameter {
        name: &'static str,
        value: usize,
        requirement: &'static str,
    },
    DegenerateRegion {
        width: usize,
        height: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                name,
                value,
                requirement,
            } => write!(f, "invalid {name} = {value}: must be {requirement}"),
            Self::DegenerateRegion { width, height } => write!(
                f,
                "cannot normalize within a {width}x{height} region: both sides must exceed 1"
            ),
        }
    }
}

impl std::error::Error for Error {}
