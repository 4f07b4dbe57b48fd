use core::fmt;

pub mod champion;

#[derive(Debug)]
pub enum ParsingError {
    Malformed(json::Error),
    InvalidType(String),
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParsingError::Malformed(err) => write!(f, "Response is not valid JSON: {}", err),
            ParsingError::InvalidType(field) => write!(f, "Invalid type for field: {}", field),
        }
    }
}

impl From<json::Error> for ParsingError {
    fn from(error: json::Error) -> Self {
        ParsingError::Malformed(error)
    }
}
