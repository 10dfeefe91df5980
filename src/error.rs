use std::fmt;

/// Failures gathered by the collect-all policy while parsing a top-level
/// error document, one entry per malformed array element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorList {
    entries: Vec<(usize, String)>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: usize, message: impl Into<String>) {
        self.entries.push((position, message.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries
            .iter()
            .map(|(position, message)| (*position, message.as_str()))
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (position, message)) in self.entries.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "errors[{position}]: {message}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The input does not conform to the expected shape for its position.
    #[error("{0}")]
    Validation(String),
    /// A requested key or path does not exist in a fully-parsed graph.
    #[error("{0}")]
    Access(String),
    /// The factory was asked for an unregistered node type.
    #[error("{0}")]
    Factory(String),
    /// Every failure found in a top-level error document (collect-all policy).
    #[error("{0}")]
    Collected(ErrorList),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn access(message: impl Into<String>) -> Self {
        Error::Access(message.into())
    }

    pub fn factory(message: impl Into<String>) -> Self {
        Error::Factory(message.into())
    }
}
