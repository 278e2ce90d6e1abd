use std::path::PathBuf;
use std::fmt::Display;

pub trait ErrorType: Display + PartialEq {
    // ANSI foreground colour used for the location prefix
    const COLOUR: u8 = 31;
}

#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    pub fn file(file: PathBuf) -> Self {
        Location { file, line: 0 }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}", self.file.display(), self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[{};49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", T::COLOUR, self.location, self.error)
    }
}

pub type Errors<T> = Vec<Error<T>>;
