use core::str::{FromStr, Split};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error {
    UnknownPath,
    ExpectValue,
    InvalidValue,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let err_string = match self {
            Self::UnknownPath => "Specified path not exists or invalid",
            Self::ExpectValue => "Expect value",
            Self::InvalidValue => "Value not valid",
        };
        write!(f, "{}", err_string)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Value<'a>(pub Option<&'a str>);

impl<'a> Value<'a> {
    pub fn of(string: &'a str) -> Value<'a> {
        Value(Some(string))
    }

    pub fn parse<T: FromStr>(&self) -> Result<T, Error> {
        match self.0 {
            Some(s) => FromStr::from_str(s.trim()).map_err(|_| Error::InvalidValue),
            None => Err(Error::ExpectValue),
        }
    }

    pub fn parse_or<T: FromStr>(&self, or: T) -> Result<T, Error> {
        match self.0 {
            Some(s) => FromStr::from_str(s.trim()).map_err(|_| Error::InvalidValue),
            None => Ok(or),
        }
    }
}

/// Dot separated config path, e.g. `modes.takeoff.max`
#[derive(Clone, Debug)]
pub struct Path<'a>(Split<'a, char>);

impl<'a> Path<'a> {
    pub fn new(string: &'a str) -> Self {
        Self(string.split('.'))
    }

    pub fn str(&mut self) -> Result<&'a str, Error> {
        self.0.next().map(|s| s.trim()).ok_or(Error::UnknownPath)
    }

    pub fn parse<T: FromStr>(&mut self) -> Result<T, Error> {
        T::from_str(self.str()?).map_err(|_| Error::UnknownPath)
    }

    pub fn is_end(&self) -> bool {
        self.0.clone().next().is_none()
    }
}

pub trait PathSet {
    fn set(&mut self, path: Path, value: Value) -> Result<(), Error>;
}

/// Splits `path=value`; a missing `=` yields an empty value.
pub fn split_assignment(line: &str) -> (Path<'_>, Value<'_>) {
    match line.split_once('=') {
        Some((path, value)) => (Path::new(path.trim()), Value::of(value.trim())),
        None => (Path::new(line.trim()), Value(None)),
    }
}

mod test {
    #[test]
    fn test_path() {
        use super::{Error, Path};

        let mut path = Path::new("modes.takeoff.max");
        assert_eq!(path.str(), Ok("modes"));
        assert_eq!(path.str(), Ok("takeoff"));
        assert!(!path.is_end());
        assert_eq!(path.str(), Ok("max"));
        assert!(path.is_end());
        assert_eq!(path.str(), Err(Error::UnknownPath));
    }

    #[test]
    fn test_value() {
        use super::{Error, Value};

        assert_eq!(Value::of("3000").parse::<u16>(), Ok(3000));
        assert_eq!(Value::of(" 42 ").parse::<u16>(), Ok(42));
        assert_eq!(Value::of("-1").parse::<u16>(), Err(Error::InvalidValue));
        assert_eq!(Value(None).parse::<u16>(), Err(Error::ExpectValue));
        assert_eq!(Value(None).parse_or(7u16), Ok(7));
    }

    #[test]
    fn test_split_assignment() {
        use super::{split_assignment, Value};

        let (mut path, value) = split_assignment("step = 5");
        assert_eq!(path.str(), Ok("step"));
        assert_eq!(value, Value::of("5"));

        let (_, value) = split_assignment("step");
        assert_eq!(value, Value(None));
    }
}
