use curtain_core::ConfigError;

#[derive(Debug)]
pub enum CurtainFatalError {
    Error(String),
    Config(ConfigError),
    Io(std::io::Error),
    Logger(log::SetLoggerError),
    Signal(ctrlc::Error),
}

pub type CurtainResult<T> = Result<T, CurtainFatalError>;

impl From<ConfigError> for CurtainFatalError {
    fn from(error: ConfigError) -> Self {
        CurtainFatalError::Config(error)
    }
}

impl From<std::io::Error> for CurtainFatalError {
    fn from(error: std::io::Error) -> Self {
        CurtainFatalError::Io(error)
    }
}

impl From<log::SetLoggerError> for CurtainFatalError {
    fn from(error: log::SetLoggerError) -> Self {
        CurtainFatalError::Logger(error)
    }
}

impl From<ctrlc::Error> for CurtainFatalError {
    fn from(error: ctrlc::Error) -> Self {
        CurtainFatalError::Signal(error)
    }
}

impl From<&str> for CurtainFatalError {
    fn from(value: &str) -> Self {
        CurtainFatalError::Error(value.to_owned())
    }
}

impl From<String> for CurtainFatalError {
    fn from(error: String) -> Self {
        CurtainFatalError::Error(error)
    }
}
