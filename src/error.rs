use std::fmt;


// Failure of a single gateway call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    // The request never produced a response (network down, CORS, DNS, ...).
    Transport(String),
    // Non-success HTTP status. `body` is the raw response text.
    RequestFailed { status: u16, body: String },
    // Success status, but the body is not the JSON we expected.
    Decode(String),
    // Endpoint URL could not be built from the configured base.
    InvalidUrl(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(message) => write!(f, "transport error: {message}"),
            ApiError::RequestFailed { status, body } => {
                write!(f, "request failed with status {status}: {body}")
            }
            ApiError::Decode(message) => write!(f, "cannot decode response: {message}"),
            ApiError::InvalidUrl(message) => write!(f, "invalid URL: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginError {
    // The service answered with a success status but without a token.
    NoToken,
    Api(ApiError),
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::NoToken => write!(f, "no token received"),
            LoginError::Api(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for LoginError {}

impl From<ApiError> for LoginError {
    fn from(err: ApiError) -> Self { LoginError::Api(err) }
}

// Persistent key/value slot failure (e.g. storage disabled in the browser, unwritable file).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotError(pub String);

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session storage error: {}", self.0)
    }
}

impl std::error::Error for SlotError {}

// The map widget could not be created or used (e.g. the map library is not loaded yet).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapError(pub String);

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map unavailable: {}", self.0)
    }
}

impl std::error::Error for MapError {}
