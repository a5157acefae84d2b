use ::scraper::error::SelectorErrorKind;

/// All errors that can occur while talking to RobotEvents or VexDB.
///
/// Missing data (an event with no award table, a season with no skills runs) is not an error
/// and never surfaces here; those cases flow through as empty collections.
#[derive(thiserror::Error, Debug)]
pub enum QualError {
    /// The underlying HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    ClientBuild(reqwest::Error),

    /// A request URL could not be assembled.
    #[error("invalid url {url}: {detail}")]
    InvalidUrl { url: String, detail: String },

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A JSON payload (API body or embedded page data) did not match the expected shape.
    #[error("failed to decode json from {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// A raw record could not be turned into a model value.
    #[error("malformed {context} record: {detail}")]
    MalformedRecord {
        context: &'static str,
        detail: String,
    },

    /// The program abbreviation has no known page path.
    #[error("unknown program abbreviation {0:?}")]
    UnknownProgram(String),

    /// No program with that name or abbreviation exists on RobotEvents.
    #[error("program {0:?} not found")]
    ProgramNotFound(String),

    /// No event with that SKU exists in the season.
    #[error("event {0} not found")]
    EventNotFound(String),

    /// The program has no season with that id.
    #[error("season {season_id} not found for program {program}")]
    SeasonNotFound { program: String, season_id: u32 },
}

impl<'a> From<SelectorErrorKind<'a>> for QualError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        QualError::Selector(err.to_string())
    }
}

impl QualError {
    /// Whether retrying the same request may succeed.
    pub(crate) fn is_transient(&self) -> bool {
        match self {
            QualError::Http { .. } | QualError::ResponseBody { .. } => true,
            QualError::UnexpectedStatus { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, QualError>;
