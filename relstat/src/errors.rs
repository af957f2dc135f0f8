use thiserror::Error;

/// Fatal errors for a whole status run. Anything here aborts the report;
/// there is no partial-report-plus-error mode.
#[derive(Error, Debug)]
pub enum StatusError {
    #[error("no objects found to check")]
    NoObjects,

    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("failed to derive object reference for {name:?}: {reason}")]
    Reference { name: String, reason: String },

    #[error("report write error: {0}")]
    Write(#[from] std::fmt::Error),

    #[error("couldn't parse release label selector: {0}")]
    Selector(#[from] SelectorError),

    #[error("couldn't build dependency graph: {0}")]
    Graph(#[from] GraphError),
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read manifest stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse manifest document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("manifest document {document} has no {field}")]
    MissingField { field: &'static str, document: usize },
}

/// Per-resource live fetch failure. Never fatal: the fetch loop folds every
/// variant into a missing-resource record. The variants exist so logs can
/// tell a plain not-found apart from a permission or transport problem.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("not found")]
    NotFound,

    #[error("forbidden")]
    Forbidden,

    #[error("{0}")]
    Other(String),
}

impl From<kube::Error> for FetchError {
    fn from(e: kube::Error) -> Self {
        match e {
            kube::Error::Api(ae) if ae.code == 404 => FetchError::NotFound,
            kube::Error::Api(ae) if ae.code == 403 => FetchError::Forbidden,
            other => FetchError::Other(other.to_string()),
        }
    }
}

#[derive(Error, Debug)]
#[error("invalid selector expression {expr:?}: {reason}")]
pub struct SelectorError {
    pub expr: String,
    pub reason: String,
}

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("couldn't create namespaced client: {0}")]
    Client(String),

    #[error("couldn't load dependency graph: {0}")]
    Build(String),
}
