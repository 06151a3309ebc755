/// Error taxonomy crossing the use-case boundary. Nothing below this layer
/// leaks raw sqlx/anyhow errors to the HTTP surface.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Absent, or present but invisible to the caller. Reads and writes by
    /// callers with no role collapse into this variant so that existence is
    /// never confirmed to strangers.
    #[error("not found")]
    NotFound,

    /// The caller may see the resource but lacks the privilege.
    #[error("forbidden")]
    Forbidden,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("user is already a collaborator")]
    AlreadyCollaborator,

    #[error("email is already registered")]
    EmailTaken,

    #[error("user not found")]
    UserNotFound,

    #[error("share link has expired")]
    LinkExpired,

    #[error("share link is at capacity")]
    LinkFull,

    #[error("failed to record revision")]
    RevisionWriteFailed(#[source] anyhow::Error),

    /// Datastore hiccup; the caller may retry.
    #[error("transient failure")]
    Transient(#[source] anyhow::Error),
}

impl ServiceError {
    /// Stable machine-readable kind, part of the public contract.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::NotFound => "not_found",
            ServiceError::Forbidden => "forbidden",
            ServiceError::InvalidArgument(_) => "invalid_argument",
            ServiceError::AlreadyCollaborator => "already_collaborator",
            ServiceError::EmailTaken => "email_taken",
            ServiceError::UserNotFound => "user_not_found",
            ServiceError::LinkExpired => "link_expired",
            ServiceError::LinkFull => "link_full",
            ServiceError::RevisionWriteFailed(_) => "revision_write_failed",
            ServiceError::Transient(_) => "transient_failure",
        }
    }
}

impl From<anyhow::Error> for ServiceError {
    fn from(e: anyhow::Error) -> Self {
        ServiceError::Transient(e)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
