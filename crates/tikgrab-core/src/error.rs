//! Transfer failure taxonomy shared by the lookup and media-fetch paths.

use thiserror::Error;

/// Failure of a single HTTP transfer (lookup POST or media GET).
///
/// Timeouts and transport failures are split out from the catch-all request
/// error so callers can report them distinctly; all of them reduce to a
/// failed outcome for the current input, never a crash.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Response completed with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Bounded wait exceeded.
    #[error("timed out: {0}")]
    Timeout(curl::Error),
    /// Transport-level failure (refused, DNS, reset).
    #[error("connection failed: {0}")]
    Connection(curl::Error),
    /// Any other libcurl failure.
    #[error("request failed: {0}")]
    Request(curl::Error),
}

impl From<curl::Error> for TransferError {
    fn from(e: curl::Error) -> Self {
        if e.is_operation_timedout() {
            return TransferError::Timeout(e);
        }
        if e.is_couldnt_connect()
            || e.is_couldnt_resolve_host()
            || e.is_couldnt_resolve_proxy()
            || e.is_read_error()
            || e.is_recv_error()
            || e.is_send_error()
            || e.is_got_nothing()
        {
            return TransferError::Connection(e);
        }
        TransferError::Request(e)
    }
}
