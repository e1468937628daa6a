use cosmwasm_schema::cw_serde;
use std::fmt;

/// Lifecycle of an asynchronous fetch.
#[cw_serde]
#[derive(Copy, Default)]
pub enum AsyncStatus {
    /// Not started yet.
    #[default]
    Standby,
    /// A fetch is in flight.
    Pending,
    /// The last fetch succeeded.
    Fulfilled,
    /// The last fetch failed. The error is kept next to the status.
    Rejected,
}

impl AsyncStatus {
    /// Fulfilled and Rejected are the terminal statuses of an attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AsyncStatus::Fulfilled | AsyncStatus::Rejected)
    }

    pub fn is_settling(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for AsyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AsyncStatus::Standby => "standby",
            AsyncStatus::Pending => "pending",
            AsyncStatus::Fulfilled => "fulfilled",
            AsyncStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// The `{ value, error, status }` triple handed to consumers of a fetch.
#[cw_serde]
pub struct FetchState<T> {
    pub status: AsyncStatus,
    pub value: Option<T>,
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::standby()
    }
}

impl<T> FetchState<T> {
    pub fn standby() -> Self {
        FetchState {
            status: AsyncStatus::Standby,
            value: None,
            error: None,
        }
    }

    pub fn fulfilled(value: T) -> Self {
        FetchState {
            status: AsyncStatus::Fulfilled,
            value: Some(value),
            error: None,
        }
    }

    /// A rejected fetch never carries a value.
    pub fn rejected(error: impl ToString) -> Self {
        FetchState {
            status: AsyncStatus::Rejected,
            value: None,
            error: Some(error.to_string()),
        }
    }

    /// Re-enters Pending. The previous value stays visible until the attempt settles.
    pub fn into_pending(self) -> Self {
        FetchState {
            status: AsyncStatus::Pending,
            value: self.value,
            error: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
