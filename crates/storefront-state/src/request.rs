//! Request tickets and the stale-response policy.
//!
//! Every remote call is issued a ticket from a monotonically increasing
//! counter. When the response comes back, the tracker decides whether it may
//! still be applied to the store.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// What to do with a response that resolves after a newer request of the same kind was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    /// Apply every response in the order it resolves. A slow early request can
    /// overwrite a faster later one.
    #[default]
    LastResolvedWins,
    /// Apply only the response to the most recently issued request.
    LatestRequestWins,
}

impl StalePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StalePolicy::LastResolvedWins => "last-resolved-wins",
            StalePolicy::LatestRequestWins => "latest-request-wins",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "last-resolved-wins" => Some(StalePolicy::LastResolvedWins),
            "latest-request-wins" => Some(StalePolicy::LatestRequestWins),
            _ => None,
        }
    }
}

/// Families of requests that overwrite the same slice data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestKind {
    ProductList,
    ProductDetail,
    RelatedProducts,
    FilterOptions,
    ProductMutation,
    Session,
    Profile,
    UserList,
    UserDetail,
    UserMutation,
    OrderList,
    OrderDetail,
}

/// A ticket for one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket {
    pub kind: RequestKind,
    pub seq: u64,
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.kind, self.seq)
    }
}

/// Issues tickets and judges responses against the policy.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    policy: StalePolicy,
    next_seq: u64,
    latest: HashMap<RequestKind, u64>,
}

impl RequestTracker {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            policy,
            next_seq: 0,
            latest: HashMap::new(),
        }
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    /// Issue a ticket; it becomes the latest of its kind.
    pub fn issue(&mut self, kind: RequestKind) -> Ticket {
        self.next_seq += 1;
        self.latest.insert(kind, self.next_seq);
        let ticket = Ticket {
            kind,
            seq: self.next_seq,
        };
        debug!(%ticket, "issued request ticket");
        ticket
    }

    /// Whether no newer request of the same kind has been issued.
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.get(&ticket.kind).copied() == Some(ticket.seq)
    }

    /// Whether the response for `ticket` may be applied.
    pub fn should_apply(&self, ticket: Ticket) -> bool {
        match self.policy {
            StalePolicy::LastResolvedWins => true,
            StalePolicy::LatestRequestWins => {
                let current = self.is_latest(ticket);
                if !current {
                    warn!(%ticket, "discarding stale response");
                }
                current
            }
        }
    }
}
