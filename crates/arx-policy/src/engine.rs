use std::fmt;

use arx_store::Envelope;
use arx_types::{PrincipalId, Visibility};
use serde::{Deserialize, Serialize};

/// The operations the engine gates.
///
/// Create is absent: it always succeeds for an authenticated principal.
/// Grant changes are authorized as `Delete`-grade operations (owner only).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Read,
    Update,
    Delete,
    Share,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::Share => write!(f, "share"),
        }
    }
}

/// How a denial should be reported to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Denial {
    /// Report not-found: the caller may not learn the envelope exists.
    Concealed,
    /// Report forbidden: the envelope is visible but the operation is not
    /// permitted for this principal.
    Forbidden { reason: String },
}

/// The engine's verdict for one (operation, envelope, principal) triple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny(Denial),
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    fn forbidden(operation: Operation, principal: &PrincipalId) -> Self {
        Self::Deny(Denial::Forbidden {
            reason: format!("{operation} not permitted for {principal}"),
        })
    }
}

/// Policy configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// When `true` (the default), denied access to private envelopes is
    /// reported as not-found rather than forbidden, so probes cannot
    /// confirm existence.
    pub conceal_private: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            conceal_private: true,
        }
    }
}

/// The visibility policy engine.
///
/// Stateless apart from its configuration; evaluation never touches the
/// store, so callers fetch the envelope first and the store's per-envelope
/// atomicity keeps check and mutation consistent.
#[derive(Clone, Debug, Default)]
pub struct PolicyEngine {
    config: PolicyConfig,
}

impl PolicyEngine {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Authorize `operation` on `envelope` for `principal`.
    pub fn authorize(
        &self,
        operation: Operation,
        envelope: &Envelope,
        principal: &PrincipalId,
    ) -> Access {
        if envelope.is_owner(principal) {
            return Access::Allow;
        }
        match operation {
            Operation::Read => self.authorize_read(envelope, principal),
            Operation::Update => self.authorize_update(envelope, principal),
            // Deletion and grant changes never extend to granted
            // principals; grants confer read and update only.
            Operation::Delete | Operation::Share => self.deny_mutation(operation, envelope, principal),
        }
    }

    /// Whether `envelope` appears in a listing requested by `principal`.
    ///
    /// Unlisted envelopes of other owners are readable by identifier but
    /// never discoverable here.
    pub fn visible_in_listing(&self, envelope: &Envelope, principal: &PrincipalId) -> bool {
        envelope.visibility == Visibility::Public
            || envelope.is_owner(principal)
            || (envelope.visibility == Visibility::Private && envelope.is_granted(principal))
    }

    fn authorize_read(&self, envelope: &Envelope, principal: &PrincipalId) -> Access {
        match envelope.visibility {
            Visibility::Public | Visibility::Unlisted => Access::Allow,
            Visibility::Private => {
                if envelope.is_granted(principal) {
                    Access::Allow
                } else {
                    self.conceal_or_forbid(Operation::Read, principal)
                }
            }
        }
    }

    fn authorize_update(&self, envelope: &Envelope, principal: &PrincipalId) -> Access {
        if envelope.visibility == Visibility::Private && envelope.is_granted(principal) {
            return Access::Allow;
        }
        self.deny_mutation(Operation::Update, envelope, principal)
    }

    /// Shape a mutation denial: forbidden when the principal could read the
    /// envelope anyway, concealed when even its existence is protected.
    fn deny_mutation(
        &self,
        operation: Operation,
        envelope: &Envelope,
        principal: &PrincipalId,
    ) -> Access {
        if self.authorize_read(envelope, principal).is_allowed() {
            Access::forbidden(operation, principal)
        } else {
            self.conceal_or_forbid(operation, principal)
        }
    }

    fn conceal_or_forbid(&self, operation: Operation, principal: &PrincipalId) -> Access {
        if self.config.conceal_private {
            Access::Deny(Denial::Concealed)
        } else {
            Access::forbidden(operation, principal)
        }
    }
}
