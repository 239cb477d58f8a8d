use std::collections::HashSet;

use thiserror::Error;

use workact_core::OperatorId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("operator {0} is not on the allow-list")]
    NotAllowed(OperatorId),
}

/// Decides whether an operator may use the bot at all.
///
/// Checked at the command boundary, before any dialogue state is touched.
pub trait Authorizer: Send + Sync {
    fn is_allowed(&self, operator: OperatorId) -> bool;
}

/// Fixed set of permitted operator ids, loaded from configuration.
///
/// An empty list permits nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    operators: HashSet<OperatorId>,
}

impl AllowList {
    pub fn new(operators: impl IntoIterator<Item = OperatorId>) -> Self {
        Self {
            operators: operators.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl Authorizer for AllowList {
    fn is_allowed(&self, operator: OperatorId) -> bool {
        self.operators.contains(&operator)
    }
}

/// Authorize an operator.
///
/// - No IO
/// - No panics
pub fn authorize(authorizer: &dyn Authorizer, operator: OperatorId) -> Result<(), AuthzError> {
    if authorizer.is_allowed(operator) {
        Ok(())
    } else {
        tracing::warn!(%operator, "access denied");
        Err(AuthzError::NotAllowed(operator))
    }
}
