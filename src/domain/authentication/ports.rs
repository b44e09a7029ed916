use std::future::Future;

use crate::domain::{
    authentication::value_objects::Identity, common::entities::app_errors::CoreError,
};

/// Yields the current user; every core entry point calls this first.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    /// Fails with [`CoreError::AuthenticationRequired`] when no session is
    /// active.
    fn authenticated_identity(&self) -> impl Future<Output = Result<Identity, CoreError>> + Send;
}
