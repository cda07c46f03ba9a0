/// A snapshot of a remote object that can be re-fetched by its identity
///
/// Implemented by anything the condition waiter can poll. `status` is the
/// "has a lifecycle status" capability: resources without one keep the
/// default and are refused by status-based waits.
pub trait Resource: Clone + Send + Sync {
    /// Remote identifier used to re-fetch this resource
    fn id(&self) -> &str;

    /// Lifecycle status, if this kind of resource has one
    fn status(&self) -> Option<&str> {
        None
    }
}
