use async_trait::async_trait;
use traveller_core::Resource;

use crate::error::RemoteResult;

/// Port for re-fetching an arbitrary remote resource by its identity
#[async_trait]
pub trait ResourceFetcher<R: Resource>: Send + Sync {
    async fn retrieve(&self, id: &str) -> RemoteResult<R>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use traveller_core::ApiObject;

    fn _assert_fetcher_object_safe(_: &dyn ResourceFetcher<ApiObject>) {}
}
