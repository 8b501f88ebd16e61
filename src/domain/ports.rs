use crate::domain::model::CanonicalBanAction;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the raw ban export is read from.
pub trait BanSource: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// The player-moderation registry that receives imported bans.
#[async_trait]
pub trait BanRegistry: Send + Sync {
    async fn register_ban(&self, action: &CanonicalBanAction) -> Result<()>;
}

#[async_trait]
impl<R: BanRegistry + ?Sized> BanRegistry for Box<R> {
    async fn register_ban(&self, action: &CanonicalBanAction) -> Result<()> {
        (**self).register_ban(action).await
    }
}
