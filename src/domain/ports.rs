use crate::utils::error::Result;

/// Byte sink for reports produced by the core (ledger exports).
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
