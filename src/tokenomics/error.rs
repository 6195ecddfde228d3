/// Faults surfaced by the aggregator
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenomicsError {
    #[error("token address is not configured")]
    MissingTokenAddress,
}
