pub(crate) mod classify;
pub(crate) mod grouper;
pub(crate) mod kmeans;
pub(crate) mod rebalance;
