use crate::defaults::AssemblyDefaults;
use crate::pipeline::{MinimizerDescriptor, PerformancePolicy};

/// What the production branch adds to the base skeleton.
#[derive(Debug, Clone)]
pub(crate) struct ProductionStages {
    pub(crate) minimizer: MinimizerDescriptor,
    pub(crate) performance: PerformancePolicy,
}

pub(crate) fn extend(defaults: &AssemblyDefaults) -> ProductionStages {
    ProductionStages {
        minimizer: MinimizerDescriptor::from_levels(defaults.minify),
        performance: PerformancePolicy::warn(),
    }
}
