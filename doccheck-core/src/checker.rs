use crate::checkers::{
    AccessibilityChecker, AccuracyChecker, CompletenessChecker, ScalingChecker, StructureChecker,
    StyleChecker, VendorSetupChecker,
};
use crate::domain::{Dimension, PackageContext, StagedValidationResult};
use std::sync::Arc;

pub trait Checker: Send + Sync {
    fn name(&self) -> &str;

    fn dimension(&self) -> Dimension;

    fn semantic_supported(&self) -> bool {
        true
    }

    fn check(&self, doc: &str, ctx: &PackageContext) -> StagedValidationResult;
}

// Default checker set in report order. Checkers are stateless; the order only
// affects how the feedback report reads, never the outcome.
pub fn registry() -> Vec<Arc<dyn Checker>> {
    vec![
        Arc::new(StructureChecker),
        Arc::new(CompletenessChecker),
        Arc::new(AccuracyChecker),
        Arc::new(VendorSetupChecker),
        Arc::new(ScalingChecker),
        Arc::new(AccessibilityChecker),
        Arc::new(StyleChecker),
    ]
}
