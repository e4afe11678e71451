//! Location validation: approved-city registry, classifier, and verdicts.

mod classifier;
mod reference;
mod registry;
mod verdict;

pub use classifier::LocationClassifier;
pub use registry::{ApprovedCityRegistry, CityReference};
pub use verdict::{RejectionCategory, ValidationVerdict};
