//! Classification outcome for a single raw location string.

use serde::{Deserialize, Serialize};

/// Why a location was rejected. `None` is reserved for valid verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionCategory {
    None,
    NullOrEmpty,
    UsLocation,
    International,
    Unrecognized,
}

impl RejectionCategory {
    /// Every rejection category, in reporting order.
    pub const REJECTIONS: [RejectionCategory; 4] = [
        RejectionCategory::NullOrEmpty,
        RejectionCategory::UsLocation,
        RejectionCategory::International,
        RejectionCategory::Unrecognized,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RejectionCategory::None => "none",
            RejectionCategory::NullOrEmpty => "null_or_empty",
            RejectionCategory::UsLocation => "us_location",
            RejectionCategory::International => "international",
            RejectionCategory::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for RejectionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one raw location.
///
/// Fields are private so the two invariants hold by construction:
/// `is_valid()` iff the category is [`RejectionCategory::None`], and a
/// normalized city is present iff the verdict is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationVerdict {
    is_valid: bool,
    normalized_city: Option<String>,
    normalized_state: Option<String>,
    rejection_category: RejectionCategory,
    rejection_detail: String,
    /// Set when the only usable content was a remote/anywhere marker.
    remote: bool,
}

impl ValidationVerdict {
    #[must_use]
    pub fn valid(city: impl Into<String>, state: Option<String>) -> Self {
        Self {
            is_valid: true,
            normalized_city: Some(city.into()),
            normalized_state: state,
            rejection_category: RejectionCategory::None,
            rejection_detail: String::new(),
            remote: false,
        }
    }

    /// Builds a rejected verdict.
    ///
    /// Passing [`RejectionCategory::None`] is a caller bug; it is coerced to
    /// [`RejectionCategory::Unrecognized`] so the invariant still holds.
    #[must_use]
    pub fn rejected(category: RejectionCategory, detail: impl Into<String>) -> Self {
        let category = if category == RejectionCategory::None {
            RejectionCategory::Unrecognized
        } else {
            category
        };
        Self {
            is_valid: false,
            normalized_city: None,
            normalized_state: None,
            rejection_category: category,
            rejection_detail: detail.into(),
            remote: false,
        }
    }

    #[must_use]
    pub fn remote(detail: impl Into<String>) -> Self {
        Self {
            remote: true,
            ..Self::rejected(RejectionCategory::International, detail)
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    #[must_use]
    pub fn normalized_city(&self) -> Option<&str> {
        self.normalized_city.as_deref()
    }

    #[must_use]
    pub fn normalized_state(&self) -> Option<&str> {
        self.normalized_state.as_deref()
    }

    #[must_use]
    pub fn rejection_category(&self) -> RejectionCategory {
        self.rejection_category
    }

    #[must_use]
    pub fn rejection_detail(&self) -> &str {
        &self.rejection_detail
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.remote
    }
}
