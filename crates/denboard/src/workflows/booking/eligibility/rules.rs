use super::config::RuleTables;
use super::policy::{EligibilityReason, PetEligibility};

/// Canonical form used for keyword matching: lower-cased, then trimmed.
pub fn normalize_breed(breed: &str) -> String {
    breed.to_lowercase().trim().to_string()
}

fn contains_any(normalized: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|keyword| normalized.contains(keyword.as_str()))
}

/// First matching rule wins: blocked breed, then meet & greet breed, then weight.
pub(crate) fn classify_pet(breed: &str, weight_lbs: f64, rules: &RuleTables) -> PetEligibility {
    let normalized = normalize_breed(breed);

    if contains_any(&normalized, rules.blocked_breed_keywords()) {
        return PetEligibility::Blocked(EligibilityReason::BlockedBreed {
            breed: breed.to_string(),
        });
    }

    if contains_any(&normalized, rules.meet_greet_breed_keywords()) {
        return PetEligibility::MeetGreetRequired(EligibilityReason::RestrictedBreed {
            breed: breed.to_string(),
        });
    }

    // NaN and unknown (0) weights fall through to clear.
    if weight_lbs >= rules.large_dog_weight_threshold_lbs() {
        return PetEligibility::MeetGreetRequired(EligibilityReason::LargeDog {
            threshold_lbs: rules.large_dog_weight_threshold_lbs(),
        });
    }

    PetEligibility::Clear
}
