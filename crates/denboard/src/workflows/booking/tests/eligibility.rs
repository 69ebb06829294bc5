use super::common::*;
use crate::workflows::booking::eligibility::{
    BookingDecision, EligibilityEngine, EligibilityReason, MeetGreetNotice, PetEligibility,
    RuleTableError, RuleTableKind, RuleTables,
};

#[test]
fn rottweiler_is_blocked_with_apology() {
    let result = engine().classify("Rottweiler", 30.0);

    assert!(result.is_blocked());
    assert!(!result.meet_greet_required());
    assert_eq!(
        result.message().as_deref(),
        Some("We're sorry, but we are unable to board Rottweiler at this time.")
    );
}

#[test]
fn breed_reason_wins_over_weight_reason() {
    let result = engine().classify("Pit Bull Terrier Mix", 55.0);

    assert_eq!(
        result,
        PetEligibility::MeetGreetRequired(EligibilityReason::RestrictedBreed {
            breed: "Pit Bull Terrier Mix".to_string(),
        })
    );
    assert_eq!(
        result.message().as_deref(),
        Some("Pit Bull Terrier Mix requires a meet & greet before first stay")
    );
}

#[test]
fn heavy_dog_requires_meet_greet() {
    let view = engine().classify("Labrador", 60.0).view();

    assert!(!view.is_blocked);
    assert!(view.meet_greet_required);
    assert_eq!(
        view.message.as_deref(),
        Some("Dogs over 41 lbs require a meet & greet before first stay")
    );
}

#[test]
fn light_dog_is_clear() {
    let result = engine().classify("Labrador", 20.0);

    assert_eq!(result, PetEligibility::Clear);
    assert!(result.message().is_none());
}

#[test]
fn weight_rule_is_inclusive_at_threshold() {
    let engine = engine();

    assert!(engine.classify("Labrador", 41.0).meet_greet_required());
    assert!(!engine.classify("Labrador", 40.9).meet_greet_required());
}

#[test]
fn classification_is_deterministic() {
    let engine = engine();
    let inputs = [
        ("Rottweiler", 30.0),
        ("German Shepherd", 70.0),
        ("", 0.0),
        ("Mutt", 41.0),
    ];

    for (breed, weight) in inputs {
        assert_eq!(engine.classify(breed, weight), engine.classify(breed, weight));
    }
}

#[test]
fn blocked_breed_ignores_weight() {
    let engine = engine();

    for weight in [0.0, 12.5, 41.0, 150.0] {
        let result = engine.classify("Cane Corso", weight);
        assert!(result.is_blocked(), "weight {weight}");
        assert!(!result.meet_greet_required(), "weight {weight}");
    }
}

#[test]
fn blocked_check_runs_before_meet_greet_check() {
    let result = engine().classify("Rottweiler / German Shepherd cross", 20.0);

    assert!(result.is_blocked());
    assert!(!result.meet_greet_required());
}

#[test]
fn unmatched_breed_depends_only_on_weight() {
    let engine = engine();

    for weight in [0.0, 10.0, 40.99, 41.0, 41.01, 95.0] {
        let result = engine.classify("Golden Retriever", weight);
        assert!(!result.is_blocked());
        assert_eq!(result.meet_greet_required(), weight >= 41.0, "weight {weight}");
    }
}

#[test]
fn matching_ignores_case_and_outer_whitespace() {
    let engine = engine();

    for weight in [0.0, 30.0, 60.0] {
        let shouted = engine.classify("  PIT BULL  ", weight);
        let plain = engine.classify("pit bull", weight);
        assert_eq!(shouted.is_blocked(), plain.is_blocked());
        assert_eq!(shouted.meet_greet_required(), plain.meet_greet_required());
    }
}

#[test]
fn message_keeps_breed_as_entered() {
    let result = engine().classify("  PIT BULL  ", 10.0);

    assert_eq!(
        result.message().as_deref(),
        Some("  PIT BULL   requires a meet & greet before first stay")
    );
}

#[test]
fn unknown_breed_only_triggers_on_weight() {
    let engine = engine();

    assert_eq!(engine.classify("", 0.0), PetEligibility::Clear);
    assert!(engine.classify("", 80.0).meet_greet_required());
}

#[test]
fn booking_with_blocked_pet_cannot_proceed() {
    let decision = engine().evaluate_booking(
        &[pet("Labrador", 20.0), pet("Rottweiler", 30.0)],
        false,
    );

    assert_eq!(
        decision,
        BookingDecision {
            has_blocked_pet: true,
            requires_meet_greet: false,
        }
    );
    assert!(!decision.can_proceed());
}

#[test]
fn new_client_alone_requires_meet_greet() {
    let decision = engine().evaluate_booking(&[pet("Labrador", 20.0)], true);

    assert_eq!(
        decision,
        BookingDecision {
            has_blocked_pet: false,
            requires_meet_greet: true,
        }
    );
}

#[test]
fn empty_booking_reflects_client_policy() {
    let engine = engine();

    assert_eq!(engine.evaluate_booking(&[], true), BookingDecision {
        has_blocked_pet: false,
        requires_meet_greet: true,
    });
    assert_eq!(engine.evaluate_booking(&[], false), BookingDecision::default());
}

#[test]
fn returning_client_with_clear_pet_needs_nothing() {
    let decision = engine().evaluate_booking(&[pet("Beagle", 22.0)], false);

    assert!(!decision.requires_meet_greet);
    assert!(!decision.has_blocked_pet);
}

#[test]
fn any_pet_can_trigger_meet_greet() {
    let decision = engine().evaluate_booking(
        &[pet("Beagle", 22.0), pet("Great Dane", 120.0), pet("Corgi", 28.0)],
        false,
    );

    assert!(decision.requires_meet_greet);
    assert!(!decision.has_blocked_pet);
}

#[test]
fn aggregation_ignores_pet_order() {
    let engine = engine();
    let pets = vec![
        pet("Beagle", 22.0),
        pet("German Shepherd", 65.0),
        pet("Cane Corso", 100.0),
    ];
    let mut reversed = pets.clone();
    reversed.reverse();

    for client_is_new in [false, true] {
        assert_eq!(
            engine.evaluate_booking(&pets, client_is_new),
            engine.evaluate_booking(&reversed, client_is_new)
        );
    }
}

#[test]
fn blocked_flag_matches_per_pet_results() {
    let engine = engine();
    let rosters = [
        vec![pet("Beagle", 22.0)],
        vec![pet("Beagle", 22.0), pet("rottweiler mix", 50.0)],
        vec![pet("German Shepherd", 70.0)],
        vec![],
    ];

    for roster in rosters {
        let expected = roster.iter().any(|p| engine.classify_pet(p).is_blocked());
        assert_eq!(engine.evaluate_booking(&roster, false).has_blocked_pet, expected);
    }
}

#[test]
fn assess_keeps_results_in_input_order() {
    let report = engine().assess(
        &[pet("Beagle", 22.0), pet("German Shepherd", 30.0), pet("Rottweiler", 80.0)],
        false,
    );

    assert_eq!(report.pets.len(), 3);
    assert_eq!(report.pets[0], PetEligibility::Clear);
    assert!(report.pets[1].meet_greet_required());
    assert!(report.pets[2].is_blocked());
    assert_eq!(
        report.blocked_messages(),
        vec!["We're sorry, but we are unable to board Rottweiler at this time.".to_string()]
    );
    assert_eq!(report.notice, Some(MeetGreetNotice::PetProfile));
}

#[test]
fn house_policy_covers_published_breeds() {
    let engine = EligibilityEngine::default();

    assert!(engine.classify("Neapolitan Mastiff", 90.0).is_blocked());
    assert!(engine.classify("Wolfdog", 60.0).is_blocked());
    assert!(engine.classify("Chow Chow", 35.0).meet_greet_required());
    assert!(engine.classify("Doberman", 35.0).meet_greet_required());
    assert_eq!(engine.rules().large_dog_weight_threshold_lbs(), 41.0);
}

#[test]
fn substring_matching_catches_compound_names() {
    let engine = EligibilityEngine::default();

    // "mastiff" is a blocked keyword, so any mastiff cross is blocked too.
    assert!(engine.classify("Mastiff x Lab", 30.0).is_blocked());
    assert!(engine.classify("American Pit Bull Terrier", 30.0).meet_greet_required());
}

#[test]
fn rule_keywords_are_normalized_on_load() {
    let rules = RuleTables::new(["  Akita "], ["Husky"], 50.0).expect("valid rules");

    assert_eq!(rules.blocked_breed_keywords(), ["akita".to_string()]);
    assert_eq!(rules.meet_greet_breed_keywords(), ["husky".to_string()]);
}

#[test]
fn rule_tables_reject_empty_keywords() {
    match RuleTables::new(["rottweiler", "   "], ["pit bull"], 41.0) {
        Err(RuleTableError::EmptyKeyword {
            table: RuleTableKind::Blocked,
        }) => {}
        other => panic!("expected empty keyword error, got {other:?}"),
    }
}

#[test]
fn rule_tables_reject_non_positive_threshold() {
    let empty: [&str; 0] = [];
    assert!(matches!(
        RuleTables::new(empty, empty, 0.0),
        Err(RuleTableError::InvalidThreshold(_))
    ));
    assert!(matches!(
        RuleTables::new(empty, empty, f64::INFINITY),
        Err(RuleTableError::InvalidThreshold(_))
    ));
}

#[test]
fn rule_tables_load_from_json() {
    let rules = RuleTables::from_json(
        r#"{
            "blockedBreedKeywords": ["Wolf Hybrid"],
            "meetGreetBreedKeywords": ["husky"],
            "largeDogWeightThresholdLbs": 60
        }"#,
    )
    .expect("valid json rules");
    let engine = EligibilityEngine::new(std::sync::Arc::new(rules));

    assert!(engine.classify("wolf hybrid", 40.0).is_blocked());
    assert!(engine.classify("Siberian Husky", 40.0).meet_greet_required());
    assert!(!engine.classify("Labrador", 55.0).meet_greet_required());
    assert_eq!(
        engine.classify("Labrador", 60.0).message().as_deref(),
        Some("Dogs over 60 lbs require a meet & greet before first stay")
    );
}

#[test]
fn rule_tables_report_malformed_json() {
    assert!(matches!(
        RuleTables::from_json("{\"blockedBreedKeywords\": "),
        Err(RuleTableError::Parse { path: None, .. })
    ));
}

#[test]
fn deserialized_rule_tables_are_normalized() {
    let rules: RuleTables = serde_json::from_str(
        r#"{
            "blockedBreedKeywords": ["  Rottweiler "],
            "meetGreetBreedKeywords": ["Akita"],
            "largeDogWeightThresholdLbs": 41
        }"#,
    )
    .expect("valid rules");
    let engine = EligibilityEngine::new(std::sync::Arc::new(rules));

    assert!(engine.classify("Rottweiler", 0.0).is_blocked());
    assert!(engine.classify("Akita Inu", 0.0).meet_greet_required());
    assert_eq!(engine.classify("Beagle", 0.0), PetEligibility::Clear);
}

#[test]
fn deserializing_rejects_tables_that_would_match_everything() {
    let empty_keyword = serde_json::from_str::<RuleTables>(
        r#"{
            "blockedBreedKeywords": ["Rottweiler"],
            "meetGreetBreedKeywords": [""],
            "largeDogWeightThresholdLbs": 41
        }"#,
    );
    assert!(empty_keyword.is_err());

    let negative_threshold = serde_json::from_str::<RuleTables>(
        r#"{
            "blockedBreedKeywords": ["Rottweiler"],
            "meetGreetBreedKeywords": ["akita"],
            "largeDogWeightThresholdLbs": -1.0
        }"#,
    );
    assert!(negative_threshold.is_err());
}

#[test]
fn from_json_keeps_validation_errors_distinct_from_parse_errors() {
    assert!(matches!(
        RuleTables::from_json(
            r#"{
                "blockedBreedKeywords": [" "],
                "meetGreetBreedKeywords": [],
                "largeDogWeightThresholdLbs": 41
            }"#
        ),
        Err(RuleTableError::EmptyKeyword {
            table: RuleTableKind::Blocked
        })
    ));
}
