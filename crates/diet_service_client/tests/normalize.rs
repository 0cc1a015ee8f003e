use diet_service_client::profile::{
    Activity, Gender, Period, Profile, ProfileDraft, normalize_allergens,
};

fn draft_with_numbers(age: &str, weight: &str, height: &str) -> ProfileDraft {
    ProfileDraft {
        age: age.into(),
        weight: weight.into(),
        height: height.into(),
        ..ProfileDraft::default()
    }
}

#[test]
fn blank_numeric_fields_normalize_to_none() {
    let profile = draft_with_numbers("", "  ", "").normalize();
    assert_eq!(profile.age, None);
    assert_eq!(profile.weight, None);
    assert_eq!(profile.height, None);
}

#[test]
fn non_numeric_fields_normalize_to_none() {
    let profile = draft_with_numbers("thirty", "8o", "6ft").normalize();
    assert_eq!(profile.age, None);
    assert_eq!(profile.weight, None);
    assert_eq!(profile.height, None);
}

#[test]
fn non_positive_fields_normalize_to_none() {
    let profile = draft_with_numbers("0", "-72.5", "0").normalize();
    assert_eq!(profile.age, None);
    assert_eq!(profile.weight, None);
    assert_eq!(profile.height, None);
}

#[test]
fn well_formed_numbers_survive_normalization() {
    let profile = draft_with_numbers(" 34 ", "81.5", "183").normalize();
    assert_eq!(profile.age, Some(34));
    assert_eq!(profile.weight, Some(81.5));
    assert_eq!(profile.height, Some(183));
}

#[test]
fn milk_canonicalizes_to_lactose_once() {
    let raw = vec![
        "Молоко".to_string(),
        "МОЛОКО".to_string(),
        "молоко".to_string(),
        "lactose".to_string(),
    ];
    assert_eq!(normalize_allergens(&raw), vec!["lactose".to_string()]);
}

#[test]
fn allergens_lowercase_and_keep_insertion_order() {
    let raw = vec![
        "Gluten".to_string(),
        "Молоко".to_string(),
        "Nuts".to_string(),
        "gluten".to_string(),
    ];
    assert_eq!(
        normalize_allergens(&raw),
        vec!["gluten".to_string(), "lactose".to_string(), "nuts".to_string()]
    );
}

#[test]
fn defaults_match_the_blank_form() {
    let profile = ProfileDraft::default().normalize();
    assert_eq!(profile.gender, Gender::Female);
    assert_eq!(profile.activity, Activity::Moderate);
    assert_eq!(profile.period, Period::Day);
    assert_eq!(profile, Profile::default());
}
