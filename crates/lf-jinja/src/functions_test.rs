use super::*;

#[test]
fn test_incremental_state_gating() {
    let state = IncrementalState {
        is_incremental_model: true,
        relation_exists: true,
        full_refresh: false,
    };
    assert!(state.is_incremental_run());

    assert!(!IncrementalState {
        relation_exists: false,
        ..state.clone()
    }
    .is_incremental_run());
    assert!(!IncrementalState {
        full_refresh: true,
        ..state.clone()
    }
    .is_incremental_run());
    assert!(!IncrementalState {
        is_incremental_model: false,
        ..state
    }
    .is_incremental_run());
}

#[test]
fn test_yaml_to_json_scalars() {
    assert_eq!(
        yaml_to_json(&serde_yaml::Value::String("x".into())),
        serde_json::Value::String("x".into())
    );
    assert_eq!(
        yaml_to_json(&serde_yaml::Value::Bool(true)),
        serde_json::Value::Bool(true)
    );
}

#[test]
fn test_ref_fn_quotes_components() {
    let ref_fn = make_ref_fn("my schema".to_string());
    assert_eq!(ref_fn("t").unwrap(), r#""my schema"."t""#);
}
