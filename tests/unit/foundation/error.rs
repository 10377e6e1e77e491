use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LayerModeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LayerModeError::buffer("x")
            .to_string()
            .contains("buffer error:")
    );
    assert!(
        LayerModeError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        LayerModeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LayerModeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let parse = serde_json::from_str::<u32>("not json").unwrap_err();
    let err = LayerModeError::from(parse);
    assert!(matches!(err, LayerModeError::Serde(_)));
}
