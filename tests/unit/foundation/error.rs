use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ChoreoError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ChoreoError::script("x").to_string().contains("script error:"));
    assert!(
        ChoreoError::runtime("x")
            .to_string()
            .contains("runtime error:")
    );
    assert!(
        ChoreoError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ChoreoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
