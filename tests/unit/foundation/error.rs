use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MonsterError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MonsterError::part_not_found("x")
            .to_string()
            .contains("part not found:")
    );
    assert!(
        MonsterError::decode("x")
            .to_string()
            .contains("decode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MonsterError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
