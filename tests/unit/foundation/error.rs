use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FolioError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FolioError::layout("x").to_string().contains("layout error:"));
    assert!(
        FolioError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        FolioError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FolioError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: FolioError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, FolioError::Serde(_)));
}
