use super::*;

#[test]
fn defaults_match_documented_values() {
    let opts = GenerateOptions::default();
    assert!(opts.artistic);
    assert!(!opts.greyscale);
    assert_eq!(opts.background, Rgba8::new(240, 240, 240, 255));
    assert!(!opts.parallel);
}

#[test]
fn empty_json_gives_defaults() {
    assert_eq!(
        GenerateOptions::from_json_str("{}").unwrap(),
        GenerateOptions::default()
    );
}

#[test]
fn partial_json_overrides_fields() {
    let opts = GenerateOptions::from_json_str(
        r##"{ "greyscale": true, "background": "transparent" }"##,
    )
    .unwrap();
    assert!(opts.artistic);
    assert!(opts.greyscale);
    assert!(opts.background.is_transparent());

    let opts = GenerateOptions::from_json_str(r#"{ "background": [255, 0, 0] }"#).unwrap();
    assert_eq!(opts.background, Rgba8::new(255, 0, 0, 255));
}

#[test]
fn unknown_fields_and_bad_colors_are_rejected() {
    let err = GenerateOptions::from_json_str(r#"{ "greyscal": true }"#).unwrap_err();
    assert!(matches!(err, MonsterError::Validation(_)), "{err}");

    assert!(GenerateOptions::from_json_str(r##"{ "background": "#12" }"##).is_err());
}

#[test]
fn json_round_trip() {
    let opts = GenerateOptions {
        artistic: false,
        greyscale: true,
        background: Rgba8::new(1, 2, 3, 4),
        parallel: true,
    };
    let text = serde_json::to_string(&opts).unwrap();
    assert_eq!(GenerateOptions::from_json_str(&text).unwrap(), opts);
}

#[test]
fn missing_file_is_an_error() {
    let err = GenerateOptions::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("read options"), "{err}");
}
