use super::*;

#[test]
fn empty_json_yields_defaults() {
    let opts = SketchOpts::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(opts, SketchOpts::default());
    assert_eq!(opts.undo_capacity, 30);
    assert_eq!(opts.base_width, 10.0);
    assert_eq!(opts.import_fit, 0.7);
    assert_eq!(opts.background, Rgb8::WHITE);
}

#[test]
fn partial_json_overrides_fields() {
    let opts = SketchOpts::from_reader(
        r#"{"background":{"r":250,"g":248,"b":240},"undo_capacity":5,"save_dir":"/tmp/x"}"#
            .as_bytes(),
    )
    .unwrap();
    assert_eq!(opts.background, Rgb8::new(250, 248, 240));
    assert_eq!(opts.undo_capacity, 5);
    assert_eq!(opts.save_dir, Some(PathBuf::from("/tmp/x")));
}

#[test]
fn invalid_values_and_unknown_fields_are_rejected() {
    for bad in [
        r#"{"undo_capacity":0}"#,
        r#"{"base_width":0.5}"#,
        r#"{"base_width":101}"#,
        r#"{"import_fit":0}"#,
        r#"{"import_fit":1.5}"#,
        r#"{"colour":"red"}"#,
        "not json",
    ] {
        let err = SketchOpts::from_reader(bad.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("validation error:"), "{bad}");
    }
}

#[test]
fn undo_capacity_is_bounded() {
    let max = SketchOpts::from_reader(r#"{"undo_capacity":1024}"#.as_bytes()).unwrap();
    assert_eq!(max.undo_capacity, MAX_UNDO_CAPACITY);

    for huge in [r#"{"undo_capacity":1025}"#, r#"{"undo_capacity":18446744073709551615}"#] {
        let err = SketchOpts::from_reader(huge.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("undo_capacity"), "{huge}");
    }
}

#[test]
fn from_path_reports_missing_file() {
    let err = SketchOpts::from_path("/no/such/sketch-opts.json").unwrap_err();
    assert!(err.to_string().contains("open sketch options"));
}
