//! Error handling tests

use pkgsheet::error::PkgsheetError;

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
    let err: PkgsheetError = io.into();
    assert!(matches!(err, PkgsheetError::Io(_)));
    assert!(err.to_string().starts_with("IO error"));
    assert!(!err.is_input_error());
}

#[test]
fn test_parse_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: PkgsheetError = json_err.into();
    assert!(matches!(err, PkgsheetError::Parse(_)));
    assert!(err.to_string().starts_with("JSON parse error"));
    assert!(err.is_input_error());
}

#[test]
fn test_error_display() {
    assert_eq!(
        PkgsheetError::Serialization("bad shape".to_string()).to_string(),
        "Serialization error: bad shape"
    );
    assert_eq!(
        PkgsheetError::Registry("offline".to_string()).to_string(),
        "Package registry error: offline"
    );
    assert_eq!(
        PkgsheetError::InvalidName("x y".to_string()).to_string(),
        "Invalid package name: x y"
    );
    assert_eq!(
        PkgsheetError::Read("zip".to_string()).to_string(),
        "Spreadsheet read error: zip"
    );
}

#[test]
fn test_exit_codes_never_collide_with_lookup_results() {
    let input_errors = [
        PkgsheetError::InvalidName("a>=1".to_string()),
        PkgsheetError::Serialization("mixed".to_string()),
        serde_json::from_str::<serde_json::Value>("[").unwrap_err().into(),
    ];
    for err in &input_errors {
        assert_eq!(err.exit_code(), 2, "{err}");
    }

    let environment_errors = [
        PkgsheetError::Registry("offline".to_string()),
        PkgsheetError::Read("zip".to_string()),
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "site").into(),
    ];
    for err in &environment_errors {
        assert_eq!(err.exit_code(), 3, "{err}");
    }
}
