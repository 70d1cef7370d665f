//! File-backed validation, config loading and response rendering.

#![cfg(feature = "serde")]

use std::io::Write;

use fseq::{
    validate_file, Error, FseqError, SequenceBuilder, SequenceFile, SequenceSource,
    UploadResponse, Validator, ValidatorConfig,
};
use tempfile::NamedTempFile;

fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

fn blank_show(frames: usize) -> Vec<u8> {
    SequenceBuilder::new()
        .step_time_ms(25)
        .repeat_frame(&[0; 30], &[0; 16], frames)
        .build()
}

#[test]
fn open_and_validate() {
    let temp = write_temp(&blank_show(40));
    let file = SequenceFile::open(temp.path()).unwrap();

    assert_eq!(file.path(), temp.path());
    assert_eq!(file.size(), 32 + 40 * 48);
    assert_eq!(file.header().unwrap().frame_count, 40);

    let report = file.validate(&Validator::default()).unwrap();
    assert_eq!(report.command_count, 4);
    assert_eq!(report.duration_secs, 1.0);
}

#[test]
fn empty_file_is_truncated() {
    let temp = write_temp(&[]);
    let error = validate_file(temp.path(), &Validator::default()).unwrap_err();
    assert!(matches!(
        error,
        Error::Validation(FseqError::TruncatedData { required: 22, actual: 0 })
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let error = SequenceFile::open(dir.path().join("nope.fseq")).err().unwrap();
    assert!(matches!(error, Error::Io { .. }));
    assert!(!error.is_rejection());
}

#[test]
fn header_of_rejected_file_is_readable() {
    let bytes = SequenceBuilder::new()
        .compression_type(1)
        .frame(&[0; 30], &[0; 16])
        .build();
    let temp = write_temp(&bytes);
    let file = SequenceFile::open(temp.path()).unwrap();

    let header = file.header().unwrap();
    assert_eq!(header.compression_type, 1);
    assert_eq!(
        file.validate(&Validator::default()).unwrap_err().to_string(),
        "Expected file format to be V2 uncompressed, got zstd"
    );
}

#[test]
fn config_file_changes_limits() {
    let config = write_temp(br#"{"limits": {"max_duration_secs": 1}}"#);
    let config = ValidatorConfig::from_file(config.path()).unwrap();
    assert_eq!(config.server, Default::default());

    // 41 frames x 25 ms = 1.025 s
    let temp = write_temp(&blank_show(41));
    let error = validate_file(temp.path(), &config.validator()).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Expected total duration to be at most 1 seconds, got 00:00:01.025"
    );
}

#[test]
fn upload_response_json_shape() {
    let bytes = blank_show(2);
    let response =
        UploadResponse::from_outcome("show.fseq", &bytes, &fseq::validate(&bytes));
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["valid"], true);
    assert_eq!(json["file"]["name"], "show.fseq");
    assert_eq!(json["file"]["size"], bytes.len());
    assert_eq!(json["file"]["md5"].as_str().unwrap().len(), 32);
    assert_eq!(json["validation"]["frameCount"], 2);
    assert_eq!(json["validation"]["stepTimeMs"], 25);
    assert_eq!(json["validation"]["durationSecs"], 0.05);
    assert_eq!(json["validation"]["commandCount"], 4);
    assert!(json.get("error").is_none());
    assert!(json.get("errorKind").is_none());

    let html = response.to_html();
    assert!(html.contains("show.fseq is valid"));
    assert!(html.contains("Frames: 2"));
    assert!(html.contains("Memory usage: 0.59%"));
}

#[test]
fn rejected_response_json_shape() {
    let bytes = SequenceBuilder::new()
        .channel_count(512)
        .frame(&[0; 30], &[0; 16])
        .build();
    let response = UploadResponse::from_outcome("big.fseq", &bytes, &fseq::validate(&bytes));
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["valid"], false);
    assert_eq!(json["error"], "Expected 48 channels, got 512");
    assert_eq!(json["errorKind"], "ChannelCountError");
    assert!(json.get("validation").is_none());
}
