//! End-to-end: raw SDL response body to domain accessions

use std::collections::HashSet;

use sdl_core::sdl::{self, SDL_VERSION};
use sdl_core::{PayloadError, ValidationError};

fn requested() -> HashSet<String> {
    ["SRR000001".to_string()].into_iter().collect()
}

const VALID: &str = r#"{
    "version": "2",
    "result": [
        {
            "bundle": "SRR000001",
            "status": 200,
            "msg": "ok",
            "files": [
                {
                    "name": "a.bam",
                    "size": 52428800,
                    "type": "bam",
                    "modificationDate": "2019-03-05T16:20:11Z",
                    "md5": "9e107d9d372bb6826bd81d3542a419d6",
                    "locations": [
                        {
                            "link": "https://sra-pub-src-1.s3.amazonaws.com/SRR000001/a.bam",
                            "service": "s3",
                            "region": "us-east-1",
                            "expirationDate": "2026-10-20T00:00:00Z",
                            "bucket": "sra-pub-src-1",
                            "key": "SRR000001/a.bam"
                        }
                    ]
                }
            ]
        }
    ]
}"#;

#[test]
fn test_valid_response_transfigures() {
    let envelope = sdl::parse_response(VALID.as_bytes()).unwrap();
    let accessions = sdl::transfigure_response(envelope, SDL_VERSION, &requested()).unwrap();

    assert_eq!(accessions.len(), 1);
    let acc = &accessions[0];
    assert_eq!(acc.id, "SRR000001");
    assert_eq!(acc.files.len(), 1);

    let file = &acc.files["a.bam"];
    assert_eq!(file.file_type, "bam");
    assert_eq!(file.size, 52428800);
    assert_eq!(file.md5_hash, "9e107d9d372bb6826bd81d3542a419d6");
    assert_eq!(
        file.link,
        "https://sra-pub-src-1.s3.amazonaws.com/SRR000001/a.bam"
    );
    assert_eq!(file.service, "s3");
    assert_eq!(file.region, "us-east-1");
    assert!(file.modified_date.is_some());
}

#[test]
fn test_unrequested_rejected_before_files() {
    // The file is invalid too; the accession id must be reported instead.
    let body = r#"{
        "version": "2",
        "result": [
            {"bundle": "SRR999999", "status": 200, "files": [{"name": "", "type": ""}]}
        ]
    }"#;

    let envelope = sdl::parse_response(body.as_bytes()).unwrap();
    let err = sdl::transfigure_response(envelope, SDL_VERSION, &requested()).unwrap_err();

    assert_eq!(
        err,
        ValidationError::UnrequestedAccession {
            id: "SRR999999".to_string()
        }
    );
}

#[test]
fn test_wrong_version_rejected() {
    let body = VALID.replacen(r#""version": "2""#, r#""version": "1.2""#, 1);

    let envelope = sdl::parse_response(body.as_bytes()).unwrap();
    let err = sdl::transfigure_response(envelope, SDL_VERSION, &requested()).unwrap_err();

    assert!(matches!(err, ValidationError::VersionMismatch { .. }));
    assert!(err.to_string().contains("1.2"));
}

#[test]
fn test_empty_result_rejected() {
    let envelope = sdl::parse_response(br#"{"version": "2", "result": []}"#).unwrap();
    let err = sdl::transfigure_response(envelope, SDL_VERSION, &requested()).unwrap_err();

    assert!(matches!(err, ValidationError::EmptyResult { .. }));
}

#[test]
fn test_file_without_location_is_accepted() {
    let body = r#"{
        "version": "2",
        "result": [
            {"bundle": "SRR000001", "status": 200, "files": [{"name": "a.sra", "type": "sra"}]}
        ]
    }"#;

    let envelope = sdl::parse_response(body.as_bytes()).unwrap();
    let accessions = sdl::transfigure_response(envelope, SDL_VERSION, &requested()).unwrap();

    let file = &accessions[0].files["a.sra"];
    assert!(file.link.is_empty());
    assert!(file.service.is_empty());
    assert!(file.region.is_empty());
}

#[test]
fn test_api_error_body() {
    let err = sdl::parse_response(br#"{"status": 500, "message": "internal error"}"#).unwrap_err();
    assert!(matches!(err, PayloadError::Api { status: 500, .. }));
}

#[test]
fn test_null_files_keep_upstream_status() {
    let body = br#"{"version":"2","result":[{"bundle":"SRR000001","status":404,"msg":"run not found","files":null}]}"#;

    let envelope = sdl::parse_response(body).unwrap();
    let err = sdl::transfigure_response(envelope, SDL_VERSION, &requested()).unwrap_err();

    assert_eq!(
        err,
        ValidationError::Status {
            id: "SRR000001".to_string(),
            status: 404,
            message: "run not found".to_string(),
        }
    );
}

#[test]
fn test_null_locations_mean_no_location() {
    let body = br#"{"version":"2","result":[{"bundle":"SRR000001","status":200,"msg":null,
        "files":[{"name":"a.sra","type":"sra","md5":null,"locations":null}]}]}"#;

    let envelope = sdl::parse_response(body).unwrap();
    let accessions = sdl::transfigure_response(envelope, SDL_VERSION, &requested()).unwrap();

    let file = &accessions[0].files["a.sra"];
    assert!(!file.has_location());
    assert!(file.md5_hash.is_empty());
}
