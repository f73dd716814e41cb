//! Integration tests for the split pipeline building blocks

use std::fs::{self, File};
use std::path::Path;

use tempfile::TempDir;

use splitx_cli::error::SplitXError;
use splitx_cli::{compute_crop, package, plan, EncodeSpec, SplitRequest};

// Test utilities

/// Write a fake staged segment file (real encoding is exercised separately)
fn stage_fake_segment(dir: &Path, index: usize, captions: bool) {
    let stem = format!("segment{}", index + 1);
    fs::write(dir.join(format!("{stem}.mp4")), b"fake segment data").unwrap();
    if captions {
        File::create(dir.join(format!("{stem}.txt"))).unwrap();
    }
}

fn default_encode_spec() -> EncodeSpec {
    EncodeSpec {
        width: 848,
        height: 480,
        fps: 30,
        preset: "medium".to_string(),
        bitrate_kbps: 5000,
    }
}

// Planning scenarios

#[test]
fn test_plan_three_whole_segments() {
    // 7.5s source at 2.5s per segment: three segments, no remainder
    let plan = plan(7.5, 2.5).unwrap();

    assert_eq!(plan.count(), 3);
    let stems: Vec<String> = plan.segments.iter().map(|s| s.file_stem()).collect();
    assert_eq!(stems, ["segment1", "segment2", "segment3"]);
    assert_eq!(
        plan.segments
            .iter()
            .map(|s| (s.start, s.end))
            .collect::<Vec<_>>(),
        [(0.0, 2.5), (2.5, 5.0), (5.0, 7.5)]
    );
}

#[test]
fn test_plan_trailing_remainder_dropped() {
    // 4.0s source: one 2.5s segment, trailing 1.5s silently dropped
    let plan = plan(4.0, 2.5).unwrap();

    assert_eq!(plan.count(), 1);
    assert_eq!(plan.segments[0].start, 0.0);
    assert_eq!(plan.segments[0].end, 2.5);
}

#[test]
fn test_plan_too_short_source() {
    let err = plan(1.0, 2.5).unwrap_err();

    assert!(matches!(err, SplitXError::TooShort { .. }));
    assert_eq!(err.to_string(), "Video too short (1.0s < 2.5s)");
}

// Crop geometry scenarios

#[test]
fn test_crop_full_hd_to_848x480() {
    // 1920x1080 is relatively wider than 848:480, so the width is cropped
    // to round(1080 * 848/480) = 1908 with a 6px margin on each side
    let rect = compute_crop(1920, 1080, 848, 480).unwrap();

    assert_eq!((rect.x, rect.y, rect.width, rect.height), (6, 0, 1908, 1080));
}

#[test]
fn test_crop_shared_by_all_segments() {
    // The crop is a pure function of the source dimensions; repeated calls
    // for each segment of one run must agree exactly
    let per_segment: Vec<_> = (0..5)
        .map(|_| compute_crop(1280, 720, 848, 480).unwrap())
        .collect();

    assert!(per_segment.windows(2).all(|pair| pair[0] == pair[1]));
}

// Packaging

#[test]
fn test_archive_contains_two_entries_per_segment_with_captions() {
    let staging = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let archive_path = out_dir.path().join("processed_videos.zip");

    for index in 0..3 {
        stage_fake_segment(staging.path(), index, true);
    }

    package::write_archive(staging.path(), &archive_path).unwrap();

    let archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    assert_eq!(archive.len(), 6);

    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        [
            "segment1.mp4",
            "segment1.txt",
            "segment2.mp4",
            "segment2.txt",
            "segment3.mp4",
            "segment3.txt",
        ]
    );
}

#[test]
fn test_archive_contains_one_entry_per_segment_without_captions() {
    let staging = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let archive_path = out_dir.path().join("processed_videos.zip");

    for index in 0..4 {
        stage_fake_segment(staging.path(), index, false);
    }

    package::write_archive(staging.path(), &archive_path).unwrap();

    let archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    assert_eq!(archive.len(), 4);
    assert!(archive.file_names().all(|name| name.ends_with(".mp4")));
}

#[test]
fn test_archive_entries_are_flat() {
    let staging = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let archive_path = out_dir.path().join("out.zip");

    stage_fake_segment(staging.path(), 0, true);
    package::write_archive(staging.path(), &archive_path).unwrap();

    let archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    assert!(archive.file_names().all(|name| !name.contains('/')));
}

#[test]
fn test_archive_round_trips_content() {
    let staging = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let archive_path = out_dir.path().join("out.zip");

    fs::write(staging.path().join("segment1.mp4"), b"fake segment data").unwrap();
    package::write_archive(staging.path(), &archive_path).unwrap();

    let mut archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    let mut entry = archive.by_name("segment1.mp4").unwrap();
    let mut content = Vec::new();
    std::io::Read::read_to_end(&mut entry, &mut content).unwrap();
    assert_eq!(content, b"fake segment data");
}

#[test]
fn test_archive_failure_is_packaging_error() {
    let staging = TempDir::new().unwrap();
    stage_fake_segment(staging.path(), 0, false);

    // Unwritable archive destination
    let err = package::write_archive(staging.path(), Path::new("/nonexistent/dir/out.zip"))
        .unwrap_err();

    assert!(matches!(err, SplitXError::Packaging { .. }));
}

// Pipeline failure surface

#[test]
fn test_run_missing_input_produces_no_archive() {
    let out_dir = TempDir::new().unwrap();
    let archive_path = out_dir.path().join("out.zip");

    let request = SplitRequest {
        input: out_dir.path().join("missing.mp4"),
        target_duration: 2.5,
        encode: default_encode_spec(),
        create_captions: false,
        output: archive_path.clone(),
    };

    let result = splitx_cli::pipeline::run(&request);

    assert!(matches!(result, Err(SplitXError::InputFileNotFound { .. })));
    assert!(!archive_path.exists());
}

#[test]
fn test_run_unreadable_input_is_decode_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("garbage.mp4");
    fs::write(&input, b"not a real video file").unwrap();

    splitx_cli::init().unwrap();

    let request = SplitRequest {
        input,
        target_duration: 2.5,
        encode: default_encode_spec(),
        create_captions: false,
        output: dir.path().join("out.zip"),
    };

    let result = splitx_cli::pipeline::run(&request);

    assert!(matches!(result, Err(SplitXError::Decode { .. })));
    assert!(!dir.path().join("out.zip").exists());
}

// End-to-end (requires a real video file)

#[test]
#[ignore] // Requires a real decodable sample video
fn test_full_split_workflow() {
    let input = Path::new("sample video.mp4");
    if !input.exists() {
        return;
    }

    splitx_cli::init().unwrap();

    let out_dir = TempDir::new().unwrap();
    let archive_path = out_dir.path().join("processed_videos.zip");

    let request = SplitRequest {
        input: input.to_path_buf(),
        target_duration: 2.5,
        encode: default_encode_spec(),
        create_captions: true,
        output: archive_path.clone(),
    };

    let archive = splitx_cli::pipeline::run(&request).unwrap();
    assert!(archive.exists());

    let archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    assert!(archive.len() >= 2);
    assert_eq!(archive.len() % 2, 0); // one sidecar per segment
}
