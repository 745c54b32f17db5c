/*!
 * Tests for pipeline orchestration: path derivation, scratch cleanup,
 * cancellation, and failure behavior
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use subburn::errors::PipelineError;
use subburn::pipeline::{
    backup_existing, default_burn_output_path, scratch_audio_path, transformed_subtitle_path,
    BurnOptions, CancellationFlag, GenerateRequest, Pipeline, ProgressReporter, ScratchTracker,
    Stage,
};
use subburn::text_transform::TransformOptions;
use subburn::transcribe::{EngineManager, ModelKind};

use crate::common;

fn test_pipeline(cache_dir: &Path) -> Pipeline {
    Pipeline::new(Arc::new(EngineManager::new(cache_dir.to_path_buf())))
}

/// Files in a directory whose name contains the given fragment
fn files_containing(dir: &Path, fragment: &str) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.file_name().unwrap().to_string_lossy().contains(fragment))
        .collect()
}

#[test]
fn test_scratch_audio_path_withRunId_shouldDeriveFromVideoPath() {
    let path = scratch_audio_path(Path::new("/videos/movie.mp4"), "abc123");
    assert_eq!(path, PathBuf::from("/videos/movie_temp.abc123.wav"));
}

#[test]
fn test_scratch_audio_path_withDifferentRunIds_shouldNotCollide() {
    let video = Path::new("/videos/movie.mp4");
    assert_ne!(
        scratch_audio_path(video, "run1"),
        scratch_audio_path(video, "run2")
    );
}

#[test]
fn test_transformed_subtitle_path_withRunId_shouldDeriveFromSubtitlePath() {
    let path = transformed_subtitle_path(Path::new("/videos/movie.srt"), "abc123");
    assert_eq!(path, PathBuf::from("/videos/movie_modified.abc123.srt"));
}

#[test]
fn test_default_burn_output_path_withVideo_shouldAppendSubbedSuffix() {
    let path = default_burn_output_path(Path::new("/videos/movie.mp4"));
    assert_eq!(path, PathBuf::from("/videos/movie_subbed.mp4"));
}

#[test]
fn test_backup_existing_withPresentFile_shouldCopyToBakSibling() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movie.srt");
    fs::write(&path, "original content").unwrap();

    backup_existing(&path);

    let backup = dir.path().join("movie.srt.bak");
    assert_eq!(fs::read_to_string(&backup).unwrap(), "original content");
    assert_eq!(fs::read_to_string(&path).unwrap(), "original content");
}

#[test]
fn test_backup_existing_withMissingFile_shouldDoNothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.srt");

    backup_existing(&path);
    assert!(!dir.path().join("missing.srt.bak").exists());
}

#[test]
fn test_scratch_tracker_withRegisteredFiles_shouldRemoveOnlyThose() {
    let dir = tempfile::tempdir().unwrap();
    let tracked = dir.path().join("tracked.wav");
    let untracked = dir.path().join("untracked.srt");
    fs::write(&tracked, "x").unwrap();
    fs::write(&untracked, "y").unwrap();

    let mut scratch = ScratchTracker::new();
    scratch.register(tracked.clone());
    scratch.cleanup();

    assert!(!tracked.exists());
    assert!(untracked.exists());
}

#[test]
fn test_cancellation_flag_withCancelCall_shouldReport() {
    let flag = CancellationFlag::new();
    assert!(!flag.is_cancelled());
    flag.cancel();
    assert!(flag.is_cancelled());
}

#[tokio::test]
async fn test_generate_withCancelledRun_shouldStopBeforeAnyStage() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = test_pipeline(dir.path());
    pipeline.cancellation_flag().cancel();

    let request = GenerateRequest {
        video_path: dir.path().join("movie.mp4"),
        subtitle_path: dir.path().join("movie.srt"),
        model: ModelKind::Base,
        language: None,
    };

    let result = pipeline
        .generate_subtitles(&request, &ProgressReporter::none())
        .await;
    assert!(matches!(result, Err(PipelineError::Cancelled)));
    assert!(!request.subtitle_path.exists());
}

#[tokio::test]
async fn test_burn_withUnreadableVideo_shouldFailAndRemoveIntermediate() {
    let dir = tempfile::tempdir().unwrap();

    // A video file ffmpeg cannot read, and a valid subtitle file
    let video_path = dir.path().join("movie.mp4");
    fs::write(&video_path, "not actually a video").unwrap();
    let subtitle_path = dir.path().join("movie.srt");
    common::sample_document().write_to_file(&subtitle_path).unwrap();

    let pipeline = test_pipeline(dir.path());
    let options = BurnOptions {
        transform: TransformOptions {
            uppercase: true,
            word_by_word: false,
        },
        ..BurnOptions::default()
    };

    let result = pipeline
        .burn(&video_path, &subtitle_path, &options, &ProgressReporter::none())
        .await;
    assert!(result.is_err());

    // The transformed intermediate this run created must be gone, while the
    // source subtitle file survives
    assert!(files_containing(dir.path(), "_modified.").is_empty());
    assert!(subtitle_path.exists());
    assert!(files_containing(dir.path(), ".wav").is_empty());
}

#[tokio::test]
async fn test_translate_withMockProvider_shouldWriteSuffixedFileAndReportProgress() {
    let dir = tempfile::tempdir().unwrap();
    let subtitle_path = dir.path().join("movie.srt");
    let doc = common::sample_document();
    doc.write_to_file(&subtitle_path).unwrap();

    let pipeline = test_pipeline(dir.path());
    let provider = subburn::providers::MockProvider::working();
    let (progress, mut rx) = ProgressReporter::channel();

    let output = pipeline
        .translate(&subtitle_path, "en", "it", &provider, &progress)
        .await
        .unwrap();
    drop(progress);

    assert_eq!(output, dir.path().join("movie_it.srt"));
    // Input file is untouched
    assert_eq!(
        fs::read_to_string(&subtitle_path).unwrap(),
        doc.serialize()
    );

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    assert_eq!(events.first().map(|e| e.stage), Some(Stage::Translating));
    assert_eq!(events.last().map(|e| (e.stage, e.percent)), Some((Stage::Done, 100)));
}
