/*!
 * Tests for the async controller entry points
 */

use anyhow::Result;
use std::fs;
use subcensor::app_controller::{Controller, FileOutcome, FolderSummary};
use crate::common;

/// Test a single-file run writes its outputs
#[tokio::test]
async fn test_run_withSubtitleFile_shouldProcessIt() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "film.srt")?;
    let controller = Controller::with_config(subcensor::Config::default())?;

    let outcome = controller.run(input, None, false).await?;

    assert!(matches!(outcome, FileOutcome::Processed(_)));
    assert!(temp_dir.path().join("film_SL.srt").exists());
    assert!(temp_dir.path().join("film_mute.json").exists());
    Ok(())
}

/// Test existing outputs are kept unless overwriting is forced
#[tokio::test]
async fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "film.srt")?;
    let output = common::create_test_file(temp_dir.path(), "film_SL.srt", "old")?;
    let controller = Controller::with_config(common::subtitles_only_config())?;

    let skipped = controller.run(input.clone(), None, false).await?;
    assert!(matches!(skipped, FileOutcome::Skipped(_)));
    assert_eq!(fs::read_to_string(&output)?, "old");

    let forced = controller.run(input, None, true).await?;
    assert!(matches!(forced, FileOutcome::Processed(_)));
    assert_ne!(fs::read_to_string(&output)?, "old");
    Ok(())
}

/// Test running on a path that does not exist
#[test]
fn test_run_withMissingInput_shouldFail() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(subcensor::Config::default())?;

    let result = tokio_test::block_on(async {
        controller.run(temp_dir.path().join("nope.srt"), None, false).await
    });

    assert!(result.is_err());
    Ok(())
}

/// Test an invalid configuration is rejected up front
#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let mut config = subcensor::Config::default();
    config.regex.enabled = true;
    assert!(Controller::with_config(config).is_err());
}

/// Test a folder run counts processed, failed and skipped files
#[tokio::test]
async fn test_run_folder_withMixedFiles_shouldContinuePastFailures() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "one.srt")?;
    common::create_test_subtitle(temp_dir.path(), "season/two.srt")?;
    fs::write(temp_dir.path().join("broken.srt"), [0xff, 0xfe, 0x00, 0xd8])?;

    let controller = Controller::with_config(common::subtitles_only_config())?;

    let first = controller.run_folder(temp_dir.path().to_path_buf(), None, false).await?;
    assert_eq!(
        first,
        FolderSummary {
            processed: 2,
            skipped: 0,
            failed: 1,
            intervals: 2,
        }
    );
    assert!(temp_dir.path().join("season").join("two_SL.srt").exists());

    // Generated "_SL" files are not picked up as inputs on the second pass.
    let second = controller.run_folder(temp_dir.path().to_path_buf(), None, false).await?;
    assert_eq!((second.processed, second.skipped, second.failed), (0, 2, 1));
    Ok(())
}

/// Test an empty folder is not an error
#[tokio::test]
async fn test_run_folder_withNoSubtitles_shouldReturnEmptySummary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(subcensor::Config::default())?;

    let summary = controller.run_folder(temp_dir.path().to_path_buf(), None, false).await?;

    assert_eq!(summary, FolderSummary::default());
    Ok(())
}

/// Test an output directory keeps the input's subfolders apart
#[tokio::test]
async fn test_run_folder_withOutputDirAndSameStems_shouldKeepSubfolders() -> Result<()> {
    common::init_test_logging();
    let input_dir = common::create_temp_dir()?;
    let output_dir = common::create_temp_dir()?;
    common::create_test_subtitle(input_dir.path(), "a/film.srt")?;
    common::create_test_file(
        input_dir.path(),
        "b/film.srt",
        "1\n00:00:01,000 --> 00:00:02,000\nNothing to see here.\n",
    )?;

    let controller = Controller::with_config(subcensor::Config::default())?;
    let summary = controller
        .run_folder(
            input_dir.path().to_path_buf(),
            Some(output_dir.path().to_path_buf()),
            false,
        )
        .await?;

    assert_eq!((summary.processed, summary.skipped, summary.failed), (2, 0, 0));
    let a_out = fs::read_to_string(output_dir.path().join("a").join("film_SL.srt"))?;
    let b_out = fs::read_to_string(output_dir.path().join("b").join("film_SL.srt"))?;
    assert!(a_out.contains("Well, ****"));
    assert!(b_out.contains("Nothing to see here."));
    assert!(output_dir.path().join("a").join("film_mute.json").exists());
    assert!(output_dir.path().join("b").join("film_mute.json").exists());
    assert!(!output_dir.path().join("film_SL.srt").exists());
    Ok(())
}

/// Test inputs that would write the same embedded output are not run twice
#[tokio::test]
async fn test_run_folder_withCollidingEmbedOutputs_shouldFailDuplicates() -> Result<()> {
    common::init_test_logging();
    let input_dir = common::create_temp_dir()?;
    let stem = format!(
        "collide_{}",
        input_dir.path().file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
    );
    common::create_test_subtitle(input_dir.path(), &format!("a/{}.srt", stem))?;
    common::create_test_subtitle(input_dir.path(), &format!("b/{}.srt", stem))?;

    let mut config = common::subtitles_only_config();
    config.output.embed_subtitles = true;
    let controller = Controller::with_config(config)?;

    let summary = controller.run_folder(input_dir.path().to_path_buf(), None, false).await?;

    let embedded = std::env::temp_dir().join(format!("{}_SL.srt", stem));
    let written = embedded.exists();
    let _ = fs::remove_file(&embedded);

    assert_eq!((summary.processed, summary.skipped, summary.failed), (1, 0, 1));
    assert!(written);
    Ok(())
}

/// Test embedding writes to the temp directory and nothing next to the input
#[tokio::test]
async fn test_run_withEmbedSubtitles_shouldWriteToTempDirOnly() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let stem = format!(
        "embed_{}",
        temp_dir.path().file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
    );
    let input = common::create_test_subtitle(temp_dir.path(), &format!("{}.srt", stem))?;

    let mut config = common::subtitles_only_config();
    config.output.embed_subtitles = true;
    let controller = Controller::with_config(config)?;

    let outcome = controller.run(input, None, false).await?;

    let embedded = std::env::temp_dir().join(format!("{}_SL.srt", stem));
    let content = fs::read_to_string(&embedded);
    let _ = fs::remove_file(&embedded);

    let FileOutcome::Processed(summary) = outcome else {
        panic!("expected the file to be processed");
    };
    assert_eq!(summary.outputs, vec![embedded]);
    assert!(content?.contains("Well, ****"));
    let beside_input: Vec<_> = fs::read_dir(temp_dir.path())?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| name.ends_with("_SL.srt"))
        .collect();
    assert!(beside_input.is_empty(), "unexpected outputs: {:?}", beside_input);
    Ok(())
}
