/*!
 * End-to-end censoring of subtitle files through the synchronous pipeline
 */

use anyhow::Result;
use std::fs;
use subcensor::app_config::SubtitlesType;
use subcensor::app_controller::{Controller, FileOutcome};
use subcensor::filtering::{Interval, MuteReport};
use subcensor::subtitle_processor::SubtitleCollection;
use crate::common;

/// Test the default normal output of a sample file
#[test]
fn test_process_file_withDefaultConfig_shouldWriteCensoredCopyAndReport() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "sample.srt")?;
    let controller = Controller::with_config(subcensor::Config::default())?;

    let outcome = controller.process_file(&input, None, false)?;
    let FileOutcome::Processed(summary) = outcome else {
        panic!("expected the file to be processed");
    };

    assert_eq!(summary.entries, 3);
    assert_eq!(summary.flagged_entries, 1);
    assert_eq!(summary.outputs, vec![temp_dir.path().join("sample_SL.srt")]);

    let censored = SubtitleCollection::read_from_file(temp_dir.path().join("sample_SL.srt"))?;
    assert_eq!(censored.entries.len(), 3);
    assert_eq!(censored.entries[0].text, "This is a test subtitle.");
    assert_eq!(censored.entries[1].text, "Well, **** it.");

    let report_path = summary.report_path.expect("mute report path");
    let report: MuteReport = serde_json::from_str(&fs::read_to_string(report_path)?)?;
    assert_eq!(report.intervals, vec![Interval::new(5_000, 9_000)]);
    Ok(())
}

/// Test a clean file comes out unchanged apart from line endings
#[test]
fn test_process_file_withNoMatches_shouldWriteInputUnchanged() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let content = "1\r\n00:00:01,000 --> 00:00:02,500\r\nGood morning.\r\n\r\n\
                   2\r\n00:00:03,000 --> 00:00:04,000\r\nGeneral Kenobi.\r\nYou are a bold one.\r\n\r\n";
    let input = common::create_test_file(temp_dir.path(), "clean.srt", content)?;
    let controller = Controller::with_config(common::subtitles_only_config())?;

    let FileOutcome::Processed(summary) = controller.process_file(&input, None, false)? else {
        panic!("expected the file to be processed");
    };

    assert_eq!(summary.flagged_entries, 0);
    assert!(summary.report.intervals.is_empty());
    let written = fs::read_to_string(temp_dir.path().join("clean_SL.srt"))?;
    assert_eq!(written, content.replace("\r\n", "\n"));
    Ok(())
}

/// Test that both variants are written with their tags
#[test]
fn test_process_file_withBothType_shouldWriteNormalAndExclusive() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "sample.srt")?;
    let output_dir = temp_dir.path().join("out");

    let mut config = common::subtitles_only_config();
    config.output.subtitles_type = SubtitlesType::Both;
    let controller = Controller::with_config(config)?;

    controller.process_file(&input, Some(&output_dir), false)?;

    let normal = SubtitleCollection::read_from_file(output_dir.join("sample_Normal_SL.srt"))?;
    let exclusive = SubtitleCollection::read_from_file(output_dir.join("sample_Exclusive_SL.srt"))?;

    assert_eq!(normal.entries[0].text, "This is a test subtitle.");
    assert_eq!(exclusive.entries.len(), normal.entries.len());
    assert_eq!(exclusive.entries[0].text, " ");
    assert_eq!(exclusive.entries[1].text, "Well, **** it.");
    assert_eq!(exclusive.entries[2].text, " ");
    assert!(!output_dir.join("sample_mute.json").exists());
    Ok(())
}

/// Test that re-running over a censored file changes nothing
#[test]
fn test_process_file_onCensoredOutput_shouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "sample.srt")?;

    let mut config = common::subtitles_only_config();
    config.output.custom_affix = "_once".to_string();
    let first = Controller::with_config(config.clone())?;
    first.process_file(&input, None, false)?;
    let once = fs::read_to_string(temp_dir.path().join("sample_once.srt"))?;

    config.output.custom_affix = "_twice".to_string();
    let second = Controller::with_config(config)?;
    second.process_file(&temp_dir.path().join("sample_once.srt"), None, false)?;
    let twice = fs::read_to_string(temp_dir.path().join("sample_once_twice.srt"))?;

    assert_eq!(once, twice);
    Ok(())
}

/// Test single-word mode keeps unflagged lines and pads the word
#[test]
fn test_process_file_withSingleWordMode_shouldReportPaddedInterval() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "single.srt",
        "1\n00:00:10,000 --> 00:00:12,000\nOh hell no\n\n2\n00:00:13,000 --> 00:00:14,000\nFine\n",
    )?;

    let mut config = subcensor::Config::default();
    config.words.single = vec!["hell".to_string()];
    config.single_word.enabled = true;
    let controller = Controller::with_config(config)?.with_dry_run(true);

    let FileOutcome::Processed(summary) = controller.process_file(&input, None, false)? else {
        panic!("expected the file to be processed");
    };

    assert_eq!(summary.report.intervals, vec![Interval::new(10_500, 11_500)]);
    assert!(summary.outputs.is_empty());
    assert!(!temp_dir.path().join("single_SL.srt").exists());
    Ok(())
}
