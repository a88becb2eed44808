/*!
 * Tests for detection and censoring through the public filtering API
 */

use std::path::Path;
use subcensor::app_config::{Config, RegexFilterConfig};
use subcensor::filtering::{Interval, MuteReport, ProfanityDetector, SubtitleRewriter, SubtitleVariant};
use subcensor::subtitle_processor::{SubtitleCollection, SubtitleEntry};

fn entry(seq: usize, start: u64, end: u64, text: &str) -> SubtitleEntry {
    SubtitleEntry::new(seq, start, end, text.to_string())
}

fn rewriter_for(detector: &ProfanityDetector) -> SubtitleRewriter {
    SubtitleRewriter::new(detector.words().clone(), detector.regex().cloned())
}

/// Test the default word list flags whole entries
#[test]
fn test_detector_withDefaultConfig_shouldFlagFullWordEntries() {
    let detector = ProfanityDetector::from_config(&Config::default());
    let annotated = detector.annotate(&[
        entry(1, 1_000, 2_000, "Well, damn it."),
        entry(2, 3_000, 4_000, "First class service"),
    ]);

    assert!(annotated[0].remove_flag);
    assert_eq!(annotated[0].remove_intervals, vec![Interval::new(1_000, 2_000)]);
    assert!(!annotated[1].remove_flag);
}

/// Test single-word mode configured through the config file structure
#[test]
fn test_detector_withSingleWordConfig_shouldPadAroundOccurrence() {
    let mut config = Config::default();
    config.words.single = vec!["Hell".to_string()];
    config.single_word.enabled = true;

    let detector = ProfanityDetector::from_config(&config);
    // "hell" starts at char 3 of 10; midpoint 5 maps to 1000ms of 2000ms.
    let annotated = detector.annotate_entry(&entry(1, 0, 2_000, "Oh hell no"));

    assert!(annotated.remove_flag);
    assert_eq!(annotated.remove_intervals, vec![Interval::new(500, 1_500)]);
}

/// Test the standard regex filter matches whole lines containing a word
#[test]
fn test_detector_withDefaultRegexConfig_shouldMatchEmbeddedWords() {
    let mut config = Config::default();
    config.regex = RegexFilterConfig::create_default();

    let detector = ProfanityDetector::from_config(&config);
    let annotated = detector.annotate_entry(&entry(1, 0, 1_000, "First class service"));

    assert!(annotated.remove_flag);
    assert_eq!(annotated.remove_intervals, vec![Interval::new(0, 1_000)]);
}

/// Test that disabled regex filtering is ignored even with patterns
#[test]
fn test_detector_withRegexDisabled_shouldNotBuildProcessor() {
    let mut config = Config::default();
    config.regex = RegexFilterConfig::create_default();
    config.regex.enabled = false;

    assert!(ProfanityDetector::from_config(&config).regex().is_none());
}

/// Test censoring with the same lists the detector uses
#[test]
fn test_rewriter_withDetectorLists_shouldMaskFlaggedWords() {
    let detector = ProfanityDetector::from_config(&Config::default());
    let rewriter = rewriter_for(&detector);

    let annotated = detector.annotate(&[
        entry(1, 0, 1_000, "Hello"),
        entry(2, 1_000, 2_000, "Well, damn it.\nShit!"),
    ]);
    let censored = rewriter.censor_entries(&annotated);

    assert_eq!(censored[0].text, "Hello");
    assert_eq!(censored[1].text, "Well, **** it.\n****!");
    assert!(censored[1].remove_flag);
}

/// Test exclusive output keeps timing for every entry
#[test]
fn test_rewriter_exclusive_shouldKeepAllTimings() {
    let detector = ProfanityDetector::from_config(&Config::default());
    let rewriter = rewriter_for(&detector);
    let input = vec![
        entry(1, 0, 1_000, "Hello"),
        entry(2, 1_000, 2_000, "damn"),
        entry(3, 2_000, 3_000, "Bye"),
    ];

    let censored = rewriter.censor_entries(&detector.annotate(&input));
    let srt = SubtitleRewriter::render(&censored, SubtitleVariant::Exclusive);
    let reparsed = SubtitleCollection::parse_srt_string(&srt);

    assert_eq!(reparsed.len(), input.len());
    for (original, written) in input.iter().zip(&reparsed) {
        assert_eq!(original.start_time_ms, written.start_time_ms);
        assert_eq!(original.end_time_ms, written.end_time_ms);
    }
    assert_eq!(reparsed[1].text, "****");
}

/// Test the mute report merges neighbouring entries
#[test]
fn test_mute_report_withAdjacentFlaggedEntries_shouldMerge() {
    let detector = ProfanityDetector::from_config(&Config::default());
    let annotated = detector.annotate(&[
        entry(1, 0, 1_000, "damn"),
        entry(2, 1_000, 2_000, "shit"),
        entry(3, 5_000, 6_000, "fine"),
    ]);

    let report = MuteReport::from_entries(Path::new("film.srt"), &annotated, None);

    assert_eq!(report.flagged_entries, 2);
    assert_eq!(report.intervals, vec![Interval::new(0, 2_000)]);
}

/// Test single-word muting and censoring agree on which occurrences count
#[test]
fn test_single_word_mode_withEmbeddedOccurrence_shouldMuteOnlyWhatIsCensored() {
    let mut config = Config::default();
    config.words.full = Vec::new();
    config.words.single = vec!["ass".to_string()];
    config.single_word.enabled = true;

    let detector = ProfanityDetector::from_config(&config);
    let rewriter = rewriter_for(&detector);
    let annotated = detector.annotate(&[
        entry(1, 10_000, 12_000, "first class ass"),
        entry(2, 13_000, 15_000, "ass, first class"),
    ]);
    let censored = rewriter.censor_entries(&annotated);

    assert!(!annotated[0].remove_flag);
    assert!(annotated[0].remove_intervals.is_empty());
    assert_eq!(censored[0].text, "first class ass");

    assert!(annotated[1].remove_flag);
    assert_eq!(annotated[1].remove_intervals.len(), 1);
    assert_eq!(censored[1].text, "***, first class");
}
