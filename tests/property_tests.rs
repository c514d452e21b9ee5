//! Property-based tests for verbosity_logger using proptest

use proptest::prelude::*;
use verbosity_logger::prelude::*;

fn capture(style: LevelStyle, threshold: Level) -> (Logger, MemorySink) {
    let out = MemorySink::new();
    let logger = Logger::builder()
        .level_style(style)
        .threshold(threshold)
        .sink(SharedStream::new(out.clone()))
        .build()
        .unwrap();
    (logger, out)
}

// ============================================================================
// Filtering laws
// ============================================================================

proptest! {
    /// Levels style: emitted iff level is 0 or within the threshold
    #[test]
    fn test_levels_filter_law(threshold in 0i64..64, level in 0i64..64) {
        let (mut logger, out) = capture(LevelStyle::Levels, threshold);
        let fired = logger.message(vec![MessageArg::Level(level), "m".into()]).unwrap();

        if level == 0 || threshold >= level {
            prop_assert_eq!(fired, Some(level));
            prop_assert_eq!(out.contents(), "m\n");
        } else {
            prop_assert_eq!(fired, None);
            prop_assert_eq!(out.contents(), "");
        }
    }

    /// Bitmask style: emitted iff mask is 0 or shares a bit with the threshold,
    /// and the fired value is the intersection
    #[test]
    fn test_bitmask_filter_law(threshold in 0i64..=0xffff, mask in 0i64..=0xffff) {
        let (mut logger, out) = capture(LevelStyle::Bitmask, threshold);
        let fired = logger.message(vec![MessageArg::Level(mask), "m".into()]).unwrap();

        if mask == 0 {
            prop_assert_eq!(fired, Some(0));
        } else if mask & threshold != 0 {
            prop_assert_eq!(fired, Some(mask & threshold));
        } else {
            prop_assert_eq!(fired, None);
        }
        prop_assert_eq!(out.contents().is_empty(), fired.is_none());
    }

    /// Level 0 is written whatever the threshold and style
    #[test]
    fn test_level_zero_always_written(threshold in 0i64..1024, bitmask in any::<bool>()) {
        let style = if bitmask { LevelStyle::Bitmask } else { LevelStyle::Levels };
        let (mut logger, out) = capture(style, threshold);

        prop_assert_eq!(logger.message(vec!["always"]).unwrap(), Some(0));
        prop_assert_eq!(out.contents(), "always\n");
    }

    /// The last explicit integer decides the level
    #[test]
    fn test_last_explicit_level_wins(levels in prop::collection::vec(1i64..10, 1..6)) {
        let (mut logger, _out) = capture(LevelStyle::Levels, 100);
        let args: Vec<MessageArg> = levels.iter().copied().map(MessageArg::Level).collect();

        prop_assert_eq!(logger.message(args).unwrap(), levels.last().copied());
    }
}

// ============================================================================
// Formatting
// ============================================================================

proptest! {
    /// Every line starts with the prefix and the report ends with one newline
    #[test]
    fn test_every_line_prefixed(
        prefix in "[a-z>: ]{0,6}",
        lines in prop::collection::vec("[a-z ]{0,12}", 1..5),
    ) {
        let (mut logger, out) = capture(LevelStyle::Levels, 0);
        logger.set_prefix(&prefix);

        let args: Vec<MessageArg> = lines.iter().map(MessageArg::from).collect();
        logger.message(args).unwrap();

        let expected: String = lines.iter().map(|line| format!("{}{}\n", prefix, line)).collect();
        prop_assert_eq!(out.contents(), expected);
    }
}

// ============================================================================
// Labels
// ============================================================================

proptest! {
    /// Merging the same labels twice leaves the same table
    #[test]
    fn test_label_merge_idempotent(
        labels in prop::collection::btree_map("[a-zA-Z]{1,8}", 0i64..1000, 0..8)
    ) {
        let mut logger = Logger::new();
        logger.label_levels(labels.clone());
        let once = logger.labeled_levels();
        logger.label_levels(labels);
        prop_assert_eq!(logger.labeled_levels(), once);
    }

    /// Mutating a snapshot never touches the logger
    #[test]
    fn test_snapshot_is_detached(name in "[a-z]{1,8}", level in 0i64..100) {
        let mut logger = Logger::new();
        logger.label_levels([("warn", 5)]);

        let mut snapshot = logger.labeled_levels();
        snapshot.insert(name, level);
        snapshot.insert("warn".to_string(), level + 100);

        prop_assert_eq!(logger.labeled_levels().len(), 1);
        let current = logger.labeled_levels();
        prop_assert_eq!(current.get("warn"), Some(&5));
    }

    /// Label lookups ignore case
    #[test]
    fn test_label_case_insensitive(name in "[a-zA-Z]{1,8}", level in 1i64..100) {
        let mut logger = Logger::new();
        logger.label_levels([(name.to_uppercase(), level)]);
        prop_assert_eq!(logger.set_threshold(name.to_lowercase()).unwrap(), level);
    }
}
