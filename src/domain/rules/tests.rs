// Unit tests for frame range rules

#[cfg(test)]
mod tests {
    use crate::domain::model::*;
    use crate::domain::rules::*;
    use proptest::prelude::*;

    fn parser() -> RangeTokenParser {
        RangeTokenParser::new(ParserOptions::default())
    }

    fn orders(count: usize) -> Vec<OrderRecord> {
        (0..count)
            .map(|i| OrderRecord::new(format!("P{}", i), format!("O{}", i), format!("Order{}", i)))
            .collect()
    }

    fn references(count: usize) -> Vec<FrameReference> {
        (0..count)
            .map(|i| FrameReference::new(format!("shot{:02}.mov", i), format!("{}-{}", i * 10, i * 10 + 5)))
            .collect()
    }

    #[test]
    fn test_baselight_line_joins_tokens() {
        let outcome = parser().parse_baselight_line("shot01.mov 100-200 250 300-310");
        assert_eq!(
            outcome,
            LineOutcome::Parsed(FrameReference::new("shot01.mov", "100-200, 250, 300-310"))
        );
    }

    #[test]
    fn test_baselight_line_keeps_tokens_verbatim() {
        let outcome = parser().parse_baselight_line("  clip.mov   abc  12-x ");
        assert_eq!(
            outcome,
            LineOutcome::Parsed(FrameReference::new("clip.mov", "abc, 12-x"))
        );
    }

    #[test]
    fn test_baselight_line_skips() {
        let p = parser();
        assert_eq!(
            p.parse_baselight_line("shot01.mov <err> 100-200"),
            LineOutcome::Skipped(SkipReason::ErrorMarker)
        );
        assert_eq!(
            p.parse_baselight_line("shot01.mov"),
            LineOutcome::Skipped(SkipReason::TooFewTokens)
        );
        assert_eq!(
            p.parse_baselight_line("   "),
            LineOutcome::Skipped(SkipReason::Blank)
        );
    }

    #[test]
    fn test_baselight_batch_records_skipped_lines() {
        let lines = ["a.mov 1-2", "", "b.mov <err>", "c.mov", "d.mov 5"];
        let parsed = parser().parse_baselight(lines);

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[1], FrameReference::new("d.mov", "5"));
        assert_eq!(
            parsed.skipped,
            vec![
                (2, SkipReason::Blank),
                (3, SkipReason::ErrorMarker),
                (4, SkipReason::TooFewTokens)
            ]
        );
        assert_eq!(parsed.skipped_for(SkipReason::ErrorMarker), 1);
    }

    #[test]
    fn test_custom_error_marker() {
        let options = ParserOptions {
            error_marker: "#BAD".to_string(),
            ..ParserOptions::default()
        };
        let p = RangeTokenParser::new(options);
        assert_eq!(
            p.parse_baselight_line("a.mov 1-2 #BAD"),
            LineOutcome::Skipped(SkipReason::ErrorMarker)
        );
        assert!(matches!(
            p.parse_baselight_line("a.mov <err>"),
            LineOutcome::Parsed(_)
        ));
    }

    #[test]
    fn test_xytech_line_leading_separator() {
        let outcome = parser().parse_xytech_line("/ProducerA/OperatorB/Order123");
        assert_eq!(
            outcome,
            LineOutcome::Parsed(OrderRecord::new("ProducerA", "OperatorB", "Order123"))
        );
    }

    #[test]
    fn test_xytech_line_uses_last_segment_for_order() {
        let outcome = parser().parse_xytech_line("Studio / Jane / reel1 / vfx / WO-77 ");
        assert_eq!(
            outcome,
            LineOutcome::Parsed(OrderRecord::new("Studio", "Jane", "WO-77"))
        );
    }

    #[test]
    fn test_xytech_line_two_segments() {
        let outcome = parser().parse_xytech_line("Studio/Jane");
        assert_eq!(
            outcome,
            LineOutcome::Parsed(OrderRecord::new("Studio", "Jane", "Jane"))
        );
    }

    #[test]
    fn test_xytech_line_skips() {
        let p = parser();
        assert_eq!(
            p.parse_xytech_line("Xytech Workorder 1109"),
            LineOutcome::Skipped(SkipReason::MissingSeparator)
        );
        assert_eq!(
            p.parse_xytech_line("/Studio/"),
            LineOutcome::Skipped(SkipReason::TooFewSegments)
        );
        assert_eq!(p.parse_xytech_line(""), LineOutcome::Skipped(SkipReason::Blank));
    }

    #[test]
    fn test_clean_strips_null_sentinel() {
        let p = parser();
        let refs = p.clean(vec![FrameReference::new(" shot<null>.mov", "1-2<null> ")]);
        assert_eq!(refs, vec![FrameReference::new("shot.mov", "1-2")]);

        let refs = p.clean(vec![FrameReference::new("a.mov", "1-5, <null>, 7")]);
        assert_eq!(refs, vec![FrameReference::new("a.mov", "1-5, 7")]);

        let orders = p.clean(vec![OrderRecord::new("<null>", " Jane ", "WO<null>1")]);
        assert_eq!(orders, vec![OrderRecord::new("", "Jane", "WO1")]);
    }

    #[test]
    fn test_parse_descriptor_mixture() {
        assert_eq!(
            parse_descriptor("1-10, 15, 20-22").unwrap(),
            vec![(1, 10), (15, 15), (20, 22)]
        );
        assert_eq!(parse_descriptor(" 7 ").unwrap(), vec![(7, 7)]);
        assert_eq!(parse_descriptor("9-3").unwrap(), vec![(9, 3)]);
    }

    #[test]
    fn test_parse_descriptor_errors() {
        assert_eq!(parse_descriptor(""), Err(RangeParseError::Empty));
        assert_eq!(parse_descriptor("1-2,,3"), Err(RangeParseError::EmptyPart));
        assert!(matches!(
            parse_descriptor("abc"),
            Err(RangeParseError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_descriptor("+5"),
            Err(RangeParseError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_descriptor("1-2-3"),
            Err(RangeParseError::MalformedSeparator { .. })
        ));
        assert!(matches!(
            parse_descriptor("-5"),
            Err(RangeParseError::MalformedSeparator { .. })
        ));
        assert!(matches!(
            parse_descriptor("99999999999999999999999"),
            Err(RangeParseError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_validate_bounds() {
        assert!(validate(100, "50-90").is_valid());
        assert!(!validate(100, "50-150").is_valid());
        assert!(validate(100, "0-100").is_valid());
        assert!(!validate(100, "101").is_valid());
    }

    #[test]
    fn test_validate_out_of_bounds_reason() {
        let classification = validate(100, "50-150");
        assert!(classification.valid.is_empty());
        assert_eq!(
            classification.invalid,
            vec![InvalidRange {
                text: "50-150".to_string(),
                reason: InvalidReason::OutOfBounds { total_frames: 100 },
            }]
        );
    }

    #[test]
    fn test_validate_mixed_descriptor_partitions() {
        let classification = validate(100, "1-10, 15, 90-120");
        assert_eq!(
            classification.valid,
            vec![FrameInterval::new(1, 10).unwrap(), FrameInterval::single(15)]
        );
        assert_eq!(classification.invalid.len(), 1);
        assert_eq!(classification.invalid[0].text, "90-120");
        assert!(!classification.is_valid());
    }

    #[test]
    fn test_validate_reversed_pair_is_invalid() {
        let classification = validate(100, "30-20");
        assert!(classification.valid.is_empty());
        assert_eq!(classification.invalid[0].reason, InvalidReason::Reversed);
        assert_eq!(classification.invalid[0].text, "30-20");
    }

    #[test]
    fn test_validate_unparseable_descriptor_is_whole() {
        let classification = validate(100, "1-5, x");
        assert!(classification.valid.is_empty());
        assert_eq!(classification.invalid.len(), 1);
        assert_eq!(classification.invalid[0].text, "1-5, x");
        assert!(matches!(
            classification.invalid[0].reason,
            InvalidReason::Unparseable { .. }
        ));
    }

    #[test]
    fn test_validate_zero_bound_rejects_everything_but_frame_zero() {
        let validator = RangeValidator::from_duration(-1.0);
        assert_eq!(validator.bound().total_frames, 0);
        assert!(!validator.validate("1-2").is_valid());
        assert!(validator.validate("0").is_valid());
    }

    #[test]
    fn test_validate_references_keeps_filenames() {
        let validator = RangeValidator::from_duration(10.0);
        let refs = vec![
            FrameReference::new("a.mov", "100-200, 300"),
            FrameReference::new("b.mov", "oops"),
        ];
        let report = validator.validate_references(&refs);

        assert_eq!(report.total_frames, 240);
        assert_eq!(report.valid.len(), 1);
        assert_eq!(report.valid[0].filename, "a.mov");
        assert_eq!(report.invalid.len(), 2);
        assert_eq!(report.invalid[0].filename, "a.mov");
        assert_eq!(report.invalid[0].text, "300");
        assert_eq!(report.invalid[1].filename, "b.mov");
        assert_eq!(
            report.valid_references(),
            vec![FrameReference::new("a.mov", "100-200")]
        );
    }

    #[test]
    fn test_format_frames_runs() {
        assert_eq!(format_frames(&[1, 2, 3, 5, 7, 8]), "1-3, 5, 7-8");
        assert_eq!(format_frames(&[4]), "4");
        assert_eq!(format_frames(&[]), "");
    }

    #[test]
    fn test_format_frames_tolerates_unordered_input() {
        assert_eq!(format_frames(&[5, 3, 4]), "5, 3-4");
        assert_eq!(format_frames(&[2, 2]), "2, 2");
    }

    #[test]
    fn test_format_frames_at_u64_max() {
        assert_eq!(format_frames(&[u64::MAX - 1, u64::MAX]), format!("{}-{}", u64::MAX - 1, u64::MAX));
    }

    #[test]
    fn test_parse_frames_rejects_reversed() {
        assert!(parse_frames("5-1").is_err());
        assert!(parse_frames("x").is_err());
        assert_eq!(parse_frames("1-3, 7").unwrap(), vec![1, 2, 3, 7]);
    }

    #[test]
    fn test_merge_and_format_intervals() {
        let intervals = vec![
            FrameInterval::new(20, 25).unwrap(),
            FrameInterval::new(1, 5).unwrap(),
            FrameInterval::new(6, 8).unwrap(),
            FrameInterval::new(22, 30).unwrap(),
            FrameInterval::single(40),
        ];
        assert_eq!(
            merge_intervals(intervals.clone()),
            vec![
                FrameInterval::new(1, 8).unwrap(),
                FrameInterval::new(20, 30).unwrap(),
                FrameInterval::single(40)
            ]
        );
        assert_eq!(format_intervals(&intervals), "1-8, 20-30, 40");
        assert_eq!(format_intervals(&[]), "");
    }

    #[test]
    fn test_match_truncates_to_shorter_side() {
        let matched = match_records(&references(3), &orders(5));
        assert_eq!(matched.len(), 3);
        assert_eq!(matched[2].producer, "P2");
        assert_eq!(matched[2].filename, "shot02.mov");

        let matched = PositionalMatch.pair(&references(4), &orders(1));
        assert_eq!(matched.len(), 1);
        assert_eq!(PositionalMatch.name(), "positional");
    }

    #[test]
    fn test_match_empty_inputs() {
        assert!(match_records(&[], &orders(2)).is_empty());
        assert!(match_records(&references(2), &[]).is_empty());
    }

    #[test]
    fn test_flatten_ranges() {
        let refs = vec![
            FrameReference::new("a.mov", "1-3, 7-7, 9-4"),
            FrameReference::new("b.mov", "bad-range"),
        ];
        assert_eq!(
            flatten_ranges(&refs),
            vec![
                FrameReference::new("a.mov", "1-3"),
                FrameReference::new("a.mov", "7"),
                FrameReference::new("a.mov", "9-4"),
                FrameReference::new("b.mov", "bad-range"),
            ]
        );
    }

    #[test]
    fn test_reconcile_structural_difference() {
        let all = vec![
            FrameReference::new("a.mov", "1-3"),
            FrameReference::new("a.mov", "5-9"),
            FrameReference::new("b.mov", "2-3"),
        ];
        let matched = vec![MatchedRecord::join(
            &OrderRecord::new("P", "O", "W"),
            &FrameReference::new("a.mov", "5-9"),
        )];
        let unused = reconcile(&all, &matched);
        assert_eq!(
            unused,
            vec![
                UnusedEntry { filename: "a.mov".into(), frames: "1-3".into() },
                UnusedEntry { filename: "b.mov".into(), frames: "2-3".into() },
            ]
        );
    }

    #[test]
    fn test_reconcile_is_not_geometric() {
        // 2-3 lies inside 1-5 but is a different range text
        let all = vec![FrameReference::new("a.mov", "2-3")];
        let matched = vec![MatchedRecord::join(
            &OrderRecord::new("P", "O", "W"),
            &FrameReference::new("a.mov", "1-5"),
        )];
        assert_eq!(reconcile(&all, &matched).len(), 1);
    }

    #[test]
    fn test_reconcile_per_file_keeps_same_text_in_other_file() {
        let all = vec![
            FrameReference::new("a.mov", "1-5"),
            FrameReference::new("b.mov", "1-5"),
        ];
        let matched = vec![MatchedRecord::join(
            &OrderRecord::new("P", "O", "W"),
            &FrameReference::new("a.mov", "1-5"),
        )];

        // Text-only membership hides b.mov
        assert!(reconcile(&all, &matched).is_empty());
        assert_eq!(
            reconcile_per_file(&all, &matched),
            vec![UnusedEntry { filename: "b.mov".into(), frames: "1-5".into() }]
        );
    }

    proptest! {
        #[test]
        fn prop_format_expanded_interval(a in 0u64..100_000, len in 0u64..500) {
            let interval = FrameInterval::new(a, a + len).unwrap();
            let frames: Vec<u64> = expand(&interval).collect();
            let expected = if len == 0 { a.to_string() } else { format!("{}-{}", a, a + len) };
            prop_assert_eq!(format_frames(&frames), expected);
        }

        #[test]
        fn prop_parse_format_round_trip(set in proptest::collection::btree_set(0u64..2_000, 0..200)) {
            let frames: Vec<u64> = set.into_iter().collect();
            let text = format_frames(&frames);
            if frames.is_empty() {
                prop_assert_eq!(text, "");
            } else {
                prop_assert_eq!(parse_frames(&text).unwrap(), frames);
            }
        }

        #[test]
        fn prop_format_intervals_matches_format_frames(set in proptest::collection::btree_set(0u64..500, 1..100)) {
            let frames: Vec<u64> = set.into_iter().collect();
            let intervals: Vec<FrameInterval> = frames.iter().map(|f| FrameInterval::single(*f)).collect();
            prop_assert_eq!(format_intervals(&intervals), format_frames(&frames));
        }

        #[test]
        fn prop_reconcile_idempotent(
            ranges in proptest::collection::vec((0u64..50, 0u64..50), 0..40),
            keep in proptest::collection::vec(any::<bool>(), 40),
        ) {
            let all: Vec<FrameReference> = ranges
                .iter()
                .enumerate()
                .map(|(i, (s, e))| FrameReference::new(format!("f{}.mov", i % 4), canonical_range(*s, *e)))
                .collect();
            let order = OrderRecord::new("P", "O", "W");
            let matched: Vec<MatchedRecord> = all
                .iter()
                .zip(keep.iter())
                .filter(|(_, k)| **k)
                .map(|(r, _)| MatchedRecord::join(&order, r))
                .collect();

            let first = reconcile(&all, &matched);
            let second = reconcile(&all, &matched);
            prop_assert_eq!(&first, &second);
            for entry in &first {
                prop_assert!(!matched.iter().any(|m| m.frames == entry.frames));
            }
        }
    }
}
