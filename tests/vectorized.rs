#![cfg(feature = "tzdb")]

use datefmt_rs::{format_datetime, parse_datetime, StyleName};

fn format_utc(times: &[Option<f64>], formats: &[Option<&str>]) -> Vec<Option<String>> {
    format_datetime(times, formats, Some("UTC"), Some("en_US")).unwrap()
}

fn parse_utc(texts: &[Option<&str>], formats: &[Option<&str>], lenient: bool) -> Vec<Option<f64>> {
    parse_datetime(texts, formats, lenient, Some("UTC"), Some("en_US"))
        .unwrap()
        .values
}

#[test]
fn epoch_date_short_round_trip() {
    let formatted = format_utc(&[Some(0.0)], &[Some("date_short")]);
    assert_eq!(formatted, [Some("1/1/70".to_owned())]);

    let text = formatted[0].as_deref();
    assert_eq!(parse_utc(&[text], &[Some("date_short")], false), [Some(0.0)]);
}

#[test]
fn recycling_to_the_longest_input() {
    assert_eq!(
        format_utc(&[Some(0.0)], &[Some("yyyy"), Some("yyyy-MM")]),
        [Some("1970".to_owned()), Some("1970-01".to_owned())]
    );

    // Lengths that do not divide each other are still recycled.
    let times = [Some(0.0), Some(31_536_000.0), Some(63_072_000.0)];
    assert_eq!(
        format_utc(&times, &[Some("yyyy"), Some("MM")]),
        [
            Some("1970".to_owned()),
            Some("01".to_owned()),
            Some("1972".to_owned())
        ]
    );
}

#[test]
fn empty_inputs() {
    assert!(format_utc(&[], &[Some("yyyy")]).is_empty());
    assert!(format_utc(&[Some(0.0)], &[]).is_empty());

    let parsed = parse_datetime::<&str, &str>(&[], &[Some("yyyy")], false, Some("UTC"), None).unwrap();
    assert!(parsed.values.is_empty());
    assert_eq!(parsed.tzone.as_deref(), Some("UTC"));
}

#[test]
fn empty_inputs_skip_zone_and_locale_resolution() {
    let formatted =
        format_datetime::<&str>(&[], &[Some("yyyy")], Some("Not/AZone"), Some("en_US")).unwrap();
    assert!(formatted.is_empty());

    let parsed =
        parse_datetime::<&str, &str>(&[], &[Some("yyyy")], false, Some("Not/AZone"), None).unwrap();
    assert!(parsed.values.is_empty());
    assert_eq!(parsed.tzone.as_deref(), Some("Not/AZone"));

    // The same zone is still rejected once there is work to do.
    assert!(format_datetime(&[Some(0.0)], &[Some("yyyy")], Some("Not/AZone"), None).is_err());
}

#[test]
fn overflowing_lenient_fields_are_missing() {
    let texts = [
        Some("2021-999999999999999999-01"),
        Some("2021-01-999999999999999999"),
        Some("2021-13-01"),
    ];
    let pattern = [Some("yyyy-MM-dd")];
    assert_eq!(
        parse_utc(&texts, &pattern, true),
        [None, None, Some(1_640_995_200.0)]
    );
    // Later calls still reach the shared provider.
    assert_eq!(parse_utc(&texts, &pattern, true)[2], Some(1_640_995_200.0));
}

#[test]
fn failed_calls_leave_the_provider_usable() {
    assert!(format_datetime(&[Some(0.0)], &[Some("yyyy 'x")], Some("Europe/Warsaw"), None).is_err());
    assert!(parse_datetime(&[Some("x")], &[Some("yyyy")], false, Some("Mars/Olympus"), None).is_err());

    let formatted = format_datetime(
        &[Some(0.0)],
        &[Some("yyyy-MM-dd HH:mm")],
        Some("Europe/Warsaw"),
        Some("en_US"),
    )
    .unwrap();
    assert_eq!(formatted, [Some("1970-01-01 01:00".to_owned())]);
}

#[test]
fn missing_values_propagate() {
    assert_eq!(
        format_utc(&[Some(0.0), None, Some(0.0)], &[Some("yyyy"), Some("yyyy"), None]),
        [Some("1970".to_owned()), None, None]
    );
    assert_eq!(
        parse_utc(&[None, Some("1970")], &[Some("yyyy")], false),
        [None, Some(0.0)]
    );
}

#[test]
fn leniency() {
    let text = [Some("2021-13-01")];
    let pattern = [Some("yyyy-MM-dd")];
    assert_eq!(parse_utc(&text, &pattern, true), [Some(1_640_995_200.0)]);
    assert_eq!(parse_utc(&text, &pattern, false), [None]);
    assert_eq!(
        parse_utc(&[Some("2022-01-01")], &pattern, false),
        [Some(1_640_995_200.0)]
    );
}

#[test]
fn relative_time_styles_match_absolute_ones() {
    let times = [Some(0.0), Some(1_718_452_805.0), Some(-1_000_000_000.5)];
    for length in ["full", "long", "medium", "short"] {
        let relative = format!("time_relative_{length}");
        let absolute = format!("time_{length}");
        assert_eq!(
            format_utc(&times, &[Some(relative.as_str())]),
            format_utc(&times, &[Some(absolute.as_str())]),
        );
    }
}

#[test]
fn formatter_reuse_does_not_change_output() {
    let times: Vec<Option<f64>> = (0..12).map(|i| Some(f64::from(i) * 2_629_746.0)).collect();
    let patterns = ["date_medium", "datetime_short", "EEEE d MMMM y HH:mm:ss"];

    for pattern in patterns {
        // One shared pattern element, reused for every timestamp.
        let shared = format_utc(&times, &[Some(pattern)]);
        // Distinct but equal strings in every slot.
        let owned: Vec<String> = times.iter().map(|_| pattern.to_owned()).collect();
        let distinct: Vec<Option<&str>> = owned.iter().map(|p| Some(p.as_str())).collect();
        assert_eq!(shared, format_utc(&times, &distinct));
        // Fresh formatter per element.
        let fresh: Vec<Option<String>> = times
            .iter()
            .flat_map(|time| format_utc(&[*time], &[Some(pattern)]))
            .collect();
        assert_eq!(shared, fresh);
    }
}

#[test]
fn literal_pattern_round_trips() {
    let times = [Some(0.0), Some(1_718_452_805.0), Some(-86_399.0), Some(951_782_400.0)];
    let pattern = [Some("yyyy-MM-dd'T'HH:mm:ssXXX")];
    let formatted = format_utc(&times, &pattern);
    let texts: Vec<Option<&str>> = formatted.iter().map(Option::as_deref).collect();
    assert_eq!(parse_utc(&texts, &pattern, false), times);

    // Minutes resolution loses the seconds.
    let pattern = [Some("yyyy-MM-dd HH:mm")];
    let formatted = format_utc(&[Some(1_718_452_805.0)], &pattern);
    let texts: Vec<Option<&str>> = formatted.iter().map(Option::as_deref).collect();
    assert_eq!(parse_utc(&texts, &pattern, false), [Some(1_718_452_800.0)]);
}

#[test]
fn every_style_formats_and_parses() {
    for name in StyleName::VOCABULARY {
        let formatted = format_utc(&[Some(1_718_452_805.0)], &[Some(name)]);
        let text = formatted[0].as_deref();
        assert!(text.is_some_and(|text| !text.is_empty()), "{name}");
        let parsed = parse_utc(&[text], &[Some(name)], false);
        assert!(parsed[0].is_some(), "{name}: {text:?}");
    }
}

#[test]
fn malformed_pattern_aborts_the_call() {
    assert!(format_datetime(&[Some(0.0)], &[Some("yyyy 'x")], Some("UTC"), None).is_err());
    assert!(parse_datetime(&[Some("1970")], &[Some("jj")], false, Some("UTC"), None).is_err());
}

#[test]
fn named_time_zones() {
    let formatted = format_datetime(
        &[Some(0.0), Some(1_498_910_400.0)],
        &[Some("yyyy-MM-dd HH:mm xxx")],
        Some("America/New_York"),
        Some("en_US"),
    )
    .unwrap();
    assert_eq!(
        formatted,
        [
            Some("1969-12-31 19:00 -05:00".to_owned()),
            Some("2017-07-01 08:00 -04:00".to_owned())
        ]
    );

    let parsed = parse_datetime(
        &[Some("2017-07-01 08:00"), Some("2017-07-01 12:00 Europe/Warsaw")],
        &[Some("yyyy-MM-dd HH:mm"), Some("yyyy-MM-dd HH:mm VV")],
        false,
        Some("America/New_York"),
        Some("en_US"),
    )
    .unwrap();
    assert_eq!(parsed.values, [Some(1_498_910_400.0), Some(1_498_903_200.0)]);
    assert_eq!(parsed.tzone.as_deref(), Some("America/New_York"));
}

#[test]
fn localized_names() {
    let formatted = format_datetime(
        &[Some(0.0)],
        &[Some("date_full"), Some("LLLL"), Some("date_medium")],
        Some("UTC"),
        Some("pl_PL"),
    )
    .unwrap();
    assert_eq!(formatted[1].as_deref(), Some("styczeń"));

    let parsed = parse_datetime(
        &[formatted[0].as_deref(), formatted[2].as_deref()],
        &[Some("date_full"), Some("date_medium")],
        false,
        Some("UTC"),
        Some("pl_PL"),
    )
    .unwrap();
    assert_eq!(parsed.values, [Some(0.0), Some(0.0)]);
}

#[test]
fn japanese_symbols() {
    let formatted = format_datetime(
        &[Some(0.0)],
        &[Some("date_full"), Some("date_short"), Some("time_medium")],
        Some("UTC"),
        Some("ja_JP"),
    )
    .unwrap();
    assert_eq!(
        formatted,
        [
            Some("1970年1月1日木曜日".to_owned()),
            Some("1970/01/01".to_owned()),
            Some("0:00:00".to_owned())
        ]
    );

    let texts: Vec<Option<&str>> = formatted[..2].iter().map(Option::as_deref).collect();
    let parsed = parse_datetime(
        &texts,
        &[Some("date_full"), Some("date_short")],
        false,
        Some("UTC"),
        Some("ja_JP"),
    )
    .unwrap();
    assert_eq!(parsed.values, [Some(0.0), Some(0.0)]);
}
