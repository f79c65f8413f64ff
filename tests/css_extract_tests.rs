use specificity_graph::ChartError;
use specificity_graph::css::{
    CssSyntaxParser, ExtractOptions, IMPORTANT_BOOST_MAX, Specificity, SpecificityCalculator,
    SpecificityExtractor, extract, parse_stylesheet, trim_sentinels,
};

#[test]
fn two_rule_stylesheet_yields_scored_records_between_sentinels() {
    let records = extract(".a{color:red} #b{color:blue}", false).expect("extract");

    assert_eq!(records.len(), 4);
    assert_eq!(records[0].index, 0);
    assert_eq!(records[0].line, 1);
    assert_eq!(records[0].specificity, 0);
    assert!(records[0].is_sentinel());

    assert_eq!(records[1].index, 1);
    assert_eq!(records[1].selector, ".a");
    assert_eq!(records[1].specificity, 10);
    assert_eq!(records[1].line, 1);

    assert_eq!(records[2].index, 2);
    assert_eq!(records[2].selector, "#b");
    assert_eq!(records[2].specificity, 100);
    assert_eq!(records[2].line, 5);

    assert_eq!(records[3].index, 3);
    assert_eq!(records[3].line, records[2].line + 1);
    assert_eq!(records[3].specificity, 0);
    assert!(records[3].is_sentinel());
}

#[test]
fn indices_are_contiguous_and_lines_never_decrease() {
    let css = r#"
        html, body { margin: 0 }
        .nav > li a:hover { color: red }
        @media (min-width: 40em) {
            #main .col { float: left }
            .col:nth-child(2n+1) { clear: left }
        }
        ul li::before { content: "}" }
    "#;
    let records = extract(css, false).expect("extract");

    for (position, record) in records.iter().enumerate() {
        assert_eq!(record.index as usize, position);
    }
    for pair in records.windows(2) {
        assert!(pair[0].line <= pair[1].line, "lines went backwards: {pair:?}");
    }
}

#[test]
fn comma_separated_selectors_share_their_rule_line() {
    let records = trim_sentinels(extract("h1, .title { font-weight: bold }", false).expect("extract"));

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].selector, "h1");
    assert_eq!(records[0].specificity, 1);
    assert_eq!(records[1].selector, ".title");
    assert_eq!(records[1].specificity, 10);
    assert_eq!(records[0].line, records[1].line);
}

#[test]
fn rules_inside_media_queries_keep_document_order() {
    let records = trim_sentinels(
        extract(
            ".before{color:red} @media screen{.inside{color:blue}} .after{color:green}",
            false,
        )
        .expect("extract"),
    );
    let selectors: Vec<&str> = records.iter().map(|record| record.selector.as_str()).collect();
    assert_eq!(selectors, vec![".before", ".inside", ".after"]);
}

#[test]
fn media_condition_is_recorded_on_rule_groups() {
    let stylesheet =
        parse_stylesheet("@media print{@supports (display:grid){.g{display:grid}}} .p{color:red}")
            .expect("parse");

    assert_eq!(stylesheet.groups.len(), 2);
    assert_eq!(
        stylesheet.groups[0].condition.as_deref(),
        Some("@media print @supports (display:grid)")
    );
    assert_eq!(stylesheet.groups[1].condition, None);
    assert_eq!(stylesheet.selector_count(), 2);
}

#[test]
fn important_declarations_boost_score_when_enabled() {
    let css = ".a{color:red !important; margin:0}";

    let plain = trim_sentinels(extract(css, false).expect("extract"));
    assert_eq!(plain[0].specificity, 10);
    assert!(plain[0].important.is_empty());

    let boosted = trim_sentinels(extract(css, true).expect("extract"));
    assert_eq!(boosted[0].specificity, 10 + IMPORTANT_BOOST_MAX / 2);
    assert_eq!(boosted[0].important.len(), 1);
    assert!(boosted[0].important[0].starts_with("color: red"));
}

#[test]
fn fully_important_rule_gets_the_whole_boost() {
    let records = trim_sentinels(
        extract("#x{color:red!important;top:0 !important}", true).expect("extract"),
    );
    assert_eq!(records[0].specificity, 100 + IMPORTANT_BOOST_MAX);
    assert_eq!(records[0].important.len(), 2);
}

#[test]
fn stylesheet_without_selectors_yields_no_records() {
    assert!(extract("", false).expect("extract empty").is_empty());
    assert!(extract("/* only a comment */", false).expect("extract comment").is_empty());
    assert!(extract("@import url(base.css);", false).expect("extract import").is_empty());
}

#[test]
fn trailing_sentinel_copies_the_last_important_list() {
    let records = extract(".a{color:red !important;margin:0}", true).expect("extract");
    assert_eq!(records.len(), 3);

    let leading = &records[0];
    assert!(leading.important.is_empty());

    let trailing = &records[2];
    assert!(trailing.is_sentinel());
    assert_eq!((trailing.index, trailing.line, trailing.specificity), (2, 2, 0));
    assert_eq!(trailing.important, vec!["color: red !important;".to_owned()]);
    assert_eq!(trailing.important, records[1].important);
}

#[test]
fn sentinels_can_be_disabled() {
    let extractor: SpecificityExtractor = SpecificityExtractor::default();
    let records = extractor
        .extract(
            ".a{color:red} .b{color:red}",
            ExtractOptions::default().with_sentinels(false),
        )
        .expect("extract");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].index, 1);
    assert!(records.iter().all(|record| !record.is_sentinel()));
}

#[test]
fn minified_and_formatted_sources_get_the_same_lines() {
    let minified = extract(".a{color:red}.b{color:blue}", false).expect("minified");
    let formatted = extract(
        ".a {\n  color: red;\n}\n\n\n\n.b {\n  color: blue;\n}\n",
        false,
    )
    .expect("formatted");
    assert_eq!(minified, formatted);
}

#[test]
fn raw_lines_are_used_when_normalization_is_off() {
    let extractor: SpecificityExtractor = SpecificityExtractor::default();
    let records = extractor
        .extract(
            "\n\n.a { color: red }",
            ExtractOptions::default()
                .with_normalize(false)
                .with_sentinels(false),
        )
        .expect("extract");
    assert_eq!(records[0].line, 3);
}

#[test]
fn stray_closing_brace_is_reported_with_its_position() {
    let err = extract("} .a{color:red}", false).expect_err("stray brace must fail");
    match err {
        ChartError::InvalidCssInput { line, message, .. } => {
            assert_eq!(line, 1);
            assert!(message.contains('}'), "unexpected message: {message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_selector_is_an_input_error() {
    let err = extract("a.{color:red}", false).expect_err("dangling dot must fail");
    assert!(matches!(err, ChartError::InvalidCssInput { .. }));
}

struct FlatCalculator;

impl SpecificityCalculator for FlatCalculator {
    fn calculate(&self, _selector: &str) -> specificity_graph::ChartResult<Specificity> {
        Ok(Specificity::new(0, 0, 0, 7))
    }
}

#[test]
fn injected_calculator_drives_the_scores() {
    let extractor = SpecificityExtractor::new(CssSyntaxParser, FlatCalculator);
    let records = extractor
        .extract(
            "#a{color:red} .b .c{color:red}",
            ExtractOptions::default().with_sentinels(false),
        )
        .expect("extract");
    assert!(records.iter().all(|record| record.specificity == 7));
}
