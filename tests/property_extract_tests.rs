use proptest::prelude::*;
use specificity_graph::css::{calculate, extract, normalize};

const SELECTORS: [&str; 11] = [
    "a",
    ".b",
    "#c",
    "ul li",
    ".x > .y",
    "a:hover",
    "p::before",
    "[href]",
    "*",
    "div.nav#top",
    "li:not(.z)",
];

const TYPE_SELECTORS: [&str; 4] = ["div", "span", "li", "section"];
const COMPOUND_SUFFIXES: [&str; 6] = ["", ".k", "#m", ":hover", "[data-x]", ":not(.z)"];

fn stylesheet() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (
            prop::collection::vec(0..SELECTORS.len(), 1..4),
            1usize..4,
            prop::bool::ANY,
        ),
        0..12,
    )
    .prop_map(|rules| {
        rules
            .into_iter()
            .map(|(selectors, declarations, important)| {
                let prelude: Vec<&str> = selectors.into_iter().map(|i| SELECTORS[i]).collect();
                let body: Vec<String> = (0..declarations)
                    .map(|n| {
                        let flag = if important && n == 0 { " !important" } else { "" };
                        format!("p{n}:{n}px{flag}")
                    })
                    .collect();
                format!("{}{{{}}}", prelude.join(","), body.join(";"))
            })
            .collect::<Vec<_>>()
            .join(" ")
    })
}

proptest! {
    #[test]
    fn indices_are_contiguous_from_zero(css in stylesheet(), important in prop::bool::ANY) {
        let records = extract(&css, important).expect("extract");
        for (position, record) in records.iter().enumerate() {
            prop_assert_eq!(record.index as usize, position);
        }
        if let (Some(first), Some(last)) = (records.first(), records.last()) {
            prop_assert!(first.is_sentinel());
            prop_assert!(last.is_sentinel());
            prop_assert_eq!(first.line, 1);
        }
    }

    #[test]
    fn lines_never_decrease(css in stylesheet()) {
        let records = extract(&css, false).expect("extract");
        for pair in records.windows(2) {
            prop_assert!(pair[0].line <= pair[1].line);
        }
    }

    #[test]
    fn normalization_is_idempotent(css in stylesheet()) {
        let once = normalize(&css);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert_eq!(
            extract(&once, true).expect("extract normalized"),
            extract(&css, true).expect("extract raw")
        );
    }

    #[test]
    fn important_never_lowers_a_score(css in stylesheet()) {
        let plain = extract(&css, false).expect("extract");
        let boosted = extract(&css, true).expect("extract");
        prop_assert_eq!(plain.len(), boosted.len());
        for (left, right) in plain.iter().zip(&boosted) {
            prop_assert!(right.specificity >= left.specificity);
            prop_assert!(right.specificity - left.specificity <= 50);
        }
    }

    #[test]
    fn adding_a_class_raises_specificity(index in 0..SELECTORS.len()) {
        let base = SELECTORS[index];
        prop_assume!(!base.contains("::"));
        let extended = format!("{base} .extra");
        let before = calculate(base).expect("base").score();
        let after = calculate(&extended).expect("extended").score();
        prop_assert_eq!(after, before + 10);
    }

    #[test]
    fn adding_an_id_raises_specificity_by_at_least_a_hundred(index in 0..SELECTORS.len()) {
        let base = SELECTORS[index];
        prop_assume!(!base.contains("::"));
        let before = calculate(base).expect("base").score();
        let after = calculate(&format!("{base} #extra")).expect("extended").score();
        prop_assert!(after >= before + 100);
    }

    #[test]
    fn swapping_a_type_for_a_class_never_lowers_specificity(
        prefix in 0..SELECTORS.len(),
        tag in 0..TYPE_SELECTORS.len(),
        suffix in 0..COMPOUND_SUFFIXES.len(),
    ) {
        let prefix = SELECTORS[prefix];
        prop_assume!(!prefix.contains("::"));
        let (tag, suffix) = (TYPE_SELECTORS[tag], COMPOUND_SUFFIXES[suffix]);
        let typed = calculate(&format!("{prefix} {tag}{suffix}")).expect("typed").score();
        let classed = calculate(&format!("{prefix} .{tag}{suffix}")).expect("classed").score();
        prop_assert!(classed >= typed);
    }

    #[test]
    fn extraction_is_deterministic(css in stylesheet(), important in prop::bool::ANY) {
        let first = extract(&css, important).expect("first extract");
        let second = extract(&css, important).expect("second extract");
        prop_assert_eq!(first, second);
    }
}
