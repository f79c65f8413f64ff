use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::DataField;
use crate::error::ChartResult;

use super::normalize::normalize;
use super::parser::{CssSyntaxParser, StylesheetParser};
use super::specificity::{SelectorSpecificity, SpecificityCalculator};

/// Maximum score boost a rule gets when all of its declarations are `!important`.
pub const IMPORTANT_BOOST_MAX: u32 = 50;

/// One selector occurrence in a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorRecord {
    /// 1-based position among selectors in document order; sentinels use
    /// `0` and `last + 1`.
    pub index: u32,
    /// 1-based line of the owning rule.
    pub line: u32,
    pub specificity: u32,
    /// Empty for sentinel records.
    pub selector: String,
    /// `property: value;` strings marked `!important`, filled only when
    /// important tracking is enabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub important: Vec<String>,
}

impl SelectorRecord {
    #[must_use]
    pub fn sentinel(index: u32, line: u32) -> Self {
        Self {
            index,
            line,
            specificity: 0,
            selector: String::new(),
            important: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.selector.is_empty()
    }

    /// Reads the numeric value used for plotting.
    #[must_use]
    pub fn value(&self, field: DataField) -> f64 {
        match field {
            DataField::SelectorIndex => f64::from(self.index),
            DataField::Line => f64::from(self.line),
            DataField::Specificity => f64::from(self.specificity),
        }
    }
}

/// Knobs for one extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Boost scores by the share of `!important` declarations and record them.
    pub include_important: bool,
    /// Re-format the input first so line numbers are stable across minified
    /// and hand-written sources.
    pub normalize: bool,
    /// Keep the zero-height boundary records at both ends.
    pub sentinels: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            include_important: false,
            normalize: true,
            sentinels: true,
        }
    }
}

impl ExtractOptions {
    #[must_use]
    pub fn with_important(mut self, include_important: bool) -> Self {
        self.include_important = include_important;
        self
    }

    #[must_use]
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    #[must_use]
    pub fn with_sentinels(mut self, sentinels: bool) -> Self {
        self.sentinels = sentinels;
        self
    }
}

/// Turns stylesheet text into per-selector records.
///
/// The parser and the specificity calculator are injected so hosts can plug
/// in their own; [`SpecificityExtractor::default`] uses the `cssparser`
/// backed implementations of this crate.
#[derive(Debug, Clone, Default)]
pub struct SpecificityExtractor<P = CssSyntaxParser, C = SelectorSpecificity> {
    parser: P,
    calculator: C,
}

impl<P: StylesheetParser, C: SpecificityCalculator> SpecificityExtractor<P, C> {
    #[must_use]
    pub fn new(parser: P, calculator: C) -> Self {
        Self { parser, calculator }
    }

    /// Extracts records in document order.
    ///
    /// With sentinels enabled the result starts with `{index: 0, line: 1}` and
    /// ends with a copy of the last record moved one index and one line
    /// further, both with a zero score and no selector text. The trailing
    /// copy keeps the important list. A stylesheet without selectors yields
    /// an empty vector either way.
    pub fn extract(&self, css: &str, options: ExtractOptions) -> ChartResult<Vec<SelectorRecord>> {
        let source = if options.normalize {
            normalize(css)
        } else {
            css.to_owned()
        };
        let stylesheet = self.parser.parse(&source)?;

        let mut records = Vec::with_capacity(stylesheet.selector_count() + 2);
        let mut index = 1u32;

        for rule in stylesheet.rules() {
            let (boost, important) = if options.include_important {
                important_boost(&rule.declarations)
            } else {
                (0, Vec::new())
            };

            for selector in &rule.selectors {
                let specificity = self.calculator.calculate(selector)?;
                records.push(SelectorRecord {
                    index,
                    line: rule.line,
                    specificity: specificity.score().saturating_add(boost),
                    selector: selector.clone(),
                    important: important.clone(),
                });
                index += 1;
            }
        }

        debug!(
            selector_count = records.len(),
            include_important = options.include_important,
            "extracted selector records"
        );

        if options.sentinels {
            add_sentinels(&mut records);
        }
        Ok(records)
    }
}

/// Extracts with the default parser and calculator, sentinels included.
pub fn extract(css: &str, include_important: bool) -> ChartResult<Vec<SelectorRecord>> {
    let extractor: SpecificityExtractor = SpecificityExtractor::default();
    extractor.extract(
        css,
        ExtractOptions::default().with_important(include_important),
    )
}

/// Drops the boundary records added by extraction, if present.
#[must_use]
pub fn trim_sentinels(mut records: Vec<SelectorRecord>) -> Vec<SelectorRecord> {
    if records.last().is_some_and(SelectorRecord::is_sentinel) {
        records.pop();
    }
    if records.first().is_some_and(SelectorRecord::is_sentinel) {
        records.remove(0);
    }
    records
}

fn add_sentinels(records: &mut Vec<SelectorRecord>) {
    let Some(last) = records.last() else {
        return;
    };
    // The trailing record is the last one shifted, so it keeps its important list.
    let mut trailing = last.clone();
    trailing.index += 1;
    trailing.line += 1;
    trailing.specificity = 0;
    trailing.selector.clear();
    records.insert(0, SelectorRecord::sentinel(0, 1));
    records.push(trailing);
}

fn important_boost(declarations: &[super::Declaration]) -> (u32, Vec<String>) {
    if declarations.is_empty() {
        return (0, Vec::new());
    }
    let important: Vec<String> = declarations
        .iter()
        .filter(|declaration| declaration.is_important())
        .map(|declaration| format!("{}: {};", declaration.property, declaration.value))
        .collect();
    let count = u32::try_from(important.len()).unwrap_or(u32::MAX);
    let total = u32::try_from(declarations.len()).unwrap_or(u32::MAX);
    (count.saturating_mul(IMPORTANT_BOOST_MAX) / total, important)
}
