//! CSS side of the chart: normalize, parse, score, extract.
//!
//! Everything in here is a pure data transform with no rendering dependency.

mod extract;
mod normalize;
mod parser;
mod specificity;

pub use extract::{
    ExtractOptions, IMPORTANT_BOOST_MAX, SelectorRecord, SpecificityExtractor, extract,
    trim_sentinels,
};
pub use normalize::normalize;
pub use parser::{
    CssSyntaxParser, Declaration, RuleGroup, StyleRule, Stylesheet, StylesheetParser,
    parse_stylesheet,
};
pub use specificity::{SelectorSpecificity, Specificity, SpecificityCalculator, calculate};
