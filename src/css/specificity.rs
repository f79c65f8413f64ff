//! Selector specificity as `(inline, id, class, type)` and its packed score.

use std::ops::{Add, AddAssign};

use cssparser::{Delimiter, Parser, ParserInput, Token};
use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

use super::parser::{custom_error, into_chart_error};

/// Pseudo-classes spelled with one colon that are really pseudo-elements.
const LEGACY_PSEUDO_ELEMENTS: &[&str] = &["before", "after", "first-line", "first-letter"];

/// Functional pseudo-classes whose weight is that of their most specific argument.
const FORWARDING_PSEUDO_CLASSES: &[&str] = &["not", "is", "has", "matches", "-webkit-any", "-moz-any"];

/// Specificity tuple, compared lexicographically.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Specificity {
    pub inline: u32,
    pub ids: u32,
    pub classes: u32,
    pub types: u32,
}

impl Specificity {
    #[must_use]
    pub const fn new(inline: u32, ids: u32, classes: u32, types: u32) -> Self {
        Self {
            inline,
            ids,
            classes,
            types,
        }
    }

    /// Packs the tuple into `a*1000 + b*100 + c*10 + d`.
    ///
    /// Components above 9 bleed into the next digit; that approximation is accepted.
    #[must_use]
    pub fn score(self) -> u32 {
        self.inline
            .saturating_mul(1000)
            .saturating_add(self.ids.saturating_mul(100))
            .saturating_add(self.classes.saturating_mul(10))
            .saturating_add(self.types)
    }
}

impl Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            inline: self.inline + rhs.inline,
            ids: self.ids + rhs.ids,
            classes: self.classes + rhs.classes,
            types: self.types + rhs.types,
        }
    }
}

impl AddAssign for Specificity {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Seam for the specificity calculator consumed by the extractor.
pub trait SpecificityCalculator {
    fn calculate(&self, selector: &str) -> ChartResult<Specificity>;
}

impl<C: SpecificityCalculator + ?Sized> SpecificityCalculator for Box<C> {
    fn calculate(&self, selector: &str) -> ChartResult<Specificity> {
        (**self).calculate(selector)
    }
}

/// Default calculator following Selectors Level 4 counting rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorSpecificity;

impl SpecificityCalculator for SelectorSpecificity {
    fn calculate(&self, selector: &str) -> ChartResult<Specificity> {
        calculate(selector)
    }
}

/// Computes the specificity of one selector.
///
/// When `selector` is a comma separated list the most specific entry wins.
pub fn calculate(selector: &str) -> ChartResult<Specificity> {
    let mut input = ParserInput::new(selector);
    let mut parser = Parser::new(&mut input);
    selector_list_max(&mut parser).map_err(into_chart_error)
}

type SelectorParseError<'i> = cssparser::ParseError<'i, String>;

fn selector_list_max<'i>(parser: &mut Parser<'i, '_>) -> Result<Specificity, SelectorParseError<'i>> {
    let mut best = Specificity::default();
    loop {
        let spec = parser.parse_until_before(Delimiter::Comma, complex_selector)?;
        best = best.max(spec);
        if parser.next().is_err() {
            break;
        }
    }
    Ok(best)
}

fn complex_selector<'i>(parser: &mut Parser<'i, '_>) -> Result<Specificity, SelectorParseError<'i>> {
    let mut spec = Specificity::default();
    let mut previous_was_type = false;

    loop {
        let location = parser.current_source_location();
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        let is_type = matches!(token, Token::Ident(_));
        match token {
            Token::IDHash(_) | Token::Hash(_) => spec.ids += 1,
            Token::Delim('.') => {
                if parser.expect_ident().is_err() {
                    return Err(custom_error(location, "expected class name after `.`"));
                }
                spec.classes += 1;
            }
            Token::SquareBracketBlock => spec.classes += 1,
            Token::Colon => pseudo_selector(parser, &mut spec)?,
            Token::Ident(_) => spec.types += 1,
            // `ns|type`: the namespace prefix is not a type selector.
            Token::Delim('|') if previous_was_type => spec.types -= 1,
            Token::Delim('*' | '>' | '+' | '~' | '|' | '&') => {}
            other => {
                return Err(custom_error(
                    location,
                    format!("unexpected token {other:?} in selector"),
                ));
            }
        }
        previous_was_type = is_type;
    }

    Ok(spec)
}

fn pseudo_selector<'i>(
    parser: &mut Parser<'i, '_>,
    spec: &mut Specificity,
) -> Result<(), SelectorParseError<'i>> {
    let location = parser.current_source_location();
    let token = parser.next_including_whitespace()?.clone();

    match token {
        Token::Colon => {
            // `::name` and `::name(...)`; arguments do not add weight.
            match parser.next_including_whitespace()?.clone() {
                Token::Ident(_) | Token::Function(_) => spec.types += 1,
                other => {
                    return Err(custom_error(
                        location,
                        format!("expected pseudo-element name, found {other:?}"),
                    ));
                }
            }
        }
        Token::Ident(name) => {
            if LEGACY_PSEUDO_ELEMENTS.contains(&name.to_ascii_lowercase().as_str()) {
                spec.types += 1;
            } else {
                spec.classes += 1;
            }
        }
        Token::Function(name) => {
            let name = name.to_ascii_lowercase();
            if FORWARDING_PSEUDO_CLASSES.contains(&name.as_str()) {
                *spec += parser.parse_nested_block(selector_list_max)?;
            } else if name != "where" {
                spec.classes += 1;
            }
        }
        other => {
            return Err(custom_error(
                location,
                format!("expected pseudo-class name, found {other:?}"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Specificity, calculate};

    fn spec(selector: &str) -> (u32, u32, u32, u32) {
        let s = calculate(selector).expect("valid selector");
        (s.inline, s.ids, s.classes, s.types)
    }

    #[test]
    fn counts_basic_simple_selectors() {
        assert_eq!(spec(".a"), (0, 0, 1, 0));
        assert_eq!(spec("#b"), (0, 1, 0, 0));
        assert_eq!(spec("div"), (0, 0, 0, 1));
        assert_eq!(spec("*"), (0, 0, 0, 0));
        assert_eq!(spec("ul li.active > a[href]:hover"), (0, 0, 3, 3));
    }

    #[test]
    fn pseudo_elements_count_as_types() {
        assert_eq!(spec("p::first-line"), (0, 0, 0, 2));
        assert_eq!(spec("a:before"), (0, 0, 0, 2));
    }

    #[test]
    fn forwarding_pseudo_classes_take_argument_weight() {
        assert_eq!(spec(":not(#x)"), (0, 1, 0, 0));
        assert_eq!(spec(":is(.a, #b) p"), (0, 1, 0, 1));
        assert_eq!(spec(":where(#b) p"), (0, 0, 0, 1));
        assert_eq!(spec("li:nth-child(2n+1)"), (0, 0, 1, 1));
    }

    #[test]
    fn namespace_prefix_is_not_counted() {
        assert_eq!(spec("svg|circle"), (0, 0, 0, 1));
    }

    #[test]
    fn score_packs_components() {
        assert_eq!(Specificity::new(0, 1, 2, 3).score(), 123);
        assert_eq!(Specificity::new(1, 0, 0, 0).score(), 1000);
    }

    #[test]
    fn dangling_class_dot_is_rejected() {
        assert!(calculate(".").is_err());
        assert!(calculate("a:").is_err());
    }
}
