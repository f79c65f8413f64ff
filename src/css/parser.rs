//! Stylesheet parsing on top of the `cssparser` tokenizer.
//!
//! Only the structure the specificity chart needs is recovered: style rules
//! with their selector list, declarations and 1-based source line, grouped by
//! the container at-rule (`@media`, `@supports`, ...) they appear in.

use cssparser::{
    Delimiter, ParseError, ParseErrorKind, Parser, ParserInput, SourceLocation, Token,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ChartError, ChartResult};

/// At-rules whose block holds style rules. Vendor prefixes are stripped first.
const CONTAINER_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "document",
    "layer",
    "container",
    "scope",
    "starting-style",
];

/// One `property: value` pair of a style rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    /// Whether the value carries an `!important` marker (`! important` included).
    #[must_use]
    pub fn is_important(&self) -> bool {
        let compact: String = self
            .value
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .collect();
        compact.to_ascii_lowercase().contains("!important")
    }
}

/// A qualified rule: `selector, selector { declarations }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRule {
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
    /// 1-based line where the rule's prelude starts.
    pub line: u32,
}

/// A run of style rules sharing one container.
///
/// Bare top-level rules each get their own group with `condition == None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGroup {
    pub condition: Option<String>,
    pub rules: Vec<StyleRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylesheet {
    pub groups: Vec<RuleGroup>,
}

impl Stylesheet {
    /// Style rules in document order.
    pub fn rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.groups.iter().flat_map(|group| group.rules.iter())
    }

    #[must_use]
    pub fn selector_count(&self) -> usize {
        self.rules().map(|rule| rule.selectors.len()).sum()
    }
}

/// Seam for the stylesheet parser consumed by the extractor.
pub trait StylesheetParser {
    fn parse(&self, css: &str) -> ChartResult<Stylesheet>;
}

impl<P: StylesheetParser + ?Sized> StylesheetParser for Box<P> {
    fn parse(&self, css: &str) -> ChartResult<Stylesheet> {
        (**self).parse(css)
    }
}

/// Default parser backed by `cssparser`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssSyntaxParser;

impl StylesheetParser for CssSyntaxParser {
    fn parse(&self, css: &str) -> ChartResult<Stylesheet> {
        parse_stylesheet(css)
    }
}

type RuleParseError<'i> = ParseError<'i, String>;

/// Parses `css` into rule groups.
///
/// Fails with [`ChartError::InvalidCssInput`] on structural errors: a stray
/// `}` or `;` at rule level, a selector prelude without a block, an empty
/// selector or an unterminated string inside a selector. Declarations
/// without a `:` are skipped.
pub fn parse_stylesheet(css: &str) -> ChartResult<Stylesheet> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut groups = Vec::new();
    parse_rule_list(&mut parser, None, &mut groups).map_err(into_chart_error)?;
    groups.retain(|group: &RuleGroup| !group.rules.is_empty());
    Ok(Stylesheet { groups })
}

fn parse_rule_list<'i>(
    parser: &mut Parser<'i, '_>,
    condition: Option<&str>,
    groups: &mut Vec<RuleGroup>,
) -> Result<(), RuleParseError<'i>> {
    let mut open_group: Option<usize> = None;

    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            return Ok(());
        }

        let location = parser.current_source_location();
        let state = parser.state();
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(()),
        };

        match token {
            Token::AtKeyword(name) => {
                parse_at_rule(parser, name.as_ref(), condition, groups)?;
                // Rules after a nested container start a fresh group to keep
                // document order intact.
                open_group = None;
            }
            Token::CloseCurlyBracket => {
                return Err(custom_error(location, "unexpected `}`"));
            }
            Token::Semicolon => {
                return Err(custom_error(location, "unexpected `;` outside a block"));
            }
            Token::CDO | Token::CDC => {}
            _ => {
                parser.reset(&state);
                let rule = parse_style_rule(parser, location)?;
                match (condition, open_group) {
                    (Some(_), Some(index)) => groups[index].rules.push(rule),
                    (Some(condition), None) => {
                        groups.push(RuleGroup {
                            condition: Some(condition.to_owned()),
                            rules: vec![rule],
                        });
                        open_group = Some(groups.len() - 1);
                    }
                    (None, _) => groups.push(RuleGroup {
                        condition: None,
                        rules: vec![rule],
                    }),
                }
            }
        }
    }
}

fn parse_at_rule<'i>(
    parser: &mut Parser<'i, '_>,
    name: &str,
    parent: Option<&str>,
    groups: &mut Vec<RuleGroup>,
) -> Result<(), RuleParseError<'i>> {
    let start = parser.position();
    parser.parse_until_before(Delimiter::CurlyBracketBlock | Delimiter::Semicolon, |p| {
        consume_all(p);
        Ok::<_, RuleParseError<'i>>(())
    })?;
    let prelude = clean_text(parser.slice_from(start));

    let token = match parser.next() {
        Ok(token) => token.clone(),
        Err(_) => return Ok(()),
    };
    if !matches!(token, Token::CurlyBracketBlock) {
        return Ok(());
    }

    if !is_container_at_rule(name) {
        trace!(at_rule = name, "skipping non-container at-rule block");
        return Ok(());
    }

    let own = if prelude.is_empty() {
        format!("@{name}")
    } else {
        format!("@{name} {prelude}")
    };
    let condition = match parent {
        Some(parent) => format!("{parent} {own}"),
        None => own,
    };
    parser.parse_nested_block(|p| parse_rule_list(p, Some(&condition), groups))
}

fn parse_style_rule<'i>(
    parser: &mut Parser<'i, '_>,
    location: SourceLocation,
) -> Result<StyleRule, RuleParseError<'i>> {
    let selectors = parser.parse_until_before(Delimiter::CurlyBracketBlock, parse_selector_list)?;

    let has_block = matches!(parser.next(), Ok(Token::CurlyBracketBlock));
    if !has_block {
        return Err(custom_error(location, "expected `{` after selector"));
    }
    let declarations = parser.parse_nested_block(parse_declarations)?;

    Ok(StyleRule {
        selectors,
        declarations,
        line: location.line + 1,
    })
}

fn parse_selector_list<'i>(parser: &mut Parser<'i, '_>) -> Result<Vec<String>, RuleParseError<'i>> {
    let mut selectors = Vec::new();

    loop {
        parser.skip_whitespace();
        let location = parser.current_source_location();
        let start = parser.position();
        parser.parse_until_before(Delimiter::Comma, |p| {
            loop {
                let token_location = p.current_source_location();
                let token = match p.next_including_whitespace() {
                    Ok(token) => token.clone(),
                    Err(_) => break,
                };
                if matches!(token, Token::BadString(_) | Token::BadUrl(_)) {
                    return Err(custom_error(token_location, "unterminated string in selector"));
                }
            }
            Ok(())
        })?;

        let selector = clean_text(parser.slice_from(start));
        if selector.is_empty() {
            return Err(custom_error(location, "empty selector"));
        }
        selectors.push(selector);

        if parser.next().is_err() {
            break;
        }
    }

    Ok(selectors)
}

fn parse_declarations<'i>(
    parser: &mut Parser<'i, '_>,
) -> Result<Vec<Declaration>, RuleParseError<'i>> {
    let mut declarations = Vec::new();

    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }

        let start = parser.position();
        parser.parse_until_after(Delimiter::Semicolon | Delimiter::CurlyBracketBlock, |p| {
            consume_all(p);
            Ok::<_, RuleParseError<'i>>(())
        })?;
        let raw = clean_text(parser.slice_from(start));
        let statement = raw.trim_end_matches(';').trim();

        if statement.is_empty() {
            continue;
        }
        if statement.contains('{') {
            trace!(statement, "skipping nested rule inside declaration block");
            continue;
        }
        match statement.split_once(':') {
            Some((property, value)) if !property.trim().is_empty() => {
                declarations.push(Declaration {
                    property: property.trim().to_owned(),
                    value: value.trim().to_owned(),
                });
            }
            _ => trace!(statement, "skipping malformed declaration"),
        }
    }

    Ok(declarations)
}

fn consume_all(parser: &mut Parser<'_, '_>) {
    while parser.next().is_ok() {}
}

fn is_container_at_rule(name: &str) -> bool {
    let lowered = name.to_ascii_lowercase();
    let unprefixed = if lowered.starts_with('-') {
        lowered
            .trim_start_matches('-')
            .split_once('-')
            .map_or(lowered.as_str(), |(_, rest)| rest)
    } else {
        lowered.as_str()
    };
    CONTAINER_AT_RULES.contains(&unprefixed)
}

/// Drops comments and collapses whitespace runs outside strings.
pub(crate) fn clean_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(ch) = chars.next() {
        if let Some(open) = quote {
            out.push(ch);
            if ch == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if ch == open {
                quote = None;
            }
            continue;
        }

        match ch {
            '"' | '\'' => {
                quote = Some(ch);
                out.push(ch);
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for inner in chars.by_ref() {
                    if previous == '*' && inner == '/' {
                        break;
                    }
                    previous = inner;
                }
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            ch if ch.is_whitespace() => {
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            ch => out.push(ch),
        }
    }

    out.trim().to_owned()
}

pub(crate) fn custom_error<'i>(
    location: SourceLocation,
    message: impl Into<String>,
) -> RuleParseError<'i> {
    ParseError {
        kind: ParseErrorKind::Custom(message.into()),
        location,
    }
}

pub(crate) fn into_chart_error(err: RuleParseError<'_>) -> ChartError {
    let message = match err.kind {
        ParseErrorKind::Custom(message) => message,
        ParseErrorKind::Basic(kind) => format!("{kind:?}"),
    };
    ChartError::css(err.location.line + 1, err.location.column, message)
}
