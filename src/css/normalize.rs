/// Indentation unit used for nested blocks.
const INDENT: &str = "    ";

/// Re-formats a stylesheet into one statement per line.
///
/// Every rule prelude ends with ` {` on its own line, every declaration sits
/// on its own indented line as `property: value;`, closing braces get their
/// own line and top-level rules are separated by a blank line. Strings,
/// comments and parenthesized values (`url(data:...;...)`) are copied
/// verbatim, so the output parses to the same rules with stable line numbers.
#[must_use]
pub fn normalize(css: &str) -> String {
    let mut formatter = Formatter::default();
    let mut chars = css.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' | '\'' => {
                formatter.pending.push(ch);
                while let Some(inner) = chars.next() {
                    formatter.pending.push(inner);
                    if inner == '\\' {
                        if let Some(escaped) = chars.next() {
                            formatter.pending.push(escaped);
                        }
                    } else if inner == ch {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                formatter.pending.push('/');
                if let Some(star) = chars.next() {
                    formatter.pending.push(star);
                }
                let mut previous = '\0';
                for inner in chars.by_ref() {
                    formatter.pending.push(inner);
                    if previous == '*' && inner == '/' {
                        break;
                    }
                    previous = inner;
                }
            }
            '(' => {
                formatter.paren_depth += 1;
                formatter.pending.push(ch);
            }
            ')' => {
                formatter.paren_depth = formatter.paren_depth.saturating_sub(1);
                formatter.pending.push(ch);
            }
            '{' if formatter.paren_depth == 0 => formatter.open_block(),
            ';' if formatter.paren_depth == 0 => formatter.end_statement(),
            '}' if formatter.paren_depth == 0 => formatter.close_block(),
            ch if ch.is_whitespace() => {
                if !formatter.pending.is_empty() && !formatter.pending.ends_with(' ') {
                    formatter.pending.push(' ');
                }
            }
            ch => formatter.pending.push(ch),
        }
    }

    formatter.finish()
}

#[derive(Default)]
struct Formatter {
    out: String,
    pending: String,
    depth: usize,
    paren_depth: usize,
}

impl Formatter {
    fn write_line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn take_pending(&mut self) -> String {
        let text = self.pending.trim().to_owned();
        self.pending.clear();
        text
    }

    fn open_block(&mut self) {
        let prelude = self.take_pending();
        let line = if prelude.is_empty() {
            "{".to_owned()
        } else {
            format!("{prelude} {{")
        };
        self.write_line(&line);
        self.depth += 1;
    }

    fn end_statement(&mut self) {
        let statement = self.take_pending();
        if statement.is_empty() {
            return;
        }
        let line = if self.depth > 0 {
            format!("{};", format_declaration(&statement))
        } else {
            format!("{statement};")
        };
        self.write_line(&line);
    }

    fn close_block(&mut self) {
        let trailing = self.take_pending();
        if !trailing.is_empty() && self.depth > 0 {
            let line = format!("{};", format_declaration(&trailing));
            self.write_line(&line);
        } else if !trailing.is_empty() {
            self.write_line(&trailing);
        }

        // A stray `}` is kept so the parser can report it at a real line.
        self.depth = self.depth.saturating_sub(1);
        self.write_line("}");
        if self.depth == 0 {
            self.out.push('\n');
        }
    }

    fn finish(mut self) -> String {
        let trailing = self.take_pending();
        if !trailing.is_empty() {
            self.write_line(&trailing);
        }
        while self.depth > 0 {
            self.depth -= 1;
            self.write_line("}");
        }
        let trimmed_len = self.out.trim_end().len();
        self.out.truncate(trimmed_len);
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out
    }
}

/// `color:red` -> `color: red`. At-rules and nested preludes are left alone.
fn format_declaration(statement: &str) -> String {
    if statement.starts_with('@') {
        return statement.to_owned();
    }
    match statement.split_once(':') {
        Some((property, value)) => format!("{}: {}", property.trim(), value.trim()),
        None => statement.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn splits_rules_and_declarations_onto_lines() {
        let out = normalize(".a{color:red} #b{color:blue;margin:0}");
        assert_eq!(
            out,
            ".a {\n    color: red;\n}\n\n#b {\n    color: blue;\n    margin: 0;\n}\n"
        );
    }

    #[test]
    fn indents_container_rules() {
        let out = normalize("@media screen{.a{color:red}}");
        assert_eq!(
            out,
            "@media screen {\n    .a {\n        color: red;\n    }\n}\n"
        );
    }

    #[test]
    fn keeps_semicolons_inside_urls_and_strings() {
        let out = normalize(".a{background:url(data:image/png;base64,AA);content:\"x;y\"}");
        assert!(out.contains("background: url(data:image/png;base64,AA);"));
        assert!(out.contains("content: \"x;y\";"));
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize("   \n"), "");
    }
}
