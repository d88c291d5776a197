//! Generated class names and the page's collected stylesheet.

use std::cmp::Ordering;
use std::fmt::Write;

/// Hands out short hexadecimal class names, skipping any that would start with a
/// digit and so not be a valid CSS identifier.
#[derive(Debug, Default, Clone)]
pub struct ClassNames {
    counter: u64,
}

impl ClassNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make(&mut self) -> String {
        loop {
            let name = format!("{:x}", self.counter);
            self.counter += 1;
            if name.starts_with(|c: char| !c.is_ascii_digit()) {
                return name;
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Rule {
    css: String,
    index: Vec<f64>,
}

/// CSS blocks collected while the page renders, emitted in sort-index order.
///
/// Indices compare element by element; a shorter index sorts before any longer one
/// sharing its prefix, and rules with equal indices keep insertion order. Media
/// query overrides rely on this to land after their defaults.
#[derive(Debug, Default, Clone)]
pub struct StyleSheet {
    rules: Vec<Rule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, css: impl Into<String>) {
        self.add_indexed(css, Vec::new());
    }

    pub fn add_indexed(&mut self, css: impl Into<String>, index: Vec<f64>) {
        self.rules.push(Rule {
            css: css.into(),
            index,
        });
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Concatenates every rule, minified when `minify` is set.
    pub fn build(&self, minify: bool) -> String {
        let mut rules: Vec<&Rule> = self.rules.iter().collect();
        rules.sort_by(|a, b| compare_index(&a.index, &b.index));

        let mut out = String::new();
        for rule in rules {
            let _ = writeln!(out, "/* Index: {} */", format_index(&rule.index));
            let _ = writeln!(out, "{}", rule.css.trim());
        }

        if minify {
            minify_css(&out)
        } else {
            out
        }
    }
}

pub fn compare_index(a: &[f64], b: &[f64]) -> Ordering {
    match (a.first(), b.first()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => match x.total_cmp(y) {
            Ordering::Equal => compare_index(&a[1..], &b[1..]),
            other => other,
        },
    }
}

fn format_index(index: &[f64]) -> String {
    let parts: Vec<String> = index.iter().map(|value| value.to_string()).collect();
    format!("[{}]", parts.join(","))
}

/// Strips comments and collapses whitespace. String literals are left alone.
pub fn minify_css(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut chars = css.chars().peekable();
    let mut pending_space = false;

    while let Some(c) = chars.next() {
        match c {
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for next in chars.by_ref() {
                    if previous == '*' && next == '/' {
                        break;
                    }
                    previous = next;
                }
                pending_space = true;
            }
            '"' | '\'' => {
                flush_space(&mut out, &mut pending_space, c);
                out.push(c);
                for next in chars.by_ref() {
                    out.push(next);
                    if next == c {
                        break;
                    }
                }
            }
            c if c.is_whitespace() => pending_space = true,
            c => {
                flush_space(&mut out, &mut pending_space, c);
                out.push(c);
            }
        }
    }

    out
}

fn flush_space(out: &mut String, pending: &mut bool, next: char) {
    if *pending {
        let after_punct = out.ends_with(['{', '}', ';', ':', ',', '>', '(']) || out.is_empty();
        let before_punct = matches!(next, '{' | '}' | ';' | ':' | ',' | '>' | ')');
        if !after_punct && !before_punct {
            out.push(' ');
        }
        *pending = false;
    }
}
