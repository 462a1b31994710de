// MIT License
//
// Copyright (c) 2020 Jonathon Davis
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
use crate::{Error, Result};

/// A `{name}` placeholder found in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateToken<'a> {
    name: &'a str,
    position: usize,
}

impl<'a> TemplateToken<'a> {
    /// The text between the braces
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Byte offset of the opening brace
    pub fn position(&self) -> usize {
        self.position
    }

    /// Length in bytes of the placeholder including both braces
    pub fn len(&self) -> usize {
        self.name.len() + 2
    }

    pub fn placeholder(&self) -> String {
        format!("{{{}}}", self.name)
    }
}

/// Scans a template for placeholders in order of appearance. Repeated names are
/// yielded once per occurrence. A brace without a partner or an empty `{}` yields
/// an error and ends the scan.
/// # Example
/// ```
/// use rest_uri::template::tokens;
///
/// let names: Vec<&str> = tokens("api/{make}/cars/{id}")
///     .map(|token| token.map(|t| t.name()))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(names, vec!["make", "id"]);
///
/// assert!(tokens("api/{make").next().unwrap().is_err());
/// ```
pub fn tokens(template: &str) -> Tokens<'_> {
    Tokens { template, pos: 0, done: false }
}

/// Iterator returned by `tokens`
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    template: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Tokens<'a> {
    fn fail(&mut self, err: Error) -> Option<Result<TemplateToken<'a>>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<TemplateToken<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let rest = &self.template[self.pos..];
        let open = match rest.find(&['{', '}'][..]) {
            Some(offset) => self.pos + offset,
            None => {
                self.done = true;
                return None;
            }
        };
        if self.template.as_bytes()[open] == b'}' {
            return self.fail(Error::MalformedTemplate { brace: '}', position: open });
        }
        // the name runs until the next brace of either kind, which has to be a closing one
        let body = &self.template[open + 1..];
        let close = match body.find(&['{', '}'][..]) {
            Some(offset) if body.as_bytes()[offset] == b'}' => open + 1 + offset,
            _ => return self.fail(Error::MalformedTemplate { brace: '{', position: open }),
        };
        if close == open + 1 {
            return self.fail(Error::EmptyPlaceholder(open));
        }
        self.pos = close + 1;
        Some(Ok(TemplateToken { name: &self.template[open + 1..close], position: open }))
    }
}

/* ============================================================================================ */
/*     Test Cases                                                                               */
/* ============================================================================================ */
#[cfg(test)]
fn scan(template: &str) -> Result<Vec<TemplateToken<'_>>> {
    tokens(template).collect()
}

#[test]
fn test_no_tokens() {
    assert!(scan("api/cars").unwrap().is_empty());
    assert!(scan("").unwrap().is_empty());
}

#[test]
fn test_token_positions() {
    let found = scan("api/cars/{id}?name={name}").unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].name(), "id");
    assert_eq!(found[0].position(), 9);
    assert_eq!(found[0].len(), 4);
    assert_eq!(found[1].name(), "name");
    assert_eq!(found[1].placeholder(), "{name}");
    assert_eq!(&"api/cars/{id}?name={name}"[found[1].position()..found[1].position() + found[1].len()], "{name}");
}

#[test]
fn test_duplicate_tokens() {
    let names: Vec<&str> = scan("{a}/{b}/{a}").unwrap().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["a", "b", "a"]);
}

#[test]
fn test_unbalanced_open() {
    assert!(matches!(scan("api/{id"), Err(Error::MalformedTemplate { brace: '{', position: 4 })));
    assert!(matches!(scan("api/{a{b}"), Err(Error::MalformedTemplate { brace: '{', position: 4 })));
}

#[test]
fn test_unbalanced_close() {
    assert!(matches!(scan("api/id}"), Err(Error::MalformedTemplate { brace: '}', position: 6 })));
    assert!(matches!(scan("{a}}"), Err(Error::MalformedTemplate { brace: '}', position: 3 })));
}

#[test]
fn test_empty_placeholder() {
    assert!(matches!(scan("api/{}"), Err(Error::EmptyPlaceholder(4))));
}

#[test]
fn test_scan_stops_after_error() {
    let mut iter = tokens("{a}/}/{b}");
    assert!(iter.next().unwrap().is_ok());
    assert!(iter.next().unwrap().is_err());
    assert!(iter.next().is_none());
}

#[test]
fn test_multibyte_text() {
    let found = scan("größe/{maß}").unwrap();
    assert_eq!(found[0].name(), "maß");
}
