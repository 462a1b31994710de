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
use std::borrow::Cow;
use std::fmt::{self, Display};

/// Percent encodes a string so it can be placed in a uri query. Every byte outside of
/// `A-Z a-z 0-9 - _ . ~` is escaped, including spaces which become `%20`.
/// # Example
/// ```
/// use rest_uri::encoding::encode;
///
/// assert_eq!(encode("rust lang"), "rust%20lang");
/// assert_eq!(encode("a&b=c"), "a%26b%3Dc");
/// assert_eq!(encode("plain"), "plain");
/// ```
pub fn encode(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// A view over a string that has already been percent encoded. Comparisons against
/// a plain `&str` succeed when the strings are verbatim equal or when the decoded
/// form is equal.
/// # Example
/// ```
/// use rest_uri::encoding::PercentEncodedStr;
///
/// let value = PercentEncodedStr::new("one+%2B+one");
/// assert!(value == "one + one");
/// assert!(value == "one+%2B+one");
/// assert!(value.eq_ignore_case("ONE + ONE"));
/// assert_eq!(value.decode(), "one + one");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentEncodedStr<'a>(&'a str);

impl<'a> PercentEncodedStr<'a> {
    pub fn new(s: &'a str) -> Self {
        PercentEncodedStr(s)
    }

    /// The encoded text
    pub fn inner(&self) -> &'a str {
        self.0
    }

    /// Iterates over the decoded bytes, `+` decodes to a space and malformed
    /// escapes are yielded verbatim.
    pub fn decoded_bytes(&self) -> DecodedBytes<'a> {
        DecodedBytes { bytes: self.0.as_bytes(), pos: 0 }
    }

    /// Decodes the string, invalid utf-8 is replaced with U+FFFD
    pub fn decode(&self) -> String {
        let bytes: Vec<u8> = self.decoded_bytes().collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// ASCII case-insensitive version of `==`
    pub fn eq_ignore_case(&self, rhs: &str) -> bool {
        self.0.eq_ignore_ascii_case(rhs)
            || self.decoded_bytes()
                .map(|b| b.to_ascii_lowercase())
                .eq(rhs.bytes().map(|b| b.to_ascii_lowercase()))
    }
}

impl<'a> PartialEq<&str> for PercentEncodedStr<'a> {
    fn eq(&self, rhs: &&str) -> bool {
        self.0 == *rhs || self.decoded_bytes().eq(rhs.bytes())
    }
}

impl<'a> Display for PercentEncodedStr<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Iterator returned by `PercentEncodedStr::decoded_bytes`
#[derive(Debug, Clone)]
pub struct DecodedBytes<'a> {
    bytes: &'a [u8],
    pos: usize,
}

fn hex_to_byte(hex: u8) -> Option<u8> {
    match hex {
        b'0'..=b'9' => Some(hex - b'0'),
        b'A'..=b'F' => Some(hex - b'A' + 10),
        b'a'..=b'f' => Some(hex - b'a' + 10),
        _ => None,
    }
}

impl<'a> DecodedBytes<'a> {
    // the byte encoded by the `%XX` at the current position
    fn escape(&self) -> Option<u8> {
        let high = self.bytes.get(self.pos + 1).copied().and_then(hex_to_byte)?;
        let low = self.bytes.get(self.pos + 2).copied().and_then(hex_to_byte)?;
        Some(high * 0x10 + low)
    }
}

impl<'a> Iterator for DecodedBytes<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos)?;
        match byte {
            b'%' => match self.escape() {
                Some(decoded) => {
                    self.pos += 3;
                    Some(decoded)
                }
                None => {
                    self.pos += 1;
                    Some(b'%')
                }
            },
            b'+' => {
                self.pos += 1;
                Some(b' ')
            }
            other => {
                self.pos += 1;
                Some(other)
            }
        }
    }
}

/* ============================================================================================ */
/*     Test Cases                                                                               */
/* ============================================================================================ */
#[test]
fn test_encode_reserved() {
    assert_eq!(encode("fooVal"), "fooVal");
    assert_eq!(encode("a b/c?d"), "a%20b%2Fc%3Fd");
    assert_eq!(encode(""), "");
}

#[test]
fn test_decoded_equality() {
    let value = PercentEncodedStr::new("Hello%20World");
    assert!(value == "Hello World");
    assert!(value == "Hello%20World");
    assert!(!(value == "Hello+World"));
    assert!(PercentEncodedStr::new("Hello+World") == "Hello World");
}

#[test]
fn test_malformed_escape() {
    let value = PercentEncodedStr::new("100%");
    assert_eq!(value.decode(), "100%");
    let value = PercentEncodedStr::new("%zz1");
    assert_eq!(value.decode(), "%zz1");
    let value = PercentEncodedStr::new("%4");
    assert_eq!(value.decode(), "%4");
}

#[test]
fn test_multibyte_round_trip() {
    let encoded = encode("größe");
    assert_eq!(PercentEncodedStr::new(&encoded).decode(), "größe");
}

#[test]
fn test_ignore_case() {
    let value = PercentEncodedStr::new("Foo%2Fbar");
    assert!(value.eq_ignore_case("foo/BAR"));
    assert!(value.eq_ignore_case("FOO%2fBAR"));
    assert!(!value.eq_ignore_case("foo/baz"));
}
