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
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure raised while building a request uri. Nothing here is retried, the
/// error is raised before any request exists.
#[derive(Debug, Error)]
pub enum Error {
    /// A placeholder could not be bound to the identifier or to a query parameter
    #[error("insufficient parameters: no value for placeholder `{0}`")]
    InsufficientParameters(String),
    /// The template holds the identifier placeholder but no identifier was given
    #[error("the template requires an identifier but none was supplied")]
    MissingIdentifier,
    #[error("malformed template: unbalanced `{brace}` at position {position}")]
    MalformedTemplate { brace: char, position: usize },
    #[error("malformed template: empty placeholder at position {0}")]
    EmptyPlaceholder(usize),
    #[error("argument `{0}` cannot be null")]
    NullArgument(&'static str),
    #[error("query parameter keys cannot be empty")]
    EmptyKey,
    #[error("property `{0}` cannot be written to a query string")]
    UnsupportedValue(String),
    #[error("query parameters can only be read from a struct or a map, found {0}")]
    UnsupportedSource(&'static str),
    #[error("refusing to build a request for `{0}`, https is required")]
    InsecureScheme(String),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidUri(#[from] http::uri::InvalidUri),
    #[error(transparent)]
    Http(#[from] http::Error),
}

#[test]
fn test_error_messages() {
    assert_eq!(
        Error::InsufficientParameters("surname".into()).to_string(),
        "insufficient parameters: no value for placeholder `surname`"
    );
    assert_eq!(
        Error::MalformedTemplate { brace: '{', position: 4 }.to_string(),
        "malformed template: unbalanced `{` at position 4"
    );
}
