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

/// Builds a `QueryParameters` collection from literal pairs
///
/// Keys and values can be anything that implements `Display`, values are
/// percent encoded as they are added. The macro evaluates to a
/// `rest_uri::Result<QueryParameters>` since an empty key is rejected.
/// # Example
/// ```rust
/// #[macro_use] extern crate rest_uri;
///
/// # fn main() {
/// let params = query_params!{ "make" => "Aston Martin", "year" => 1964 }.unwrap();
/// assert_eq!(params.to_string(), "make=Aston%20Martin&year=1964");
///
/// let empty = query_params!{}.unwrap();
/// assert!(empty.is_empty());
/// # }
/// ```
/// The macro expands into the following:
/// ```ignore
/// // query_params!{ $key => $value, ... }
/// QueryParameters::from_pairs(vec![($key.to_string(), $value.to_string()), ...])
/// ```
#[macro_export] macro_rules! query_params {
    () => {
        Ok::<_, $crate::Error>($crate::QueryParameters::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::QueryParameters::from_pairs(vec![$(($key.to_string(), $value.to_string())),+])
    };
}

#[test]
fn test_query_params() {
    let params = query_params!{ "Name" => "Foo", "page" => 2, }.unwrap();
    assert_eq!(params.len(), 2);
    assert!(params.get("name").unwrap().value() == "Foo");
    assert!(matches!(query_params!{ "" => 1 }, Err(crate::Error::EmptyKey)));
}
