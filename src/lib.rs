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

/*!
The rest_uri crate builds the request uris of a typed REST client. A uri template holds
`{placeholder}` tokens, the reserved `{id}` placeholder binds to a resource's identifier
and every other placeholder consumes the query parameter with the same name. Parameters
left over after substitution are appended as the query string.

# Templates
```
use rest_uri::{build, resolve, QueryParameters};
use serde::Serialize;

#[derive(Serialize)]
struct Search { #[serde(rename = "Name")] name: &'static str, page: u32 }

// the identifier fills {id}
assert_eq!(resolve("api/cars/{id}", Some(&42), None).unwrap(), "api/cars/42");

// named placeholders consume the matching parameter, the rest become the query string
let params = QueryParameters::from_object(&Search { name: "Foo", page: 2 }).unwrap();
let uri = build("https://example.com", "api/cars?name={name}", None, Some(params)).unwrap();
assert_eq!(uri, "https://example.com/api/cars?name=foo&page=2");
```
# Requests
```
use rest_uri::client::RestResource;
use serde::Serialize;

#[derive(Serialize)]
struct Car { make: String }

let cars = RestResource::<Car>::new("https://example.com", "api/cars/{id}");
let request = cars.delete(&7).unwrap();
assert_eq!(request.uri(), "https://example.com/api/cars/7");
```
*/
extern crate http;

#[macro_use]
mod macros;
mod error;

pub mod client;
pub mod encoding;
pub mod query;
pub mod template;

pub use error::{Error, Result};
pub use query::{QueryParameter, QueryParameters};
pub use template::{build, resolve};
