//! Authorization-header credential extraction.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use super::error::Error;

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// Only the scheme word is validated. `"Bearer "` with an empty remainder
/// returns an empty token, not an error; the empty value then fails closed
/// at verification or lookup.
///
/// # Errors
///
/// Returns [`Error::MissingHeader`] when the header is absent or empty and
/// [`Error::MalformedHeader`] when the scheme is not exactly `Bearer`.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, Error> {
    scheme_token(headers, "Bearer")
}

/// Extract the key from an `Authorization: ApiKey <key>` header.
///
/// Same contract as [`bearer_token`] with the `ApiKey` scheme literal.
///
/// # Errors
///
/// Returns [`Error::MissingHeader`] or [`Error::MalformedHeader`] as above.
pub fn api_key(headers: &HeaderMap) -> Result<String, Error> {
    scheme_token(headers, "ApiKey")
}

fn scheme_token(headers: &HeaderMap, scheme: &str) -> Result<String, Error> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if value.is_empty() {
        return Err(Error::MissingHeader);
    }

    let mut words = value.split(' ');
    match words.next() {
        Some(word) if word == scheme => {}
        _ => return Err(Error::MalformedHeader),
    }

    // The word after the scheme, which may be empty ("Bearer ").
    words
        .next()
        .map(ToString::to_string)
        .ok_or(Error::MalformedHeader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_token_cases() {
        struct Case {
            name: &'static str,
            headers: HeaderMap,
            want: Result<&'static str, ()>,
        }

        let cases = [
            Case {
                name: "valid token",
                headers: headers_with("Bearer some-valid-token"),
                want: Ok("some-valid-token"),
            },
            Case {
                name: "no authorization header",
                headers: HeaderMap::new(),
                want: Err(()),
            },
            Case {
                name: "empty authorization header",
                headers: headers_with(""),
                want: Err(()),
            },
            Case {
                name: "invalid authorization format",
                headers: headers_with("InvalidTokenFormat"),
                want: Err(()),
            },
            Case {
                name: "empty token after scheme",
                headers: headers_with("Bearer "),
                want: Ok(""),
            },
        ];

        for case in cases {
            let got = bearer_token(&case.headers);
            match case.want {
                Ok(token) => {
                    assert_eq!(got.ok().as_deref(), Some(token), "{}", case.name);
                }
                Err(()) => assert!(got.is_err(), "{}", case.name),
            }
        }
    }

    #[test]
    fn api_key_cases() {
        struct Case {
            name: &'static str,
            headers: HeaderMap,
            want: Result<&'static str, ()>,
        }

        let cases = [
            Case {
                name: "valid key",
                headers: headers_with("ApiKey some-valid-key"),
                want: Ok("some-valid-key"),
            },
            Case {
                name: "no authorization header",
                headers: HeaderMap::new(),
                want: Err(()),
            },
            Case {
                name: "empty authorization header",
                headers: headers_with(""),
                want: Err(()),
            },
            Case {
                name: "invalid authorization format",
                headers: headers_with("InvalidTokenFormat"),
                want: Err(()),
            },
            Case {
                name: "bearer scheme is not an api key",
                headers: headers_with("Bearer some-valid-token"),
                want: Err(()),
            },
            Case {
                name: "empty key after scheme",
                headers: headers_with("ApiKey "),
                want: Ok(""),
            },
        ];

        for case in cases {
            let got = api_key(&case.headers);
            match case.want {
                Ok(key) => assert_eq!(got.ok().as_deref(), Some(key), "{}", case.name),
                Err(()) => assert!(got.is_err(), "{}", case.name),
            }
        }
    }

    #[test]
    fn missing_and_malformed_are_distinct() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(Error::MissingHeader)
        ));
        assert!(matches!(
            bearer_token(&headers_with("Basic dXNlcjpwYXNz")),
            Err(Error::MalformedHeader)
        ));
        // Scheme word alone, without the space, is malformed.
        assert!(matches!(
            bearer_token(&headers_with("Bearer")),
            Err(Error::MalformedHeader)
        ));
    }

    #[test]
    fn token_is_first_word_after_scheme() {
        let got = bearer_token(&headers_with("Bearer one two"));
        assert_eq!(got.ok().as_deref(), Some("one"));
    }
}
