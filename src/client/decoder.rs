//! Response body decoders.

use serde::de::DeserializeOwned;

/// Turns a successful response body into a typed value.
///
/// Closures `Fn(&[u8]) -> anyhow::Result<T>` are decoders too.
///
/// # Examples
///
/// ```
/// use declarative_connect::client::{JsonDecoder, ResponseDecoder};
///
/// let plain_text = |data: &[u8]| -> anyhow::Result<String> {
///     Ok(std::str::from_utf8(data)?.to_owned())
/// };
/// assert_eq!(plain_text.decode(b"hi").unwrap(), "hi");
///
/// let number: u32 = JsonDecoder.decode(b"42").unwrap();
/// assert_eq!(number, 42);
/// ```
pub trait ResponseDecoder<T>: Send + Sync {
    /// Decode `data`, describing what went wrong on failure.
    fn decode(&self, data: &[u8]) -> anyhow::Result<T>;
}

/// Standard JSON decoder.
///
/// An empty body is decoded as JSON `null`, so `()` and `Option<T>` outputs
/// accept `204 No Content` style responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl<T: DeserializeOwned> ResponseDecoder<T> for JsonDecoder {
    fn decode(&self, data: &[u8]) -> anyhow::Result<T> {
        let data = if data.is_empty() { b"null".as_slice() } else { data };
        Ok(serde_json::from_slice(data)?)
    }
}

impl<T, F> ResponseDecoder<T> for F
where
    F: Fn(&[u8]) -> anyhow::Result<T> + Send + Sync,
{
    fn decode(&self, data: &[u8]) -> anyhow::Result<T> {
        self(data)
    }
}

/// Describe a decode failure, including position details for JSON errors.
pub(crate) fn describe(error: &anyhow::Error) -> String {
    match error.downcast_ref::<serde_json::Error>() {
        Some(json) => format!(
            "{:?} error at line {} column {}: {}",
            json.classify(),
            json.line(),
            json.column(),
            error
        ),
        None => format!("{:#}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Todo {
        id: u64,
        title: String,
    }

    #[test]
    fn test_json_decoder() {
        let todo: Todo = JsonDecoder.decode(br#"{"id":1,"title":"milk"}"#).unwrap();
        assert_eq!(todo, Todo { id: 1, title: "milk".into() });
    }

    #[test]
    fn test_empty_body_is_null() {
        let _: () = JsonDecoder.decode(b"").unwrap();
        let nothing: Option<Todo> = JsonDecoder.decode(b"").unwrap();
        assert_eq!(nothing, None);
        assert!(ResponseDecoder::<Todo>::decode(&JsonDecoder, b"").is_err());
    }

    #[test]
    fn test_malformed_json_description() {
        let error = ResponseDecoder::<Todo>::decode(&JsonDecoder, b"{\"id\": 1,").unwrap_err();
        let description = describe(&error);
        assert!(description.starts_with("Eof error at line 1"));
    }

    #[test]
    fn test_missing_field_description() {
        let error = ResponseDecoder::<Todo>::decode(&JsonDecoder, br#"{"id":1}"#).unwrap_err();
        let description = describe(&error);
        assert!(description.contains("missing field `title`"));
    }

    #[test]
    fn test_closure_decoder() {
        let decoder = |data: &[u8]| -> anyhow::Result<usize> { Ok(data.len()) };
        assert_eq!(decoder.decode(b"abc").unwrap(), 3);
    }

    #[test]
    fn test_custom_error_chain() {
        let decoder = |_: &[u8]| -> anyhow::Result<u8> {
            Err(anyhow::anyhow!("inner").context("outer"))
        };
        assert_eq!(describe(&decoder.decode(b"").unwrap_err()), "outer: inner");
    }
}
