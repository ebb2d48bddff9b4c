use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The page could not be fetched (DNS, connect, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A required markup region matched zero elements.
    #[error("Missing required element for {field}: selector `{selector}` matched nothing")]
    MissingElement { field: &'static str, selector: String },

    #[error("Invalid selector for {field} (`{selector}`): {reason}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        reason: String,
    },

    #[error("Invalid publication timestamp `{value}`: {source}")]
    DateParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// An offline fetcher holds no page for the URL.
    #[error("No stored page for {0}")]
    PageNotFound(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// True when the failure came from the network rather than the page or the model.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// True when the page was fetched but does not have the expected shape.
    pub fn is_markup(&self) -> bool {
        matches!(self, Error::MissingElement { .. } | Error::DateParse { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_message() {
        let err = Error::MissingElement {
            field: "title",
            selector: "h1#main-heading".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required element for title: selector `h1#main-heading` matched nothing"
        );
        assert!(err.is_markup());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_date_parse_is_markup() {
        let source = chrono::NaiveDate::parse_from_str("nope", "%Y").unwrap_err();
        let err = Error::DateParse {
            value: "nope".to_string(),
            source,
        };
        assert!(err.is_markup());
        assert!(err.to_string().starts_with("Invalid publication timestamp `nope`"));
    }

    #[test]
    fn test_page_not_found_is_neither_transport_nor_markup() {
        let err = Error::PageNotFound("https://a.test/2".to_string());
        assert_eq!(err.to_string(), "No stored page for https://a.test/2");
        assert!(!err.is_transport());
        assert!(!err.is_markup());
    }
}
