use thiserror::Error;

/// Errors that can occur when constructing a page request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageRequestError {
    #[error("Invalid page: pages are numbered from 1")]
    InvalidPage,
    #[error("Invalid page size: must be at least 1")]
    InvalidPageSize,
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Missing required key attribute: {0}")]
    MissingKey(&'static str),
    #[error("Unable to decode attribute '{attribute}' as {expected}")]
    TypeMismatch {
        attribute: String,
        expected: &'static str,
    },
    #[error("Malformed value for attribute '{attribute}': {value:?}")]
    MalformedValue { attribute: String, value: String },
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Store request failed: {0}")]
    Transport(String),
    #[error("Pagination made no progress: continuation key repeated")]
    PaginationStalled,
    #[error("Operation cancelled")]
    Cancelled,
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<PageRequestError> for RepositoryError {
    fn from(err: PageRequestError) -> Self {
        RepositoryError::InvalidData(err.to_string())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_error_display() {
        assert_eq!(
            PageRequestError::InvalidPage.to_string(),
            "Invalid page: pages are numbered from 1"
        );
    }

    #[test]
    fn test_repository_error_type_mismatch_names_attribute() {
        let error = RepositoryError::TypeMismatch {
            attribute: "Age".to_string(),
            expected: "integer",
        };
        assert_eq!(
            error.to_string(),
            "Unable to decode attribute 'Age' as integer"
        );
    }

    #[test]
    fn test_repository_error_malformed_value_display() {
        let error = RepositoryError::MalformedValue {
            attribute: "InStocked".to_string(),
            value: "ten".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed value for attribute 'InStocked': \"ten\""
        );
    }

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Product",
            id: "9900000001/P001".to_string(),
        };
        assert_eq!(error.to_string(), "Product not found: 9900000001/P001");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Product",
            id: "9900000001/P001".to_string(),
        };
        assert_eq!(error.to_string(), "Product already exists: 9900000001/P001");
    }

    #[test]
    fn test_repository_error_missing_key_display() {
        let error = RepositoryError::MissingKey("ProductId");
        assert_eq!(error.to_string(), "Missing required key attribute: ProductId");
    }

    #[test]
    fn test_repository_error_transport_display() {
        let error = RepositoryError::Transport("Throughput exceeded, please retry".to_string());
        assert_eq!(
            error.to_string(),
            "Store request failed: Throughput exceeded, please retry"
        );
    }

    #[test]
    fn test_page_request_error_converts_to_invalid_data() {
        let error: RepositoryError = PageRequestError::InvalidPageSize.into();
        assert!(matches!(error, RepositoryError::InvalidData(_)));
    }
}
