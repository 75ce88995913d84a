mod error;
mod http_mapping;
mod traits;
mod types;
mod validation;

pub use error::{PageRequestError, RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use traits::ProductRepository;
pub use types::{PageRequest, DEFAULT_PAGE_SIZE};
pub use validation::{
    require_institution_code, require_institution_code_format, require_insertable,
    require_product_key, require_query, require_updatable,
};
