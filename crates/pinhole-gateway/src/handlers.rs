mod health;
mod url;

pub use health::{health_handler, method_not_allowed_handler, not_found_handler};
pub use url::{
    create_url_handler, get_stats_handler, redirect_handler, shorturls_redirect_handler,
};
