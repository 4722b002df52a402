pub mod google_oauth_response;

pub use google_oauth_response::GoogleTokenResponse;
