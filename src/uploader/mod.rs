// Main uploader module - builds the multipart request and talks to the image host

pub mod host_client;
pub mod response;

pub use host_client::HostClient;
pub use response::{parse_upload_response, UploadedImage};
