pub mod records;

pub use records::RecordsClient;
pub use reqwest::Method;
