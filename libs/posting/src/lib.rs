//! Types shared between the prediction API and the popup client.
//!
//! Both sides of the `/api/job` and `/api/predict` boundary deserialize into
//! these types, so the wire shape is defined in exactly one place.

pub mod ashby_url;
pub mod job;

pub use ashby_url::{parse_ashby_url, AshbyUrl, ASHBY_JOBS_HOST};
pub use job::{Compensation, JobPosting};
