pub mod posting;

pub use posting::{InvalidRecord, JobPosting, RawPosting, SalaryRange};
