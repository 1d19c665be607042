//! Pure domain logic shared by the pipelines
//! CV records, skill gaps, verification, job filtering and roadmaps

pub mod cv_data;
pub mod jobs;
pub mod roadmap;
pub mod skills;
pub mod verification;

pub use cv_data::{CvData, PersonalInfo};
pub use jobs::JobListing;
pub use roadmap::Roadmap;
pub use verification::{VerificationOutcome, VerificationQuestion};
