pub mod candidate;
pub mod job;
pub mod resume;

pub use candidate::{Candidate, Stage, StatusColor};
pub use job::{EmploymentType, Job, JobStatus, NewJob, Priority, Qualification};
pub use resume::ResumeRecord;
