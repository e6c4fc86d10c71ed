pub mod job_query;
pub mod job_service;
pub mod stats_service;
