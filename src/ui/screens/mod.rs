pub mod menu;
pub mod topic_detail;
pub mod topics;
