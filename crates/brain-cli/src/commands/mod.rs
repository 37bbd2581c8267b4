pub mod boot;
pub mod delete;
pub mod deprecate;
pub mod init;
pub mod query;
pub mod show;
pub mod update;
pub mod validate;
pub mod write;
