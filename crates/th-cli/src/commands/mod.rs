pub mod animal;
pub mod cabinet;
pub mod chart;
pub mod container;
pub mod dispatch;
pub mod init;
pub mod logs;
pub mod options;
pub mod schema;
pub mod shared;
pub mod slot;
pub mod species;
pub mod sync;
