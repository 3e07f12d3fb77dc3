pub mod check;
pub mod complete;
pub mod document;
pub mod init;
pub mod list;
pub mod rollup;
pub mod scaffold;
pub mod spec;
pub mod status;
