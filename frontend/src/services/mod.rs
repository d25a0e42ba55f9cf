pub mod browser;
pub mod generate;
pub mod storage;
