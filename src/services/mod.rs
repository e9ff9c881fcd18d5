pub mod stager;
pub mod storage;
