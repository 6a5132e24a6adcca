pub mod calc;
pub mod clt;
pub mod clt_all;
pub mod scan;
pub mod scan_all;
