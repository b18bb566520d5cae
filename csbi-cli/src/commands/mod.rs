pub mod decode;
pub mod pack;
pub mod profile;
pub mod scan;
