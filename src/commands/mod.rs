//! User-facing operations
//!
//! Every verb of the command line is a method on `Repository`, defined in its
//! own file under `porcelain`. Methods write their normal output to the
//! repository writer and report refusals as `TwigError`.

pub mod porcelain;
