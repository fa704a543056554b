//! Commit history traversal
//!
//! - `rev_list`: first-parent history of one commit, and every commit
//!   reachable from a set of branch tips
//! - `log_entry`: the text block printed for one commit
//!
//! Plain history follows first parents only, so the side of a merge that was
//! merged in does not show up. The global view follows both parents.

pub mod log_entry;
pub mod rev_list;
