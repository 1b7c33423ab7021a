//! One validator per action type.
//!
//! Each function takes the enclosing beat id, the action, and the
//! [`ValidationContext`](crate::context::ValidationContext), and returns
//! every violation it can detect — checks never short-circuit on a sibling
//! failure, so an invalid `bus` value does not suppress the `soundId` check.
//!
//! Container actions (`parallel`, `choice`) re-enter the dispatcher for
//! their children and therefore also take the current recursion depth.

pub mod audio;
pub mod background;
pub mod character;
pub mod dialogue;
pub mod flow;
