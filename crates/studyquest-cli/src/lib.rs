//! Interactive terminal shell for StudyQuest.
//!
//! Exposed as a library so integration tests can drive the menu loop with
//! scripted input and captured output.

pub mod app;
