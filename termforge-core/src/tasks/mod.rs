//! Setup task flows
//!
//! Each module is one stage of the install: linear, blocking, no
//! retries. A failed required package aborts the whole run; cosmetic
//! steps (reloading settings, loading X resources) tolerate failure and
//! keep going.

pub mod base;
pub mod desktop;
pub mod editor;
pub mod shell;
pub mod termux;
pub mod uninstall;
