//! Internet radio station browser.
//!
//! Looks stations up in a public station directory, keeps only the ones a
//! browser can play (MP3 over https), screens names and search text for
//! profanity, and renders the results as HTML.

pub mod config;
pub mod directory;
pub mod domain;
pub mod geo;
pub mod pipeline;
pub mod policy;
pub mod web;
