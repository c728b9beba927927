//! Trip planning front end for a fixed destination.
//!
//! A web application that answers: "how do I get there from here?" It
//! resolves the destination's stop once, looks up stops for the visitor's
//! start address, and hands the chosen trip to the regional journey planner
//! as a deep link.

pub mod cache;
pub mod config;
pub mod controller;
pub mod deeplink;
pub mod domain;
pub mod efa;
pub mod web;
