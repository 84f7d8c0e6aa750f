//! Transit route planner server.
//!
//! A web application that answers: "what is the best way from this station
//! to that one, by time or by cost, counting every change of mode?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod knowledge;
pub mod planner;
pub mod web;
