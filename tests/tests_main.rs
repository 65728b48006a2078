#[path = "helpers/mod.rs"]
mod helpers;

#[path = "scenarios/mod.rs"]
mod scenarios;
