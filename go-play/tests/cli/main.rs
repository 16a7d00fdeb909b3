mod common;

mod config;
mod human;
mod ko;
mod scripted;
mod territory;
