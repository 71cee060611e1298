#![allow(warnings)]
//! Meal Planner Frontend Entry Point

mod actions;
mod alerts;
mod api;
mod app;
mod components;
mod config;
mod context;
mod cook;
mod dates;
mod edit_session;
mod error;
mod models;
mod pantry_sort;
mod panels;
mod planner;
mod refresh;
mod store;
mod tags;
mod validation;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"[app] logger already initialized".into());
    }
    mount_to_body(App);
}
