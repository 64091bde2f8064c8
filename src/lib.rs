//! Monty Frontend
//!
//! Classroom management client for a Montessori teacher: students,
//! observations, schedule, materials, daily tracking, reports, settings
//! and an assistant chat, all backed by a REST API.

pub mod api;
pub mod app;
pub mod cache;
pub mod calendar;
pub mod chat;
pub mod components;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod logger;
pub mod markdown;
pub mod models;
pub mod notice;
pub mod pages;
pub mod resource;
pub mod session;
pub mod settings;
pub mod storage;
pub mod store;
