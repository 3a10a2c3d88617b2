pub mod auth;
pub mod command;
pub mod controller;
pub mod domain;
pub mod library;
pub mod repository;
