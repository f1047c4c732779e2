//! Client for the Mergington High School activities service: fetches
//! the activity catalog, renders it, and submits signups and removals.

pub mod api;
pub mod board;
pub mod catalog;
pub mod config;
pub mod view;

pub use api::{ActivitiesApi, ApiError, HttpActivitiesApi};
pub use board::{ActivityBoard, BoardEvent, ConfirmUnregister, Notice, NoticeKind, SignupForm};
pub use catalog::{Activity, ActivityCatalog};
pub use config::Config;
pub use view::{CatalogView, ListArea};
