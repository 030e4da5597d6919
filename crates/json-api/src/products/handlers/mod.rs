//! Product Handlers

pub(crate) mod bulk_delete;
pub(crate) mod bulk_update;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod get_by_uuid;
pub(crate) mod index;
pub(crate) mod update;
