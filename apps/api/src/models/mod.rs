// Domain models shared across the extraction, catalog, matching and
// session modules. All wire-facing types use snake_case JSON fields.

pub mod grant;
pub mod profile;
