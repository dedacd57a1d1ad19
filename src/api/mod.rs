use rocket::{Catcher, Route};

pub(crate) mod common;

mod choices;
mod questions;
mod root;

/// All routes of the API.
pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(root::routes());
    routes.extend(questions::routes());
    routes.extend(choices::routes());
    routes
}

/// Catchers producing the empty-bodied error responses the API promises.
pub fn catchers() -> Vec<Catcher> {
    catchers![bad_request, not_found]
}

#[catch(400)]
fn bad_request() {}

#[catch(404)]
fn not_found() {}
