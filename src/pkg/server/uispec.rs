use askama::Template;

use super::flash::Flash;
use crate::pkg::internal::adaptors::{jobs::spec::Job, roles::spec::Role};

#[derive(Template)]
#[template(path = "index.html")]
pub struct Index<'a> {
    pub jobs: &'a [Job],
    pub roles: &'a [Role],
    pub flash: &'a Flash,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct About<'a> {
    pub flash: &'a Flash,
}

#[derive(Template)]
#[template(path = "new.html")]
pub struct NewJobPage<'a> {
    pub flash: &'a Flash,
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditJobPage<'a> {
    pub job: &'a Job,
    pub action: String,
    pub delete_action: String,
    pub flash: &'a Flash,
}

#[derive(Template)]
#[template(path = "view.html")]
pub struct ViewJobPage<'a> {
    pub job: &'a Job,
    pub description: String,
    pub flash: &'a Flash,
}

#[derive(Template)]
#[template(path = "newrole.html")]
pub struct NewRolePage<'a> {
    pub flash: &'a Flash,
}

#[derive(Template)]
#[template(path = "editrole.html")]
pub struct EditRolePage<'a> {
    pub role: &'a Role,
    pub action: String,
    pub delete_action: String,
    pub flash: &'a Flash,
}

#[derive(Template)]
#[template(path = "viewrole.html")]
pub struct ViewRolePage<'a> {
    pub role: &'a Role,
    pub resume: String,
    pub flash: &'a Flash,
}

/// Moderation panel; every listing with links into the admin edit routes.
#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminPage<'a> {
    pub jobs: &'a [Job],
    pub roles: &'a [Role],
    pub flash: &'a Flash,
}
