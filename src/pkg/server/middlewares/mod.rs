pub mod admin;
pub mod signed;

use uuid::Uuid;

use crate::pkg::internal::listing::Kind;

/// How the current edit request was authorized, which decides where its
/// forms post back to and where it lands afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditScope {
    Signed { token: String },
    Admin,
}

impl EditScope {
    pub fn edit_path(&self, kind: Kind, id: Uuid) -> String {
        self.scoped(kind, id, "/edit")
    }

    pub fn update_path(&self, kind: Kind, id: Uuid) -> String {
        self.scoped(kind, id, "")
    }

    pub fn delete_path(&self, kind: Kind, id: Uuid) -> String {
        self.scoped(kind, id, "/delete")
    }

    pub fn done_path(&self) -> &'static str {
        match self {
            EditScope::Signed { .. } => "/",
            EditScope::Admin => "/admin",
        }
    }

    fn scoped(&self, kind: Kind, id: Uuid, suffix: &str) -> String {
        match self {
            EditScope::Signed { token } => format!(
                "/{}/{}{}?token={}",
                kind.collection(),
                id,
                suffix,
                urlencoding::encode(token)
            ),
            EditScope::Admin => format!("/admin/{}/{}{}", kind.collection(), id, suffix),
        }
    }
}
