use askama::Template;

use crate::pkg::internal::listing::Kind;

/// Mail handed to a submitter right after posting, carrying their edit link.
///
/// `edit_url` is built by us (config base url plus a percent-encoded token)
/// and goes out unescaped; the submitter's title is escaped.
#[derive(Template)]
#[template(path = "email/created.html")]
pub struct ListingCreated<'a> {
    pub kind: Kind,
    pub title: &'a str,
    pub edit_url: &'a str,
}

impl ListingCreated<'_> {
    pub fn subject(&self) -> String {
        format!("{} Created!", self.kind.title())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_created_mail_carries_link() {
        let mail = ListingCreated {
            kind: Kind::Job,
            title: "Pos <b>",
            edit_url: "http://localhost:8080/jobs/1/edit?token=abc%3D",
        };
        assert_eq!(mail.subject(), "Job Created!");
        let body = mail.render().unwrap();
        assert!(body.contains(r#"href="http://localhost:8080/jobs/1/edit?token=abc%3D""#));
        assert!(body.contains("Pos &lt;b&gt;"));
        assert!(!body.contains("Pos <b>"));
        assert!(body.contains("Edit Job Posting"));
    }
}
