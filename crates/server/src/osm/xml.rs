//! OSM 0.6 XML rendering of resource records.

use super::{ChangesetRecord, ChangesetTag, UserProfile};
use askama::Template;

pub const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

#[derive(Template)]
#[template(path = "osm_users.xml")]
struct UsersDocument<'a> {
    users: &'a [UserProfile],
    /// Include the fields only the account owner may see.
    private: bool,
}

struct ChangesetView<'a> {
    record: &'a ChangesetRecord,
    has_user: bool,
    uid: &'a str,
    user: &'a str,
    tags: &'a [ChangesetTag],
}

#[derive(Template)]
#[template(path = "osm_changesets.xml")]
struct ChangesetsDocument<'a> {
    changesets: Vec<ChangesetView<'a>>,
}

/// `<osm>` document with the caller's own user, private fields included.
pub fn render_user_details(profile: &UserProfile) -> askama::Result<String> {
    UsersDocument {
        users: std::slice::from_ref(profile),
        private: true,
    }
    .render()
}

/// `<osm>` document listing public profiles.
pub fn render_users(profiles: &[UserProfile]) -> askama::Result<String> {
    UsersDocument {
        users: profiles,
        private: false,
    }
    .render()
}

pub fn render_changesets(changesets: &[ChangesetRecord]) -> askama::Result<String> {
    let changesets = changesets
        .iter()
        .map(|record| ChangesetView {
            record,
            has_user: record.user.is_some(),
            uid: record.user.as_ref().map_or("", |u| u.uid.as_str()),
            user: record.user.as_ref().map_or("", |u| u.display_name.as_str()),
            tags: &record.tags,
        })
        .collect();
    ChangesetsDocument { changesets }.render()
}
