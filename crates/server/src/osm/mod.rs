//! Minimal OpenStreetMap API 0.6 resources answered for resolved identities.
//!
//! Records are plain data; [`xml`] renders them into the OSM wire format.

pub mod xml;

use crate::config::AccountConfig;
use crate::entity::Identity;
use crate::oauth1::IdentityRegistry;
use serde::Serialize;
use utoipa::ToSchema;

/// Profile of a user as exposed by `/user/details` and `/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub account_created: String,
    pub description: String,
    pub contributor_terms_agreed: bool,
    pub changesets_count: u32,
    pub traces_count: u32,
    pub languages: Vec<String>,
    /// `false` for the placeholder answered in place of an unregistered id.
    pub known: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Attribution {
    pub uid: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChangesetTag {
    pub k: String,
    pub v: String,
}

/// The single synthetic changeset every user appears to have uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChangesetRecord {
    pub id: u64,
    pub created_at: String,
    pub closed_at: String,
    pub open: bool,
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
    pub comments_count: u32,
    pub changes_count: u32,
    pub user: Option<Attribution>,
    pub tags: Vec<ChangesetTag>,
}

pub const FIXTURE_CHANGESET_ID: u64 = 1;

/// Answers resource queries on behalf of resolved (or unknown) identities.
#[derive(Clone)]
pub struct ResourceFacade {
    registry: IdentityRegistry,
    account: AccountConfig,
}

impl ResourceFacade {
    pub fn new(registry: IdentityRegistry, account: AccountConfig) -> Self {
        Self { registry, account }
    }

    fn profile(&self, id: &str, display_name: &str, known: bool) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            display_name: display_name.to_string(),
            account_created: self.account.account_created.clone(),
            description: self.account.description.clone(),
            contributor_terms_agreed: known,
            changesets_count: u32::from(known),
            traces_count: 0,
            languages: self.account.languages.clone(),
            known,
        }
    }

    /// Profile of the caller. `None` yields a placeholder with empty id and name.
    pub fn get_self(&self, identity: Option<&Identity>) -> UserProfile {
        match identity {
            Some(identity) => self.profile(&identity.id, &identity.display_name, true),
            None => self.profile("", "", false),
        }
    }

    /// One profile per requested id, in request order, duplicates included.
    pub fn get_users_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Vec<UserProfile> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                match self.registry.lookup(id) {
                    Some(identity) => self.profile(&identity.id, &identity.display_name, true),
                    None => self.profile(id, "", false),
                }
            })
            .collect()
    }

    /// The fixture changeset, attributed to the user with the given display
    /// name when one is registered.
    pub fn get_changeset_by_user_display_name(&self, display_name: &str) -> ChangesetRecord {
        let user = self
            .registry
            .lookup_id_by_display_name(display_name)
            .map(|uid| Attribution {
                uid,
                display_name: display_name.to_string(),
            });
        if user.is_none() {
            tracing::debug!(display_name = %display_name, "No identity with display name");
        }

        ChangesetRecord {
            id: FIXTURE_CHANGESET_ID,
            created_at: "2020-03-26T22:30:11Z".to_string(),
            closed_at: "2020-03-26T22:30:12Z".to_string(),
            open: false,
            min_lat: 53.5503,
            min_lon: 9.9930,
            max_lat: 53.5512,
            max_lon: 9.9951,
            comments_count: 0,
            changes_count: 1,
            user,
            tags: vec![
                ChangesetTag {
                    k: "comment".to_string(),
                    v: "Fixture changeset".to_string(),
                },
                ChangesetTag {
                    k: "created_by".to_string(),
                    v: "osm-oauth-fixture".to_string(),
                },
            ],
        }
    }
}
