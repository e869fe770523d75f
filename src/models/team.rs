use crate::entities::{IdentitySource, JobType, team_entity as team};
use async_graphql::{Enum, InputObject, SimpleObject};
use chrono::{DateTime, Utc};

/// Activation state of a team member, derived from the stored flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum VerificationStatus {
    /// Manager waiting for the emailed code.
    PendingVerification,
    /// Manager who confirmed their email. Terminal.
    Verified,
    /// Staff member, active from creation.
    Active,
    /// Invited member who has not accepted the invitation yet.
    Invited,
}

impl VerificationStatus {
    pub fn of(member: &team::Model) -> Self {
        if !member.email_verified && member.email_verification_code.is_some() {
            VerificationStatus::PendingVerification
        } else if !member.is_active {
            VerificationStatus::Invited
        } else if member.job_type == JobType::Manager {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Active
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex, name = "RestaurantTeam")]
pub struct TeamMember {
    pub uuid: String,
    pub identity_source: IdentitySource,
    pub name: String,
    pub email: Option<String>,
    pub job_type: JobType,
    pub restaurant_id: i32,
    pub is_active: bool,
    pub email_verified: bool,
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<team::Model> for TeamMember {
    fn from(m: team::Model) -> Self {
        let verification_status = VerificationStatus::of(&m);
        Self {
            uuid: m.uuid,
            identity_source: m.identity_source,
            name: m.name,
            email: m.email,
            job_type: m.job_type,
            restaurant_id: m.restaurant_id,
            is_active: m.is_active,
            email_verified: m.email_verified,
            verification_status,
            created_at: m.created_at,
        }
    }
}

/// Pre-registers a member who will accept an invitation later.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "CreateRestaurantTeamInput")]
pub struct CreateTeamMemberInput {
    /// Provider user id; a placeholder is generated when omitted.
    pub uuid: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub job_type: JobType,
    pub restaurant_id: i32,
}
