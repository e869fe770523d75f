use crate::entities::IdentitySource;
use chrono::Utc;
use rand::Rng;

const TOKEN_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The key a team member is stored under.
///
/// Members created while the identity provider was unreachable get a
/// placeholder token and need reconciling with a real account later
/// (see `TeamService::link_user_to_team_member`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberIdentity {
    ProviderIssued(String),
    LocallySynthesized(String),
}

impl MemberIdentity {
    /// Placeholder of the form `emp_<unix millis>_<9 base36 chars>`.
    pub fn synthesize() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..TOKEN_SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        MemberIdentity::LocallySynthesized(format!(
            "emp_{}_{}",
            Utc::now().timestamp_millis(),
            suffix
        ))
    }

    pub fn from_record(uuid: &str, source: IdentitySource) -> Self {
        match source {
            IdentitySource::Provider => MemberIdentity::ProviderIssued(uuid.to_string()),
            IdentitySource::Local => MemberIdentity::LocallySynthesized(uuid.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MemberIdentity::ProviderIssued(id) | MemberIdentity::LocallySynthesized(id) => id,
        }
    }

    pub fn source(&self) -> IdentitySource {
        match self {
            MemberIdentity::ProviderIssued(_) => IdentitySource::Provider,
            MemberIdentity::LocallySynthesized(_) => IdentitySource::Local,
        }
    }

    pub fn provider_id(&self) -> Option<&str> {
        match self {
            MemberIdentity::ProviderIssued(id) => Some(id),
            MemberIdentity::LocallySynthesized(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_token_format() {
        let identity = MemberIdentity::synthesize();
        assert_eq!(identity.source(), IdentitySource::Local);
        assert!(identity.provider_id().is_none());

        let parts: Vec<&str> = identity.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "emp");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), TOKEN_SUFFIX_LEN);
        assert!(parts[2].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_from_record_round_trips_source() {
        let provider = MemberIdentity::from_record("9f1c", IdentitySource::Provider);
        assert_eq!(provider, MemberIdentity::ProviderIssued("9f1c".into()));
        assert_eq!(provider.provider_id(), Some("9f1c"));

        let local = MemberIdentity::from_record("emp_1_abc", IdentitySource::Local);
        assert_eq!(local.source(), IdentitySource::Local);
        assert_eq!(local.as_str(), "emp_1_abc");
    }
}
