use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::branch::REF_ALIASES;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::KitError;

/// A revision specification naming a commit.
///
/// Supported formats:
/// - `HEAD` and its alias `@`
/// - Branch names: `main`, `feature/new-feature`
/// - Full digests: 40-character hexadecimal strings
/// - Abbreviated digests: 4-40 character hexadecimal strings
///
/// # Parsing Strategy
///
/// Digest-like strings (e.g., "abc123") are initially parsed as `Ref` variants.
/// During resolution, if no branch with that name exists and the string looks
/// like a digest (4-40 hex characters), the resolver falls back to object ID
/// lookup. Branches therefore shadow digests of the same spelling.
#[derive(Debug, Clone)]
pub enum Revision {
    /// The current HEAD, attached or detached.
    Head,
    /// A branch name, or potentially a digest (decided during resolution).
    Ref(BranchName),
}

impl Revision {
    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);

        if resolved_name == HEAD_REF_NAME {
            return Ok(Revision::Head);
        }

        let branch_name = BranchName::try_parse(resolved_name.to_string())?;
        Ok(Revision::Ref(branch_name))
    }

    /// Resolve the revision to a commit ID within the given repository.
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Head => repository.refs().require_head(),
            Revision::Ref(branch_name) => {
                match repository.refs().read_branch(branch_name)? {
                    Some(oid) => Ok(oid),
                    None => {
                        let name_str = branch_name.as_ref();

                        if Self::looks_like_oid(name_str) {
                            let oid = repository.database().resolve_prefix(name_str)?;
                            Self::ensure_commit(&oid, repository)?;
                            Ok(oid)
                        } else {
                            Err(KitError::BranchNotFound(name_str.to_string()).into())
                        }
                    }
                }
            }
        }
    }

    fn ensure_commit(oid: &ObjectId, repository: &Repository) -> anyhow::Result<()> {
        let object_type = repository.database().get_object_type(oid)?;

        if object_type != ObjectType::Commit {
            anyhow::bail!(
                "object {} is a {}, not a commit",
                oid.to_short_oid(),
                object_type
            );
        }

        Ok(())
    }

    fn looks_like_oid(s: &str) -> bool {
        // Minimum prefix length accepted for abbreviated digests is 4.
        s.len() >= 4 && s.len() <= OBJECT_ID_LENGTH && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}
