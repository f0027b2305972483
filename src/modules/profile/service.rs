use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    api::error::DomainError,
    modules::profile::{
        model::ProfileResponse,
        repository::ProfileRepository,
        schema::{insert_member, ProfileEntity},
    },
    store::StoreError,
};

/// Attempts per CAS loop before the write is reported as a storage failure.
const CAS_RETRIES: usize = 3;

#[derive(Clone)]
pub struct ProfileService<P>
where
    P: ProfileRepository + Send + Sync,
{
    repo: Arc<P>,
}

impl<P> ProfileService<P>
where
    P: ProfileRepository + Send + Sync,
{
    pub fn with_dependencies(repo: Arc<P>) -> Self {
        ProfileService { repo }
    }

    pub async fn get_profile(
        &self,
        user_id: Uuid,
    ) -> Result<ProfileResponse, error::SystemError> {
        let doc = self
            .repo
            .find_by_user(&user_id)
            .await?
            .ok_or(DomainError::ProfileNotFound)?;
        Ok(ProfileResponse::from(doc.data))
    }

    pub async fn get_followers(&self, user_id: Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        Ok(self.get_profile(user_id).await?.followers)
    }

    pub async fn get_following(&self, user_id: Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        Ok(self.get_profile(user_id).await?.following)
    }

    /// `user_id` starts following `target_id`. Idempotent: re-following is a
    /// silent no-op. The follow fact lives denormalized in two documents
    /// (`followers` of the target, `following` of the follower) and the
    /// store has no transaction spanning them, so this writes the two sides
    /// in order and reconciles the pair afterwards.
    pub async fn follow(
        &self,
        user_id: Uuid,
        target_id: Uuid,
    ) -> Result<(), error::SystemError> {
        if user_id == target_id {
            return Err(DomainError::SelfFollow.into());
        }

        // Both profiles must exist before either side is written.
        if self.repo.find_by_user(&target_id).await?.is_none()
            || self.repo.find_by_user(&user_id).await?.is_none()
        {
            return Err(DomainError::ProfileNotFound.into());
        }

        self.mutate_profile(&target_id, |p| insert_member(&mut p.followers, user_id)).await?;
        self.mutate_profile(&user_id, |p| insert_member(&mut p.following, target_id)).await?;

        self.reconcile_follow_pair(user_id, target_id).await
    }

    /// Repairs the mirror invariant for one pair of profiles: `a` in
    /// `followers` of `b` exactly when `b` in `following` of `a`, in both
    /// orientations. No unfollow exists in this surface, so a follow
    /// recorded on either side is real and the union is the correct state.
    /// Idempotent and safe to re-run after any interrupted dual write.
    pub async fn reconcile_follow_pair(
        &self,
        a: Uuid,
        b: Uuid,
    ) -> Result<(), error::SystemError> {
        let doc_a = self.repo.find_by_user(&a).await?.ok_or(DomainError::ProfileNotFound)?;
        let doc_b = self.repo.find_by_user(&b).await?.ok_or(DomainError::ProfileNotFound)?;

        let a_follows_b =
            doc_a.data.following.contains(&b) || doc_b.data.followers.contains(&a);
        let b_follows_a =
            doc_b.data.following.contains(&a) || doc_a.data.followers.contains(&b);

        if !a_follows_b && !b_follows_a {
            return Ok(());
        }

        self.mutate_profile(&a, |p| {
            let mut changed = false;
            if a_follows_b {
                changed |= insert_member(&mut p.following, b);
            }
            if b_follows_a {
                changed |= insert_member(&mut p.followers, b);
            }
            changed
        })
        .await?;

        self.mutate_profile(&b, |p| {
            let mut changed = false;
            if b_follows_a {
                changed |= insert_member(&mut p.following, a);
            }
            if a_follows_b {
                changed |= insert_member(&mut p.followers, a);
            }
            changed
        })
        .await?;

        Ok(())
    }

    /// Optimistic single-document write. Re-reads and retries on version
    /// conflict; a mutation that reports no change is not written at all.
    async fn mutate_profile<F>(
        &self,
        user_id: &Uuid,
        mutate: F,
    ) -> Result<(), error::SystemError>
    where
        F: Fn(&mut ProfileEntity) -> bool,
    {
        for _ in 0..CAS_RETRIES {
            let doc = self
                .repo
                .find_by_user(user_id)
                .await?
                .ok_or(DomainError::ProfileNotFound)?;

            let mut data = doc.data.clone();
            if !mutate(&mut data) {
                return Ok(());
            }

            match self.repo.update(&doc.id, doc.version, data).await {
                Ok(_) => return Ok(()),
                Err(error::SystemError::Storage(StoreError::VersionConflict)) => {
                    log::debug!("Profile {} moved underneath us, retrying", user_id);
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(error::SystemError::Storage(StoreError::VersionConflict))
    }
}
