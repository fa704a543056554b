use crate::areas::repository::Repository;

impl Repository {
    /// Move the current branch to `revision` and check its snapshot out
    pub fn reset(&self, revision: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let target_oid = self.database().resolve_commit(revision)?;

        let mut staging = self.staging();
        staging.rehydrate()?;

        self.migrate_to(&target_oid)?;
        self.refs().update_head(&target_oid)?;

        staging.clear();
        staging.write_updates()?;

        Ok(())
    }
}
