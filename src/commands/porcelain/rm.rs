use crate::areas::repository::Repository;
use crate::errors::TwigError;
use std::path::Path;

impl Repository {
    /// Stop tracking `path`
    ///
    /// A tracked file is staged for removal and deleted from the working
    /// directory. A file that is only staged for addition is un-staged and left
    /// on disk.
    pub fn rm(&self, path: &Path) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let path = self.workspace().normalize_path(path)?;
        let (_, head_commit) = self.head_commit()?;
        let mut staging = self.staging();

        staging.rehydrate()?;

        if head_commit.tracked(&path).is_some() {
            staging.stage_removal(path.clone());
            self.workspace().remove_file(&path)?;
        } else if !staging.unstage(&path) {
            return Err(TwigError::NotStaged.into());
        }

        staging.write_updates()?;

        Ok(())
    }
}
