use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use std::path::PathBuf;

impl Repository {
    /// Stage the current content of every file under `paths`
    ///
    /// Directories are expanded recursively. A file whose content matches the
    /// head commit is un-staged instead, which also cancels a pending removal.
    pub fn add(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (_, head_commit) = self.head_commit()?;
        let mut staging = self.staging();

        // Load the staging area from the disk
        staging.rehydrate()?;

        // Expand directories before touching anything so a bad path stages nothing
        let files = paths
            .iter()
            .map(|path| {
                let path = self.workspace().normalize_path(path)?;
                self.workspace().list_files(Some(&path))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
            .into_iter()
            .flatten();

        for file in files {
            let blob = self.workspace().parse_blob(&file)?;
            let blob_id = blob.object_id()?;

            if head_commit.tracked(&file) == Some(&blob_id) {
                staging.unstage(&file);
                continue;
            }

            self.database().store(&blob)?;
            staging.stage_addition(file, blob_id);
        }

        if staging.has_changed() {
            staging.write_updates()?;
        }

        Ok(())
    }
}
